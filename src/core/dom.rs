// src/core/dom.rs
//! Minimal element tree built from `html::Tokens`.
//!
//! Only what the extractors need: element names, child order (for sibling
//! navigation) and text content. Malformed markup is repaired the cheap way:
//! - implied end tags for table parts, list items and paragraphs, closing
//!   through unclosed inline tags (`<td><b>x<td>y` is two cells);
//! - a stray close tag with no open counterpart is ignored;
//! - nesting is capped at `MAX_DEPTH`;
//! - anything still open at EOF is closed.

use super::html::{is_void, Token, Tokens};
use super::sanitize::{decode_entities, normalize_ws};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    name: String,
    children: Vec<Node>,
}

/// Sibling context of a matched element.
#[derive(Clone, Copy, Debug)]
pub struct Siblings<'a> {
    pub prev: Option<&'a Element>,
    pub this: &'a Element,
    pub next: Option<&'a Element>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

/// Deepest element nesting kept in the tree. Opens past this are dropped
/// and their content lands in the innermost kept element.
pub const MAX_DEPTH: usize = 256;

const CELLS: &[&str] = &["td", "th"];
const ROW_PARTS: &[&str] = &["td", "th", "tr"];
const TABLE_PARTS: &[&str] = &["td", "th", "tr", "thead", "tbody", "tfoot"];
const TABLE_SCOPE: &[&str] = &["table", "#document"];
const P_SCOPE: &[&str] = &["td", "th", "table", "button", "#document"];
const ROW_SCOPE: &[&str] = &["tr", "table", "#document"];
const LIST_SCOPE: &[&str] = &["ul", "ol", "#document"];
const SELECT_SCOPE: &[&str] = &["select", "datalist", "#document"];

/// For an opening tag: which open elements it implicitly closes, and which
/// elements bound the search down the stack.
fn implied_close(open: &str) -> Option<(&'static [&'static str], &'static [&'static str])> {
    let (targets, scope): (&[&str], &[&str]) = match open {
        "td" | "th" => (CELLS, ROW_SCOPE),
        "tr" => (ROW_PARTS, TABLE_SCOPE),
        "thead" | "tbody" | "tfoot" => (TABLE_PARTS, TABLE_SCOPE),
        "li" => (&["li"], LIST_SCOPE),
        "option" => (&["option"], SELECT_SCOPE),
        "p" | "div" | "table" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => (&["p"], P_SCOPE),
        _ => return None,
    };
    Some((targets, scope))
}

/// Stack index of the outermost open element that `open` closes, searching
/// down from the top until a scope boundary.
fn implied_close_at(stack: &[Element], open: &str) -> Option<usize> {
    let (targets, scope) = implied_close(open)?;
    let mut hit = None;
    for (ix, el) in stack.iter().enumerate().skip(1).rev() {
        if targets.contains(&el.name.as_str()) {
            hit = Some(ix);
        } else if scope.contains(&el.name.as_str()) {
            break;
        }
    }
    hit
}

impl Document {
    pub fn parse(html: &str) -> Self {
        let mut stack: Vec<Element> = vec![Element::new("#document")];

        fn close_top(stack: &mut Vec<Element>) {
            // root stays at index 0
            if stack.len() > 1 {
                if let Some(el) = stack.pop() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Element(el));
                    }
                }
            }
        }

        let mut dropped = 0usize;
        for tok in Tokens::new(html) {
            match tok {
                Token::Open { name, self_closing } => {
                    if let Some(ix) = implied_close_at(&stack, &name) {
                        while stack.len() > ix {
                            close_top(&mut stack);
                        }
                    }
                    let void = is_void(&name) || self_closing;
                    if !void && stack.len() > MAX_DEPTH {
                        dropped += 1;
                        continue;
                    }
                    stack.push(Element::new(&name));
                    if void {
                        close_top(&mut stack);
                    }
                }
                Token::Close { name } => {
                    if let Some(pos) = stack.iter().skip(1).rposition(|el| el.name == name) {
                        // rposition over the skipped iterator is relative to index 1
                        while stack.len() > pos + 1 {
                            close_top(&mut stack);
                        }
                    }
                }
                Token::Text(t) => {
                    if let Some(top) = stack.last_mut() {
                        top.children.push(Node::Text(t.to_string()));
                    }
                }
            }
        }

        while stack.len() > 1 {
            close_top(&mut stack);
        }
        if dropped > 0 {
            logw!("Nesting deeper than {MAX_DEPTH}: ignored {dropped} open tag(s)");
        }
        let root = stack.pop().unwrap_or_else(|| Element::new("#document"));
        Self { root }
    }

    pub fn root(&self) -> &Element { &self.root }

    /// First element, in document order, accepted by `pred(prev_sibling, element)`.
    pub fn find_with_siblings<P>(&self, pred: P) -> Option<Siblings<'_>>
    where
        P: Fn(Option<&Element>, &Element) -> bool,
    {
        self.root.find_with_siblings(&pred)
    }
}

impl Element {
    fn new(name: &str) -> Self {
        Self { name: name.to_string(), children: Vec::new() }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn is(&self, name: &str) -> bool { self.name.eq_ignore_ascii_case(name) }

    pub fn children(&self) -> &[Node] { &self.children }

    /// Element children only, in order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Visible text: entities decoded, whitespace collapsed, trimmed.
    pub fn text(&self) -> String {
        let mut raw = s!();
        self.collect_text(&mut raw);
        normalize_ws(&raw)
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&decode_entities(t)),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    fn find_with_siblings<'a, P>(&'a self, pred: &P) -> Option<Siblings<'a>>
    where
        P: Fn(Option<&Element>, &Element) -> bool,
    {
        let kids: Vec<&Element> = self.elements().collect();
        for (i, &el) in kids.iter().enumerate() {
            let prev = i.checked_sub(1).map(|j| kids[j]);
            if pred(prev, el) {
                return Some(Siblings { prev, this: el, next: kids.get(i + 1).copied() });
            }
            if let Some(hit) = el.find_with_siblings(pred) {
                return Some(hit);
            }
        }
        None
    }
}
