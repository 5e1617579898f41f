// src/core/html.rs
// Tolerant HTML tokenizer over a whole document.
// Quote-aware inside tags, skips comments/doctype, drops script and style bodies.
// Attributes are not kept; nothing downstream needs them.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Open { name: String, self_closing: bool },
    Close { name: String },
    Text(&'a str),
}

/// Elements that never have children.
pub fn is_void(name: &str) -> bool {
    matches!(
        name,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input"
            | "link" | "meta" | "param" | "source" | "track" | "wbr"
    )
}

fn is_raw_text(name: &str) -> bool {
    matches!(name, "script" | "style")
}

/// Case-insensitive ASCII find starting at byte offset `from`.
pub fn find_ci(hay: &str, needle: &str, from: usize) -> Option<usize> {
    let h = hay.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || from >= h.len() || n.len() > h.len() - from {
        return None;
    }
    (from..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Leading tag name (`td class=x` → `td`), lowercased. Empty if not a tag.
pub fn tag_name(inner: &str) -> String {
    let mut name = String::new();
    for (idx, ch) in inner.chars().enumerate() {
        if ch.is_ascii_alphabetic() || (idx > 0 && (ch.is_ascii_digit() || ch == '-')) {
            name.push(ch.to_ascii_lowercase());
        } else {
            break;
        }
    }
    name
}

pub struct Tokens<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    n: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(s: &'a str) -> Self { Self { s, b: s.as_bytes(), i: 0, n: s.len() } }

    /// From the byte after '<', find the closing '>' outside quotes.
    #[inline]
    fn tag_end(&self, from: usize) -> usize {
        let mut j = from;
        let mut in_s = false; // '
        let mut in_d = false; // "
        while j < self.n {
            match self.b[j] {
                b'\'' if !in_d => in_s = !in_s,
                b'"'  if !in_s => in_d = !in_d,
                b'>' if !in_s && !in_d => return j,
                _ => {}
            }
            j += 1;
        }
        self.n
    }

    #[inline]
    fn text_until_lt(&mut self, from: usize) -> Token<'a> {
        let end = self.b[from + 1..]
            .iter()
            .position(|&c| c == b'<')
            .map(|p| from + 1 + p)
            .unwrap_or(self.n);
        self.i = end;
        Token::Text(&self.s[from..end])
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.i < self.n {
            let start = self.i;
            if self.b[start] != b'<' {
                return Some(self.text_until_lt(start));
            }

            let rest = &self.s[start..];
            if rest.starts_with("<!--") {
                self.i = rest.find("-->").map(|e| start + e + 3).unwrap_or(self.n);
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("<?") {
                self.i = (self.tag_end(start + 1) + 1).min(self.n);
                continue;
            }

            let end = self.tag_end(start + 1);
            let inner = &self.s[start + 1..end];

            if let Some(closing) = inner.strip_prefix('/') {
                let name = tag_name(closing.trim_start());
                self.i = (end + 1).min(self.n);
                if name.is_empty() { continue; }
                return Some(Token::Close { name });
            }

            let name = tag_name(inner);
            if name.is_empty() {
                // A stray '<' in text, e.g. "K/D < 1".
                return Some(self.text_until_lt(start));
            }

            let self_closing = inner.trim_end().ends_with('/');
            self.i = (end + 1).min(self.n);

            if is_raw_text(&name) && !self_closing {
                // Jump to the matching close tag; it is emitted on the next call.
                let close = format!("</{name}");
                self.i = find_ci(self.s, &close, self.i).unwrap_or(self.n);
            }

            return Some(Token::Open { name, self_closing });
        }
        None
    }
}
