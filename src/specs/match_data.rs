// src/specs/match_data.rs
//! Scraping *spec* for the match-history tables of an exported report.
//!
//! Layout of the export (one block per game title):
//! ```text
//! <h1>Call of Duty: Black Ops 6</h1>
//! <h2>Multiplayer Match Data (reverse chronological)</h2>
//! <table><tr><th>UTC Timestamp</th>…</tr><tr><td>…</td>…</tr>…</table>
//! ```
//! Every title repeats the same `<h2>` text, so a section is identified by
//! the heading text **and** its previous element sibling (the title).
//! The table must be the heading's next element sibling.
//!
//! A report with a single title is just one `SectionSpec`.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;

use crate::config::consts::{HEADING_TAG, MATCH_DATA_HEADING};
use crate::core::{Document, Element};
use crate::error::ExtractError;

/// Header name → trimmed cell text.
pub type RawRecord = HashMap<String, String>;

/// Where one game's table lives.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionSpec {
    /// Dataset key, e.g. `bo6`.
    pub key: String,
    /// Substring the previous sibling's text must contain, e.g. `Black Ops 6`.
    pub sibling_contains: String,
    #[serde(default = "default_heading")]
    pub heading: String,
    #[serde(default = "default_heading_tag")]
    pub heading_tag: String,
}

fn default_heading() -> String { s!(MATCH_DATA_HEADING) }
fn default_heading_tag() -> String { s!(HEADING_TAG) }

impl SectionSpec {
    /// Section under the standard match-data heading.
    pub fn new(key: &str, sibling_contains: &str) -> Self {
        Self {
            key: s!(key),
            sibling_contains: s!(sibling_contains),
            heading: default_heading(),
            heading_tag: default_heading_tag(),
        }
    }

    pub fn with_heading(mut self, tag: &str, heading: &str) -> Self {
        self.heading_tag = s!(tag);
        self.heading = s!(heading);
        self
    }
}

/// Output bundle: header row plus one record per data row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRecord>,
}

/// Extract every section from one parse of the document.
/// The first structural failure aborts; there is no partial result.
/// Section keys must be unique.
pub fn extract_all(html_doc: &str, sections: &[SectionSpec]) -> Result<BTreeMap<String, RawTable>, ExtractError> {
    let mut seen = HashSet::new();
    if let Some(dup) = sections.iter().find(|s| !seen.insert(s.key.as_str())) {
        return Err(ExtractError::DuplicateKey { key: dup.key.clone() });
    }

    let t = std::time::Instant::now();
    let doc = Document::parse(html_doc);
    logd!("Parsed document ({} bytes) in {:?}", html_doc.len(), t.elapsed());

    let mut out = BTreeMap::new();
    for spec in sections {
        let table = extract(&doc, spec)?;
        logd!("[{}] {} columns, {} rows", spec.key, table.headers.len(), table.rows.len());
        out.insert(spec.key.clone(), table);
    }
    Ok(out)
}

/// Locate one section and read its table.
pub fn extract(doc: &Document, spec: &SectionSpec) -> Result<RawTable, ExtractError> {
    let hit = doc
        .find_with_siblings(|prev, el| {
            el.is(&spec.heading_tag)
                && el.text() == spec.heading
                && prev.is_some_and(|p| p.text().contains(&spec.sibling_contains))
        })
        .ok_or_else(|| ExtractError::SectionNotFound {
            key: spec.key.clone(),
            tag: spec.heading_tag.clone(),
            heading: spec.heading.clone(),
            sibling: spec.sibling_contains.clone(),
        })?;

    match hit.next {
        Some(table) if table.is("table") => Ok(parse_table(table)),
        other => Err(ExtractError::TableNotFound {
            key: spec.key.clone(),
            heading: spec.heading.clone(),
            found: other.map(|el| format!("<{}>", el.name())).unwrap_or_else(|| s!("nothing")),
        }),
    }
}

/// First row = header names; every later row zips positionally onto them.
/// Short rows leave trailing fields absent, extra cells are dropped,
/// rows with no cells are skipped.
pub fn parse_table(table: &Element) -> RawTable {
    let mut rows = table_rows(table).into_iter();

    let headers: Vec<String> = match rows.next() {
        Some(first) => row_cells(first).iter().map(|c| c.text()).collect(),
        None => return RawTable::default(),
    };

    let mut out = Vec::new();
    for tr in rows {
        let cells = row_cells(tr);
        if cells.is_empty() {
            continue;
        }
        let rec: RawRecord = headers
            .iter()
            .zip(cells.iter())
            .map(|(h, c)| (h.clone(), c.text()))
            .collect();
        out.push(rec);
    }

    RawTable { headers, rows: out }
}

/// `<tr>` rows in document order, looking through row groups but not into nested tables.
fn table_rows(table: &Element) -> Vec<&Element> {
    let mut out = Vec::new();
    for el in table.elements() {
        if el.is("tr") {
            out.push(el);
        } else if el.is("thead") || el.is("tbody") || el.is("tfoot") {
            out.extend(el.elements().filter(|r| r.is("tr")));
        }
    }
    out
}

fn row_cells(tr: &Element) -> Vec<&Element> {
    tr.elements().filter(|c| c.is("td") || c.is("th")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_games() -> &'static str {
        r#"
        <html><body>
          <h1>Call of Duty: Black Ops 6</h1>
          <h2>Multiplayer Match Data (reverse chronological)</h2>
          <table>
            <tr><th>UTC Timestamp</th><th>Map</th><th>Kills</th></tr>
            <tr><td>2024-11-03 21:14:05</td><td>Skyline</td><td>12</td></tr>
          </table>
          <h1>Call of Duty: Modern Warfare 3</h1>
          <h2>Multiplayer Match Data (reverse chronological)</h2>
          <table>
            <tr><th>UTC Timestamp</th><th>Map</th><th>Kills</th></tr>
            <tr><td>2024-01-02 10:00:00</td><td>Rust &amp; Dust</td><td>7</td></tr>
            <tr><td>2024-01-03 11:00:00</td><td>Highrise</td><td>3</td></tr>
          </table>
        </body></html>
        "#
    }

    #[test]
    fn zips_header_onto_rows() {
        let doc = Document::parse(
            "<h1>G</h1><h2>T</h2><table><tr><th>A</th><th>B</th></tr>\
             <tr><td>1</td><td>2</td></tr><tr><td>3</td><td>4</td></tr></table>",
        );
        let spec = SectionSpec::new("g", "G").with_heading("h2", "T");
        let table = extract(&doc, &spec).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        let want: Vec<RawRecord> = vec![
            HashMap::from([(s!("A"), s!("1")), (s!("B"), s!("2"))]),
            HashMap::from([(s!("A"), s!("3")), (s!("B"), s!("4"))]),
        ];
        assert_eq!(table.rows, want);
    }

    #[test]
    fn separates_sections_by_title() {
        let out = extract_all(
            two_games(),
            &[SectionSpec::new("bo6", "Black Ops 6"), SectionSpec::new("mw3", "Modern Warfare 3")],
        )
        .unwrap();
        assert_eq!(out["bo6"].rows.len(), 1);
        assert_eq!(out["mw3"].rows.len(), 2);
        assert_eq!(out["mw3"].rows[0]["Map"], "Rust & Dust");
    }

    #[test]
    fn short_rows_leave_fields_absent() {
        let doc = Document::parse(
            "<h1>G</h1><h2>T</h2><table><tbody><tr><th>A</th><th>B</th></tr>\
             <tr><td> 1 </td></tr><tr></tr><tr><td>5</td><td>6</td><td>extra</td></tr></tbody></table>",
        );
        let spec = SectionSpec::new("g", "G").with_heading("h2", "T");
        let table = extract(&doc, &spec).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("A").map(String::as_str), Some("1"));
        assert!(!table.rows[0].contains_key("B"));
        assert_eq!(table.rows[1].len(), 2);
    }

    #[test]
    fn missing_title_is_section_not_found() {
        let err = extract_all(two_games(), &[SectionSpec::new("bo7", "Black Ops 7")]).unwrap_err();
        assert!(matches!(err, ExtractError::SectionNotFound { ref key, .. } if key == "bo7"));
    }

    #[test]
    fn heading_without_table_is_table_not_found() {
        let doc = Document::parse("<h1>G</h1><h2>T</h2><p>no data</p><table></table>");
        let spec = SectionSpec::new("g", "G").with_heading("h2", "T");
        let err = extract(&doc, &spec).unwrap_err();
        assert_eq!(
            err,
            ExtractError::TableNotFound { key: s!("g"), heading: s!("T"), found: s!("<p>") }
        );
    }

    #[test]
    fn heading_text_must_match_exactly() {
        let doc = Document::parse("<h1>G</h1><h2>T (old)</h2><table></table>");
        let spec = SectionSpec::new("g", "G").with_heading("h2", "T");
        assert!(matches!(extract(&doc, &spec), Err(ExtractError::SectionNotFound { .. })));
    }

    #[test]
    fn unclosed_inline_tag_keeps_cells_apart() {
        let doc = Document::parse(
            "<h1>G</h1><h2>T</h2><table><tr><th>Map</th><th>Kills</th></tr>\
             <tr><td><b>Skyline<td>3</tr><tr><td>Rewind</td><td>4</td></tr></table>",
        );
        let spec = SectionSpec::new("g", "G").with_heading("h2", "T");
        let table = extract(&doc, &spec).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["Map"], "Skyline");
        assert_eq!(table.rows[0]["Kills"], "3");
        assert_eq!(table.rows[1]["Map"], "Rewind");
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = extract_all(
            two_games(),
            &[SectionSpec::new("g", "Black Ops 6"), SectionSpec::new("g", "Modern Warfare 3")],
        )
        .unwrap_err();
        assert_eq!(err, ExtractError::DuplicateKey { key: s!("g") });
        assert_eq!(err.key(), "g");
    }
}
