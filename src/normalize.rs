// src/normalize.rs
//! Field normalizer: raw strings → numbers, fractions and instants.
//!
//! Policy:
//! - numeric columns use parse-float-prefix semantics; anything unparseable
//!   becomes 0, never "missing";
//! - percent columns (`"42.5%"`) become fractions (0.425);
//! - timestamp columns become `Timestamp`, with `Invalid` for bad input;
//! - every other column passes through as text.
//!
//! Normalization never fails. Defaulted cells are only counted.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::config::consts::{DATE_FORMAT, TIMESTAMP_FORMATS};
use crate::record::{Timestamp, Value};
use crate::specs::RawRecord;

pub const NUMERIC_FIELDS: &[&str] = &[
    "Score", "Kills", "Deaths", "Shots", "Hits", "Headshots",
    "Damage Done", "Damage Taken", "Longest Streak", "Lifetime Kills",
    "Lifetime Deaths", "Lifetime Time Played", "Assists", "Executions",
    "Suicides", "Armor Collected", "Armor Equipped", "Armor Destroyed",
    "Ground Vehicles Used", "Air Vehicles Used", "Total XP", "Score XP",
    "Challenge XP", "Match XP", "Medal XP", "Bonus XP", "Misc XP",
    "Accolade XP", "Weapon XP", "Operator XP", "Clan XP", "Battle Pass XP",
    "Rank at Start", "Rank at End", "XP at Start", "XP at End",
    "Score at Start", "Score at End", "Prestige at Start", "Prestige at End",
    "Lifetime Wall Bangs", "Lifetime Games Played", "Lifetime Wins",
    "Lifetime Losses", "Lifetime Hits", "Lifetime Misses", "Lifetime Near Misses",
    "Skill",
];

pub const PERCENT_FIELDS: &[&str] = &["Percentage Of Time Moving"];

pub const TIMESTAMP_FIELDS: &[&str] = &[
    "UTC Timestamp", "Match Start Timestamp", "Match End Timestamp",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Percent,
    Timestamp,
    Text,
}

pub fn field_kind(name: &str) -> FieldKind {
    if NUMERIC_FIELDS.contains(&name) {
        FieldKind::Numeric
    } else if PERCENT_FIELDS.contains(&name) {
        FieldKind::Percent
    } else if TIMESTAMP_FIELDS.contains(&name) {
        FieldKind::Timestamp
    } else {
        FieldKind::Text
    }
}

/// One normalized row plus the number of cells that were defaulted.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    pub fields: HashMap<String, Value>,
    pub anomalies: usize,
}

pub fn normalize(raw: &RawRecord) -> Normalized {
    let mut anomalies = 0usize;
    let fields = raw
        .iter()
        .map(|(name, cell)| {
            let v = match field_kind(name) {
                FieldKind::Numeric => {
                    let n = parse_number(cell);
                    if n.is_none() && !cell.is_empty() { anomalies += 1; }
                    Value::Number(n.unwrap_or(0.0))
                }
                FieldKind::Percent => {
                    let n = parse_percent(cell);
                    if n.is_none() && !cell.is_empty() { anomalies += 1; }
                    Value::Number(n.unwrap_or(0.0))
                }
                FieldKind::Timestamp => {
                    let t = parse_timestamp(cell);
                    if !t.is_valid() { anomalies += 1; }
                    Value::Time(t)
                }
                FieldKind::Text => Value::Text(cell.clone()),
            };
            (name.clone(), v)
        })
        .collect();
    Normalized { fields, anomalies }
}

/// Longest leading float literal (`"12.5kg"` → `"12.5"`), if any.
fn float_prefix(s: &str) -> Option<&str> {
    let b = s.as_bytes();
    let digits = |from: usize| b[from..].iter().take_while(|c| c.is_ascii_digit()).count();

    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) { i += 1; }
    let int_digits = digits(i);
    i += int_digits;

    let mut frac_digits = 0;
    if b.get(i) == Some(&b'.') {
        frac_digits = digits(i + 1);
        if int_digits + frac_digits > 0 { i += 1 + frac_digits; }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) { j += 1; }
        let exp = digits(j);
        if exp > 0 { i = j + exp; }
    }
    Some(&s[..i])
}

/// Parse-float semantics: leading number wins, trailing junk is ignored.
/// `None` when there is no number or it is not finite.
pub fn parse_number(s: &str) -> Option<f64> {
    let n: f64 = float_prefix(s.trim()).and_then(|p| p.parse().ok())?;
    n.is_finite().then_some(n)
}

/// `"42.5%"` → 0.425. The `%` is optional, so `"42.5"` reads the same.
pub fn parse_percent(s: &str) -> Option<f64> {
    parse_number(s.trim().trim_end_matches('%')).map(|n| n / 100.0)
}

/// RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]` (space or `T`), `YYYY-MM-DD HH:MM`,
/// or a bare date. Naive forms are UTC.
pub fn parse_timestamp(s: &str) -> Timestamp {
    let t = s.trim();
    let t = t.strip_suffix(" UTC").unwrap_or(t);

    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Timestamp::Valid(dt.with_timezone(&Utc));
    }
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(t, fmt) {
            return Timestamp::Valid(ndt.and_utc());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(t, DATE_FORMAT) {
        return Timestamp::Valid(d.and_time(NaiveTime::MIN).and_utc());
    }
    Timestamp::Invalid(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        pairs.iter().map(|(k, v)| (s!(*k), s!(*v))).collect()
    }

    #[test]
    fn numbers_follow_parse_float() {
        assert_eq!(parse_number("12"), Some(12.0));
        assert_eq!(parse_number(" -3.5 "), Some(-3.5));
        assert_eq!(parse_number("12.5kg"), Some(12.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("2e"), Some(2.0));
        assert_eq!(parse_number("x"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("."), None);
    }

    #[test]
    fn unparseable_numeric_field_is_zero() {
        let n = normalize(&raw(&[("Kills", "x"), ("Deaths", "")]));
        assert_eq!(n.fields["Kills"], Value::Number(0.0));
        assert_eq!(n.fields["Deaths"], Value::Number(0.0));
        assert_eq!(n.anomalies, 1);
    }

    #[test]
    fn percent_becomes_fraction() {
        let n = normalize(&raw(&[("Percentage Of Time Moving", "42.5%")]));
        assert_eq!(n.fields["Percentage Of Time Moving"], Value::Number(0.425));
    }

    #[test]
    fn bad_timestamp_is_explicit() {
        let n = normalize(&raw(&[("UTC Timestamp", "not-a-date")]));
        assert_eq!(
            n.fields["UTC Timestamp"],
            Value::Time(Timestamp::Invalid(s!("not-a-date")))
        );
        assert_eq!(n.anomalies, 1);
    }

    #[test]
    fn timestamp_forms() {
        let want = Utc.with_ymd_and_hms(2024, 11, 3, 21, 14, 5).unwrap();
        assert_eq!(parse_timestamp("2024-11-03 21:14:05"), Timestamp::Valid(want));
        assert_eq!(parse_timestamp("2024-11-03T21:14:05"), Timestamp::Valid(want));
        assert_eq!(parse_timestamp("2024-11-03T21:14:05Z"), Timestamp::Valid(want));
        assert_eq!(parse_timestamp("2024-11-03T22:14:05+01:00"), Timestamp::Valid(want));
        assert_eq!(parse_timestamp("2024-11-03 21:14:05 UTC"), Timestamp::Valid(want));

        let midnight = parse_timestamp("2024-11-03").valid().unwrap();
        assert_eq!(midnight.hour(), 0);
    }

    #[test]
    fn other_columns_pass_through() {
        let n = normalize(&raw(&[("Operator", " Ghost "), ("Kills", "3")]));
        assert_eq!(n.fields["Operator"], Value::Text(s!(" Ghost ")));
        assert_eq!(field_kind("Operator"), FieldKind::Text);
        assert_eq!(field_kind("Skill"), FieldKind::Numeric);
    }
}
