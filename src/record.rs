// src/record.rs
//! Typed match rows.
//!
//! A `MatchRecord` is built once from a normalized row and never changes:
//! fields are private and only readable. The columns the statistics use are
//! lifted into typed fields; every other column stays reachable by header
//! name through `get`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::consts::WIN_TOKEN;
use crate::normalize;
use crate::specs::RawRecord;

/// Column names of the export used by the core.
pub mod col {
    pub const OPERATOR: &str = "Operator";
    pub const GAME_TYPE: &str = "Game Type";
    pub const MAP: &str = "Map";
    pub const OUTCOME: &str = "Match Outcome";

    pub const KILLS: &str = "Kills";
    pub const DEATHS: &str = "Deaths";
    pub const SHOTS: &str = "Shots";
    pub const HITS: &str = "Hits";
    pub const HEADSHOTS: &str = "Headshots";
    pub const DAMAGE_DONE: &str = "Damage Done";
    pub const DAMAGE_TAKEN: &str = "Damage Taken";
    pub const LONGEST_STREAK: &str = "Longest Streak";
    pub const ASSISTS: &str = "Assists";
    pub const SCORE: &str = "Score";
    pub const SKILL: &str = "Skill";

    pub const UTC_TIMESTAMP: &str = "UTC Timestamp";
    pub const MATCH_START: &str = "Match Start Timestamp";
    pub const MATCH_END: &str = "Match End Timestamp";
}

/// A parsed instant. Bad input stays visible as `Invalid`; it is never
/// replaced by a default time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Timestamp {
    Valid(DateTime<Utc>),
    Invalid(String),
    Missing,
}

impl Timestamp {
    pub fn valid(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Valid(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool { matches!(self, Timestamp::Valid(_)) }
}

/// A normalized cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Time(Timestamp),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchRecord {
    operator: String,
    game_type: String,
    map: String,
    outcome: String,

    kills: f64,
    deaths: f64,
    shots: f64,
    hits: f64,
    headshots: f64,
    damage_done: f64,
    damage_taken: f64,
    longest_streak: f64,
    assists: f64,
    score: f64,
    skill: f64,

    utc: Timestamp,
    start: Timestamp,
    end: Timestamp,

    fields: HashMap<String, Value>,
}

impl MatchRecord {
    /// Normalize and type one raw row. Never fails.
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self::from_fields(normalize::normalize(raw).fields)
    }

    pub fn from_fields(fields: HashMap<String, Value>) -> Self {
        let num = |name: &str| match fields.get(name) {
            Some(Value::Number(n)) => *n,
            _ => 0.0,
        };
        let text = |name: &str| match fields.get(name) {
            Some(Value::Text(t)) => t.clone(),
            _ => s!(),
        };
        let time = |name: &str| match fields.get(name) {
            Some(Value::Time(t)) => t.clone(),
            _ => Timestamp::Missing,
        };

        Self {
            operator: text(col::OPERATOR),
            game_type: text(col::GAME_TYPE),
            map: text(col::MAP),
            outcome: text(col::OUTCOME),
            kills: num(col::KILLS),
            deaths: num(col::DEATHS),
            shots: num(col::SHOTS),
            hits: num(col::HITS),
            headshots: num(col::HEADSHOTS),
            damage_done: num(col::DAMAGE_DONE),
            damage_taken: num(col::DAMAGE_TAKEN),
            longest_streak: num(col::LONGEST_STREAK),
            assists: num(col::ASSISTS),
            score: num(col::SCORE),
            skill: num(col::SKILL),
            utc: time(col::UTC_TIMESTAMP),
            start: time(col::MATCH_START),
            end: time(col::MATCH_END),
            fields,
        }
    }

    pub fn operator(&self) -> &str { &self.operator }
    pub fn game_type(&self) -> &str { &self.game_type }
    pub fn map(&self) -> &str { &self.map }
    pub fn outcome(&self) -> &str { &self.outcome }

    pub fn kills(&self) -> f64 { self.kills }
    pub fn deaths(&self) -> f64 { self.deaths }
    pub fn shots(&self) -> f64 { self.shots }
    pub fn hits(&self) -> f64 { self.hits }
    pub fn headshots(&self) -> f64 { self.headshots }
    pub fn damage_done(&self) -> f64 { self.damage_done }
    pub fn damage_taken(&self) -> f64 { self.damage_taken }
    pub fn longest_streak(&self) -> f64 { self.longest_streak }
    pub fn assists(&self) -> f64 { self.assists }
    pub fn score(&self) -> f64 { self.score }
    pub fn skill(&self) -> f64 { self.skill }

    pub fn utc_timestamp(&self) -> &Timestamp { &self.utc }
    pub fn match_start(&self) -> &Timestamp { &self.start }
    pub fn match_end(&self) -> &Timestamp { &self.end }

    /// Shortcut for the valid UTC instant, if any.
    pub fn at(&self) -> Option<DateTime<Utc>> { self.utc.valid() }

    /// End minus start, when both are valid and ordered.
    pub fn duration_secs(&self) -> Option<f64> {
        let (s, e) = (self.start.valid()?, self.end.valid()?);
        let secs = (e - s).num_milliseconds() as f64 / 1000.0;
        (secs >= 0.0).then_some(secs)
    }

    /// Outcome contains "win", any case.
    pub fn is_win(&self) -> bool {
        self.outcome.to_lowercase().contains(WIN_TOKEN)
    }

    /// Any column by header name.
    pub fn get(&self, name: &str) -> Option<&Value> { self.fields.get(name) }

    /// Numeric column by header name; absent or non-numeric reads as 0.
    pub fn number(&self, name: &str) -> f64 {
        match self.fields.get(name) {
            Some(Value::Number(n)) => *n,
            _ => 0.0,
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        pairs.iter().map(|(k, v)| (s!(*k), s!(*v))).collect()
    }

    #[test]
    fn lifts_typed_columns() {
        let r = MatchRecord::from_raw(&raw(&[
            ("Operator", "Ghost"),
            ("Map", "Skyline"),
            ("Kills", "12"),
            ("Deaths", "oops"),
            ("Match Outcome", "WIN"),
            ("UTC Timestamp", "2024-11-03 21:14:05"),
            ("Lifetime Wins", "301"),
            ("Team", "Blue"),
        ]));
        assert_eq!(r.operator(), "Ghost");
        assert_eq!(r.kills(), 12.0);
        assert_eq!(r.deaths(), 0.0);
        assert_eq!(r.shots(), 0.0);
        assert!(r.is_win());
        assert!(r.utc_timestamp().is_valid());
        assert_eq!(r.number("Lifetime Wins"), 301.0);
        assert_eq!(r.get("Team"), Some(&Value::Text(s!("Blue"))));
        assert_eq!(r.match_start(), &Timestamp::Missing);
    }

    #[test]
    fn duration_needs_both_ends() {
        let r = MatchRecord::from_raw(&raw(&[
            ("Match Start Timestamp", "2024-11-03 21:00:00"),
            ("Match End Timestamp", "2024-11-03 21:10:30"),
        ]));
        assert_eq!(r.duration_secs(), Some(630.0));

        let r = MatchRecord::from_raw(&raw(&[
            ("Match Start Timestamp", "2024-11-03 21:00:00"),
            ("Match End Timestamp", "garbage"),
        ]));
        assert_eq!(r.duration_secs(), None);
    }

    #[test]
    fn loss_is_not_win() {
        let r = MatchRecord::from_raw(&raw(&[("Match Outcome", "loss")]));
        assert!(!r.is_win());
    }
}
