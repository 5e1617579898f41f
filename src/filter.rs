// src/filter.rs
//! Filter engine.
//!
//! `FilterSpec` is a plain value built by the frontend; `filter` runs one
//! linear pass and returns a `MatchView`, a list of row indexes into the
//! borrowed records. Views never copy or reorder records.
//!
//! Empty selection sets select nothing (deselect-all shows no data).

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::data::FilterOptions;
use crate::record::MatchRecord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterSpec {
    pub operators: HashSet<String>,
    pub game_types: HashSet<String>,
    pub maps: HashSet<String>,
    /// Inclusive.
    pub start: DateTime<Utc>,
    /// Inclusive.
    pub end: DateTime<Utc>,
}

impl Default for FilterSpec {
    fn default() -> Self { Self::none() }
}

fn to_set<I, S>(values: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl FilterSpec {
    /// Nothing selected, unbounded dates.
    pub fn none() -> Self {
        Self {
            operators: HashSet::new(),
            game_types: HashSet::new(),
            maps: HashSet::new(),
            start: DateTime::<Utc>::MIN_UTC,
            end: DateTime::<Utc>::MAX_UTC,
        }
    }

    /// Every value in `opts`, over its date span (unbounded when it has none).
    pub fn select_all(opts: &FilterOptions) -> Self {
        Self {
            operators: to_set(opts.operators.iter().cloned()),
            game_types: to_set(opts.game_types.iter().cloned()),
            maps: to_set(opts.maps.iter().cloned()),
            start: opts.first.unwrap_or(DateTime::<Utc>::MIN_UTC),
            end: opts.last.unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn with_operators<I, S>(mut self, values: I) -> Self
    where I: IntoIterator<Item = S>, S: Into<String> {
        self.operators = to_set(values);
        self
    }

    pub fn with_game_types<I, S>(mut self, values: I) -> Self
    where I: IntoIterator<Item = S>, S: Into<String> {
        self.game_types = to_set(values);
        self
    }

    pub fn with_maps<I, S>(mut self, values: I) -> Self
    where I: IntoIterator<Item = S>, S: Into<String> {
        self.maps = to_set(values);
        self
    }

    pub fn with_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Calendar-day bounds, as a date picker hands them over: from the first
    /// instant of `from` through the last instant of `to` (UTC).
    pub fn with_dates(self, from: NaiveDate, to: NaiveDate) -> Self {
        self.with_range(day_start(from), day_end(to))
    }

    /// All four clauses. A record without a valid UTC timestamp never
    /// matches a date range.
    pub fn matches(&self, r: &MatchRecord) -> bool {
        self.operators.contains(r.operator())
            && self.game_types.contains(r.game_type())
            && self.maps.contains(r.map())
            && r.at().is_some_and(|at| self.start <= at && at <= self.end)
    }

    /// True when some selection set is empty, i.e. nothing can match.
    pub fn selects_nothing(&self) -> bool {
        self.operators.is_empty() || self.game_types.is_empty() || self.maps.is_empty()
    }
}

pub fn day_start(d: NaiveDate) -> DateTime<Utc> {
    d.and_time(NaiveTime::MIN).and_utc()
}

pub fn day_end(d: NaiveDate) -> DateTime<Utc> {
    match d.succ_opt() {
        Some(next) => day_start(next) - TimeDelta::nanoseconds(1),
        None => DateTime::<Utc>::MAX_UTC,
    }
}

/// Stable, single-pass filter.
pub fn filter<'a>(records: &'a [MatchRecord], spec: &FilterSpec) -> MatchView<'a> {
    if spec.selects_nothing() {
        return MatchView { row_ix: vec![], records };
    }
    let row_ix = records
        .iter()
        .enumerate()
        .filter(|(_, r)| spec.matches(r))
        .map(|(i, _)| i)
        .collect();
    MatchView { row_ix, records }
}

/// Zero-copy filtered view. Holds positions of kept rows in source order.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchView<'a> {
    row_ix: Vec<usize>,
    records: &'a [MatchRecord],
}

impl<'a> MatchView<'a> {
    /// Unfiltered view over every record.
    pub fn all(records: &'a [MatchRecord]) -> Self {
        Self { row_ix: (0..records.len()).collect(), records }
    }

    /// Narrow this view further; order is kept.
    pub fn filter(&self, spec: &FilterSpec) -> MatchView<'a> {
        let row_ix = self
            .row_ix
            .iter()
            .copied()
            .filter(|&ix| spec.matches(&self.records[ix]))
            .collect();
        MatchView { row_ix, records: self.records }
    }

    /// Positions of kept rows in the source slice.
    pub fn indices(&self) -> &[usize] { &self.row_ix }

    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    /// Borrow a record by projected index.
    pub fn get(&self, i: usize) -> Option<&'a MatchRecord> {
        self.row_ix.get(i).and_then(|&ix| self.records.get(ix))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a MatchRecord> + Clone + '_ {
        let records = self.records;
        self.row_ix.iter().map(move |&ix| &records[ix])
    }

    /// Materialize owned records (export boundaries).
    pub fn to_owned_records(&self) -> Vec<MatchRecord> {
        self.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::RawRecord;

    fn rec(op: &str, gt: &str, map: &str, at: &str) -> MatchRecord {
        let raw: RawRecord = [("Operator", op), ("Game Type", gt), ("Map", map), ("UTC Timestamp", at)]
            .iter()
            .map(|(k, v)| (s!(*k), s!(*v)))
            .collect();
        MatchRecord::from_raw(&raw)
    }

    fn sample() -> Vec<MatchRecord> {
        vec![
            rec("Ghost", "TDM", "Skyline", "2024-11-01 10:00:00"),
            rec("Adler", "TDM", "Rewind", "2024-11-02 10:00:00"),
            rec("Ghost", "Domination", "Rewind", "2024-11-03 10:00:00"),
            rec("Ghost", "TDM", "Rewind", "not-a-date"),
            rec("Ghost", "TDM", "Rewind", "2024-11-04 23:59:59"),
        ]
    }

    fn all_of(records: &[MatchRecord]) -> FilterSpec {
        FilterSpec::select_all(&FilterOptions::from_records(records))
    }

    #[test]
    fn keeps_order_and_all_clauses() {
        let records = sample();
        let spec = all_of(&records).with_operators(["Ghost"]).with_maps(["Rewind"]);
        let view = filter(&records, &spec);
        assert_eq!(view.indices(), &[2, 4]);
        assert!(view.iter().all(|r| spec.matches(r)));
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let records = sample();
        assert!(filter(&records, &all_of(&records).with_operators(Vec::<String>::new())).is_empty());
        assert!(filter(&records, &all_of(&records).with_game_types(Vec::<String>::new())).is_empty());
        assert!(filter(&records, &all_of(&records).with_maps(Vec::<String>::new())).is_empty());
        assert!(filter(&records, &FilterSpec::none()).is_empty());
    }

    #[test]
    fn date_range_is_inclusive_by_day() {
        let records = sample();
        let from = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 11, 4).unwrap();
        let view = filter(&records, &all_of(&records).with_dates(from, to));
        assert_eq!(view.indices(), &[1, 2, 4]);
    }

    #[test]
    fn invalid_timestamp_never_matches() {
        let records = sample();
        let view = filter(&records, &all_of(&records));
        assert!(!view.indices().contains(&3));
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn refiltering_is_idempotent() {
        let records = sample();
        let spec = all_of(&records).with_game_types(["TDM"]);
        let once = filter(&records, &spec);
        let twice = once.filter(&spec);
        assert_eq!(once, twice);
        assert_eq!(once.get(0).map(|r| r.map()), Some("Skyline"));
    }
}
