// src/data.rs
//
// Loaded datasets.
//
// - Dataset: read-only record collection for one game key, plus the filter
//            vocabulary computed once at load time.
// - FilterOptions: what a frontend needs to populate its controls.
//
// Views over a dataset live in `filter` (MatchView); replacing datasets is
// the store's job (see src/store.rs).

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::filter::{self, FilterSpec, MatchView};
use crate::normalize;
use crate::record::MatchRecord;
use crate::specs::RawTable;

/// Distinct categorical values (sorted) and the span of valid UTC timestamps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub operators: Vec<String>,
    pub game_types: Vec<String>,
    pub maps: Vec<String>,
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
}

impl FilterOptions {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let mut operators = BTreeSet::new();
        let mut game_types = BTreeSet::new();
        let mut maps = BTreeSet::new();
        let mut first: Option<DateTime<Utc>> = None;
        let mut last: Option<DateTime<Utc>> = None;

        for r in records {
            operators.insert(r.operator());
            game_types.insert(r.game_type());
            maps.insert(r.map());
            if let Some(at) = r.at() {
                first = Some(first.map_or(at, |f| f.min(at)));
                last = Some(last.map_or(at, |l| l.max(at)));
            }
        }

        let owned = |set: BTreeSet<&str>| set.into_iter().map(String::from).collect();
        Self {
            operators: owned(operators),
            game_types: owned(game_types),
            maps: owned(maps),
            first,
            last,
        }
    }
}

/// Authoritative records for one game. Never mutated after construction.
#[derive(Clone, Debug)]
pub struct Dataset {
    key: String,
    records: Vec<MatchRecord>,
    options: FilterOptions,
}

impl Dataset {
    pub fn new(key: &str, records: Vec<MatchRecord>) -> Self {
        let options = FilterOptions::from_records(&records);
        Self { key: s!(key), records, options }
    }

    /// Normalize an extracted table into a dataset.
    pub fn from_table(key: &str, table: &RawTable) -> Self {
        let mut anomalies = 0usize;
        let records: Vec<MatchRecord> = table
            .rows
            .iter()
            .map(|raw| {
                let n = normalize::normalize(raw);
                anomalies += n.anomalies;
                MatchRecord::from_fields(n.fields)
            })
            .collect();

        if anomalies > 0 {
            logd!("[{key}] {anomalies} cell(s) defaulted during normalization");
        }
        Self::new(key, records)
    }

    pub fn key(&self) -> &str { &self.key }

    /// Read-only view of the records, in source order.
    pub fn records(&self) -> &[MatchRecord] { &self.records }

    pub fn options(&self) -> &FilterOptions { &self.options }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Everything this dataset offers, over its full date span.
    pub fn select_all(&self) -> FilterSpec {
        FilterSpec::select_all(&self.options)
    }

    pub fn filter(&self, spec: &FilterSpec) -> MatchView<'_> {
        filter::filter(&self.records, spec)
    }
}
