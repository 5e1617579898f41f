// src/aggregate/buckets.rs
//! Per-bucket aggregates for bar charts and the activity heatmap.
//! Counters are summed per bucket before any ratio is taken; per-match
//! ratios are never averaged.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Timelike};
use serde::Serialize;

use super::count_ratio;
use crate::record::MatchRecord;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HourBucket {
    /// UTC hour of day, 0–23.
    pub hour: u32,
    pub matches: usize,
    pub kills: f64,
    pub deaths: f64,
    pub kd: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapBucket {
    pub map: String,
    pub matches: usize,
    pub kills: f64,
    pub deaths: f64,
    pub kd: f64,
}

/// Match counts by weekday (Monday first) × UTC hour.
pub type ActivityGrid = [[u32; 24]; 7];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Buckets {
    pub hourly: Vec<HourBucket>,
    pub maps: Vec<MapBucket>,
    pub outcomes: BTreeMap<String, usize>,
    pub activity: ActivityGrid,
}

#[derive(Clone, Copy, Default)]
struct Sums { matches: usize, kills: f64, deaths: f64 }

impl Sums {
    fn add(&mut self, r: &MatchRecord) {
        self.matches += 1;
        self.kills += r.kills();
        self.deaths += r.deaths();
    }
}

/// K/D by UTC hour, ascending; only hours that have matches.
/// Records without a valid timestamp have no hour and are skipped.
pub fn hourly_kd<'a, I>(records: I) -> Vec<HourBucket>
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut by_hour: BTreeMap<u32, Sums> = BTreeMap::new();
    for r in records {
        if let Some(at) = r.at() {
            by_hour.entry(at.hour()).or_default().add(r);
        }
    }
    by_hour
        .into_iter()
        .map(|(hour, s)| HourBucket {
            hour,
            matches: s.matches,
            kills: s.kills,
            deaths: s.deaths,
            kd: count_ratio(s.kills, s.deaths),
        })
        .collect()
}

/// K/D by map, best first; ties broken by map name.
pub fn map_kd<'a, I>(records: I) -> Vec<MapBucket>
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut by_map: HashMap<&str, Sums> = HashMap::new();
    for r in records {
        by_map.entry(r.map()).or_default().add(r);
    }
    let mut out: Vec<MapBucket> = by_map
        .into_iter()
        .map(|(map, s)| MapBucket {
            map: s!(map),
            matches: s.matches,
            kills: s.kills,
            deaths: s.deaths,
            kd: count_ratio(s.kills, s.deaths),
        })
        .collect();
    out.sort_by(|a, b| b.kd.total_cmp(&a.kd).then_with(|| a.map.cmp(&b.map)));
    out
}

/// Counts keyed by the literal outcome string.
pub fn outcome_counts<'a, I>(records: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut out = BTreeMap::new();
    for r in records {
        *out.entry(s!(r.outcome())).or_insert(0) += 1;
    }
    out
}

pub fn activity<'a, I>(records: I) -> ActivityGrid
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut grid = [[0u32; 24]; 7];
    for at in records.into_iter().filter_map(MatchRecord::at) {
        let day = at.weekday().num_days_from_monday() as usize;
        grid[day][at.hour() as usize] += 1;
    }
    grid
}

/// All bucketed aggregates in one pass per kind.
pub fn buckets<'a, I>(records: I) -> Buckets
where
    I: IntoIterator<Item = &'a MatchRecord>,
    I::IntoIter: Clone,
{
    let it = records.into_iter();
    Buckets {
        hourly: hourly_kd(it.clone()),
        maps: map_kd(it.clone()),
        outcomes: outcome_counts(it.clone()),
        activity: activity(it),
    }
}
