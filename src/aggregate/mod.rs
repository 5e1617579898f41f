// src/aggregate/mod.rs
//! Aggregator: pure functions from records to statistics.
//!
//! Two ratio families, used the same way everywhere (lifetime, filtered,
//! per bucket, per match):
//! - count ratios (K/D, headshots per kill): a zero denominator yields the
//!   numerator, so 5 kills and 0 deaths is a K/D of 5;
//! - percentages (win rate, accuracy): a zero denominator yields 0.
//!
//! Inputs are any iterator of `&MatchRecord`: a dataset's slice or a
//! `MatchView`. Empty input gives zeros and empty series.

pub mod buckets;
pub mod series;
pub mod summary;

pub use buckets::{buckets, Buckets, HourBucket, MapBucket};
pub use series::{series, DamagePoint, Point, Series};
pub use summary::{filtered, lifetime, FilteredSummary, LifetimeSummary};

use serde::Serialize;

use crate::record::MatchRecord;

/// Count ratio: `num / den`, or `num` when `den` is zero.
pub fn count_ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 { num } else { num / den }
}

/// Percentage in 0–100: `num / den * 100`, or 0 when `den` is zero.
pub fn percentage(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den * 100.0 }
}

/// Running sums over a record sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Totals {
    pub matches: usize,
    pub wins: usize,
    pub kills: f64,
    pub deaths: f64,
    pub shots: f64,
    pub hits: f64,
    pub headshots: f64,
    pub skill: f64,
    pub score: f64,
    pub best_streak: f64,
    pub play_time_secs: f64,
}

impl Totals {
    pub fn add(&mut self, r: &MatchRecord) {
        self.matches += 1;
        if r.is_win() { self.wins += 1; }
        self.kills += r.kills();
        self.deaths += r.deaths();
        self.shots += r.shots();
        self.hits += r.hits();
        self.headshots += r.headshots();
        self.skill += r.skill();
        self.score += r.score();
        self.best_streak = self.best_streak.max(r.longest_streak());
        self.play_time_secs += r.duration_secs().unwrap_or(0.0);
    }

    pub fn kd(&self) -> f64 { count_ratio(self.kills, self.deaths) }
    pub fn win_rate(&self) -> f64 { percentage(self.wins as f64, self.matches as f64) }
    pub fn accuracy(&self) -> f64 { percentage(self.hits, self.shots) }

    /// Mean of a summed column; 0 for no matches.
    pub fn mean(&self, sum: f64) -> f64 {
        if self.matches == 0 { 0.0 } else { sum / self.matches as f64 }
    }
}

impl<'a> FromIterator<&'a MatchRecord> for Totals {
    fn from_iter<I: IntoIterator<Item = &'a MatchRecord>>(iter: I) -> Self {
        let mut t = Totals::default();
        for r in iter {
            t.add(r);
        }
        t
    }
}
