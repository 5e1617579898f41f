// src/aggregate/summary.rs
use serde::Serialize;

use super::Totals;
use crate::record::MatchRecord;

/// Whole-dataset numbers; independent of the active filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct LifetimeSummary {
    pub matches: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub kills: f64,
    pub deaths: f64,
    pub kd: f64,
    pub shots: f64,
    pub hits: f64,
    pub accuracy: f64,
    pub play_time_secs: f64,
}

/// Numbers for the current view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FilteredSummary {
    pub matches: usize,
    pub avg_skill: f64,
    pub kd: f64,
    pub win_rate: f64,
    pub accuracy: f64,
    pub best_streak: f64,
    pub avg_score: f64,
    pub play_time_secs: f64,
}

pub fn lifetime<'a, I>(records: I) -> LifetimeSummary
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let t: Totals = records.into_iter().collect();
    LifetimeSummary {
        matches: t.matches,
        wins: t.wins,
        win_rate: t.win_rate(),
        kills: t.kills,
        deaths: t.deaths,
        kd: t.kd(),
        shots: t.shots,
        hits: t.hits,
        accuracy: t.accuracy(),
        play_time_secs: t.play_time_secs,
    }
}

pub fn filtered<'a, I>(records: I) -> FilteredSummary
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let t: Totals = records.into_iter().collect();
    FilteredSummary {
        matches: t.matches,
        avg_skill: t.mean(t.skill),
        kd: t.kd(),
        win_rate: t.win_rate(),
        accuracy: t.accuracy(),
        best_streak: t.best_streak,
        avg_score: t.mean(t.score),
        play_time_secs: t.play_time_secs,
    }
}
