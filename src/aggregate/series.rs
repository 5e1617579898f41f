// src/aggregate/series.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{count_ratio, percentage};
use crate::record::MatchRecord;

/// One sample on a time axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub at: DateTime<Utc>,
    pub value: f64,
}

/// Damage taken vs. done for one match; `won` picks the marker colour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DamagePoint {
    pub taken: f64,
    pub done: f64,
    pub won: bool,
}

/// Per-match chart inputs, in view order.
///
/// Time-keyed series skip records without a valid UTC timestamp. Value
/// arrays and damage points take every record.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Series {
    pub skill: Vec<Point>,
    pub kd: Vec<Point>,
    pub accuracy: Vec<Point>,
    pub headshot_ratio: Vec<Point>,
    pub damage: Vec<DamagePoint>,
    pub accuracy_values: Vec<f64>,
    pub kd_values: Vec<f64>,
    pub skill_values: Vec<f64>,
}

impl Series {
    fn push(&mut self, r: &MatchRecord) {
        let kd = count_ratio(r.kills(), r.deaths());
        let accuracy = percentage(r.hits(), r.shots());
        let skill = r.skill();

        if let Some(at) = r.at() {
            self.skill.push(Point { at, value: skill });
            self.kd.push(Point { at, value: kd });
            self.accuracy.push(Point { at, value: accuracy });
            self.headshot_ratio.push(Point { at, value: count_ratio(r.headshots(), r.kills()) });
        }

        self.damage.push(DamagePoint { taken: r.damage_taken(), done: r.damage_done(), won: r.is_win() });
        self.accuracy_values.push(accuracy);
        self.kd_values.push(kd);
        self.skill_values.push(skill);
    }
}

pub fn series<'a, I>(records: I) -> Series
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut out = Series::default();
    for r in records {
        out.push(r);
    }
    out
}
