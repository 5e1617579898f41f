// src/report.rs
use serde::Serialize;

use crate::aggregate::{self, Buckets, FilteredSummary, LifetimeSummary, Series};
use crate::data::{Dataset, FilterOptions};
use crate::filter::FilterSpec;

/// Everything a dashboard shows for one dataset under one filter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub key: String,
    pub options: FilterOptions,
    pub lifetime: LifetimeSummary,
    pub filtered: FilteredSummary,
    pub buckets: Buckets,
    pub series: Series,
}

impl Report {
    pub fn build(ds: &Dataset, spec: &FilterSpec) -> Self {
        let view = ds.filter(spec);
        logd!("[{}] {} of {} match(es) in view", ds.key(), view.len(), ds.len());

        Self {
            key: s!(ds.key()),
            options: ds.options().clone(),
            lifetime: aggregate::lifetime(ds.records()),
            filtered: aggregate::filtered(view.iter()),
            buckets: aggregate::buckets(view.iter()),
            series: aggregate::series(view.iter()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::RawRecord;
    use crate::record::MatchRecord;

    fn dataset() -> Dataset {
        let rows: [[&str; 5]; 3] = [
            ["Ghost", "Skyline", "2024-11-03 21:00:00", "6", "2"],
            ["Adler", "Rewind", "2024-11-04 09:00:00", "1", "3"],
            ["Ghost", "Rewind", "broken", "4", "0"],
        ];
        let records = rows
            .iter()
            .map(|[op, map, at, k, d]| {
                let raw: RawRecord = [
                    ("Operator", *op),
                    ("Game Type", "TDM"),
                    ("Map", *map),
                    ("UTC Timestamp", *at),
                    ("Kills", *k),
                    ("Deaths", *d),
                ]
                .iter()
                .map(|(k, v)| (s!(*k), s!(*v)))
                .collect();
                MatchRecord::from_raw(&raw)
            })
            .collect();
        Dataset::new("bo6", records)
    }

    #[test]
    fn lifetime_ignores_filter() {
        let ds = dataset();
        let spec = ds.select_all().with_operators(["Ghost"]);
        let r = Report::build(&ds, &spec);
        assert_eq!(r.lifetime.matches, 3);
        assert_eq!(r.lifetime.kd, 11.0 / 5.0);
        assert_eq!(r.filtered.matches, 1);
        assert_eq!(r.filtered.kd, 3.0);
        assert_eq!(r.buckets.maps.len(), 1);
    }

    #[test]
    fn empty_view_still_reports() {
        let ds = dataset();
        let r = Report::build(&ds, &FilterSpec::none());
        assert_eq!(r.filtered, FilteredSummary::default());
        assert!(r.series.kd.is_empty());
        assert_eq!(r.options.operators, vec!["Adler", "Ghost"]);
    }

    #[test]
    fn json_has_sections() {
        let ds = dataset();
        let json = Report::build(&ds, &ds.select_all()).to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["key"], "bo6");
        assert_eq!(v["filtered"]["matches"], 2);
        assert!(v["buckets"]["activity"].as_array().is_some_and(|d| d.len() == 7));
    }
}
