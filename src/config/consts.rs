// src/config/consts.rs

// Report layout
pub const MATCH_DATA_HEADING: &str = "Multiplayer Match Data (reverse chronological)";
pub const HEADING_TAG: &str = "h2";

// Game sections
pub const BO6_KEY: &str = "bo6";
pub const BO6_TITLE: &str = "Black Ops 6";
pub const MW3_KEY: &str = "mw3";
pub const MW3_TITLE: &str = "Modern Warfare 3";

// Timestamps (naive forms are read as UTC)
pub const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Outcomes
pub const WIN_TOKEN: &str = "win";
