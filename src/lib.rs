// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod normalize;
pub mod record;
pub mod data;
pub mod filter;
pub mod store;
pub mod aggregate;
pub mod report;

#[cfg(feature = "cli")]
pub mod cli;

pub use data::{Dataset, FilterOptions};
pub use error::{ConfigError, ExtractError};
pub use filter::{filter, FilterSpec, MatchView};
pub use record::{MatchRecord, Timestamp, Value};
pub use report::Report;
pub use specs::SectionSpec;
pub use store::DatasetStore;
