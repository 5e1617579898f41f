// src/specs/mod.rs
//! # Report “specs” module
//!
//! Each spec encodes *where the ground truth lives in the exported HTML* and
//! *how to read it robustly*. Specs only extract: they return raw string
//! tables (`headers` + one `RawRecord` per row).
//!
//! ## What does **not** live here
//! - Typing of fields (see `normalize`).
//! - Holding or replacing loaded datasets (see `store`).
//! - Filtering and statistics (see `filter`, `aggregate`).
//!
//! ## Typical call chain
//! ```text
//! frontend → store::DatasetStore::load_document → specs::match_data::extract_all
//!                                               ↘ data::Dataset::from_table (normalize)
//! ```
//!
//! ## Conventions
//! - Case-insensitive tag matching, whitespace-collapsed text comparison.
//! - Structural misses are typed errors (`ExtractError`), never empty tables.
pub mod match_data;

pub use match_data::{extract_all, RawRecord, RawTable, SectionSpec};
