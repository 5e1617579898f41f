// src/log.rs
// Crate logging macros. They forward to the `log` facade under one target so a
// frontend can filter us with `RUST_LOG=matchstats=debug`. The library never
// installs a logger; the CLI does.

#[doc(hidden)]
pub use ::log as backend;

pub const TARGET: &str = "matchstats";

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::backend::info!(target: $crate::log::TARGET, $($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::backend::debug!(target: $crate::log::TARGET, $($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::backend::warn!(target: $crate::log::TARGET, $($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::backend::error!(target: $crate::log::TARGET, $($arg)*)
    };
}
