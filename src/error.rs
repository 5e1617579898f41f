// src/error.rs
use std::io;
use thiserror::Error;

/// Structural failures while locating a match table. Fatal for the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("[{key}] could not find a <{tag}> heading \"{heading}\" preceded by \"{sibling}\"")]
    SectionNotFound {
        key: String,
        tag: String,
        heading: String,
        sibling: String,
    },

    #[error("[{key}] heading \"{heading}\" is not followed by a table (found {found})")]
    TableNotFound {
        key: String,
        heading: String,
        found: String,
    },

    #[error("[{key}] section key listed more than once")]
    DuplicateKey { key: String },
}

impl ExtractError {
    /// Dataset key of the section that failed.
    pub fn key(&self) -> &str {
        match self {
            ExtractError::SectionNotFound { key, .. }
            | ExtractError::TableNotFound { key, .. }
            | ExtractError::DuplicateKey { key } => key,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read options file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid options file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid options: {0}")]
    Invalid(String),
}
