// src/config/options.rs
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::consts::*;
use crate::error::ConfigError;
use crate::specs::SectionSpec;

/// Which sections to pull out of a report.
///
/// ```toml
/// [[sections]]
/// key = "bo6"
/// sibling_contains = "Black Ops 6"
///
/// [[sections]]
/// key = "wz"
/// sibling_contains = "Warzone"
/// heading = "Warzone Match Data (reverse chronological)"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionSpec>,
}

fn default_sections() -> Vec<SectionSpec> {
    vec![
        SectionSpec::new(BO6_KEY, BO6_TITLE),
        SectionSpec::new(MW3_KEY, MW3_TITLE),
    ]
}

impl Default for Options {
    fn default() -> Self {
        Self { sections: default_sections() }
    }
}

impl Options {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let opts: Options = toml::from_str(text)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let opts = Self::from_toml_str(&text)?;
        logd!("Loaded {} section(s) from {}", opts.sections.len(), path.display());
        Ok(opts)
    }

    /// Needs at least one section; keys must be non-empty and unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::Invalid(s!("no sections configured")));
        }
        let mut seen = HashSet::new();
        for s in &self.sections {
            if s.key.trim().is_empty() {
                return Err(ConfigError::Invalid(s!("section with empty key")));
            }
            if !seen.insert(s.key.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate section key \"{}\"", s.key)));
            }
        }
        Ok(())
    }

    /// Sections limited to one key, or all of them.
    pub fn sections_for(&self, key: Option<&str>) -> Result<Vec<SectionSpec>, ConfigError> {
        match key {
            None => Ok(self.sections.clone()),
            Some(k) => self
                .sections
                .iter()
                .find(|s| s.key == k)
                .map(|s| vec![s.clone()])
                .ok_or_else(|| ConfigError::Invalid(format!("unknown game key \"{k}\""))),
        }
    }
}
