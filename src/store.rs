// src/store.rs
use std::collections::BTreeMap;

use crate::data::Dataset;
use crate::error::ExtractError;
use crate::specs::{self, SectionSpec};

/// Extract and normalize every section of one document.
/// All-or-nothing: the first structural error aborts.
pub fn load_datasets(html_doc: &str, sections: &[SectionSpec]) -> Result<BTreeMap<String, Dataset>, ExtractError> {
    let tables = specs::extract_all(html_doc, sections)?;
    Ok(tables
        .iter()
        .map(|(key, table)| (key.clone(), Dataset::from_table(key, table)))
        .collect())
}

/// Currently loaded datasets, addressed by game key.
/// Datasets are independent; nothing here reaches across keys.
#[derive(Clone, Debug, Default)]
pub struct DatasetStore {
    sets: BTreeMap<String, Dataset>,
}

impl DatasetStore {
    pub fn new() -> Self { Self::default() }

    /// Load a document and replace the datasets for the sections it defines.
    /// On error the store is left exactly as it was. Returns the loaded keys.
    pub fn load_document(&mut self, html_doc: &str, sections: &[SectionSpec]) -> Result<Vec<String>, ExtractError> {
        let loaded = match load_datasets(html_doc, sections) {
            Ok(v) => v,
            Err(e) => {
                logw!("Load failed, keeping {} loaded dataset(s): {e}", self.sets.len());
                return Err(e);
            }
        };

        let keys: Vec<String> = loaded.keys().cloned().collect();
        for (key, ds) in loaded {
            logf!("[{key}] loaded {} match(es)", ds.len());
            self.sets.insert(key, ds);
        }
        Ok(keys)
    }

    /// Add or replace one dataset; returns the previous one for that key.
    pub fn insert(&mut self, ds: Dataset) -> Option<Dataset> {
        self.sets.insert(s!(ds.key()), ds)
    }

    pub fn remove(&mut self, key: &str) -> Option<Dataset> { self.sets.remove(key) }

    pub fn get(&self, key: &str) -> Option<&Dataset> { self.sets.get(key) }

    pub fn keys(&self) -> impl Iterator<Item = &str> { self.sets.keys().map(String::as_str) }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> { self.sets.values() }

    pub fn len(&self) -> usize { self.sets.len() }
    pub fn is_empty(&self) -> bool { self.sets.is_empty() }
}
