//! Collaborator trait for drug classification lookups.
//!
//! The production lookup is a database query owned by the calling layer;
//! the engine only sees this trait. Calls are blocking and may be retried
//! by the caller, never inside the engine.

use rustc_hash::FxHashMap;

use crate::error::Result;

/// Resolves a canonical drug code to its ATC classification codes
pub trait ClassificationLookup {
    /// Return every ATC code mapped to the drug code, empty when unmapped
    fn atc_codes(&self, drug_code: &str) -> Result<Vec<String>>;
}

/// In-memory classification mapping, keyed by canonical drug code
#[derive(Debug, Default, Clone)]
pub struct MappingTable {
    map: FxHashMap<String, Vec<String>>,
}

impl MappingTable {
    /// Create an empty mapping table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the ATC codes for a drug code
    pub fn insert(&mut self, drug_code: impl Into<String>, atc_codes: Vec<String>) {
        self.map.insert(drug_code.into(), atc_codes);
    }

    /// Number of mapped drug codes
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table holds no mappings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl ClassificationLookup for MappingTable {
    fn atc_codes(&self, drug_code: &str) -> Result<Vec<String>> {
        Ok(self.map.get(drug_code).cloned().unwrap_or_default())
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<String>)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (S, Vec<String>)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (code, atc) in iter {
            table.insert(code, atc);
        }
        table
    }
}
