//! Diagnosis entity model
//!
//! Diagnosis records carry an ICD-10 code in the target vocabulary plus the
//! source they were reconciled from. Within a reconciled set the code is
//! unique; source precedence is handled by the reconciler, not here.

use serde::{Deserialize, Serialize};

/// Where a reconciled diagnosis record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosisSource {
    /// The structured clinical database (OMOP CDM), pre-mapped to ICD-10
    Database,
    /// The spreadsheet fallback source
    Sheet,
    /// Proposed by the comorbidity inference algorithm
    Inferred,
}

/// A single reconciled diagnosis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    /// ICD-10 diagnosis code
    pub code: String,
    /// Human-readable condition name
    pub name: String,
    /// Which source supplied the record
    pub source: DiagnosisSource,
    /// Original source-vocabulary value, when the database supplied one
    pub origin_code: Option<String>,
    /// Selection state, owned by the calling workflow
    pub selected: bool,
}

impl DiagnosisRecord {
    /// Create an unselected diagnosis record
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, source: DiagnosisSource) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            source,
            origin_code: None,
            selected: false,
        }
    }

    /// Attach the original source-vocabulary code
    #[must_use]
    pub fn with_origin_code(mut self, origin: impl Into<String>) -> Self {
        self.origin_code = Some(origin.into());
        self
    }
}
