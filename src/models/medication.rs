//! Medication entity model
//!
//! One `MedicationRecord` summarizes every prescription row observed for a
//! drug code within the run: dosing span, supplied-day totals, episode
//! count, and the resolved ATC classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ATC classification resolved for a drug code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// One or more ATC codes mapped to the drug
    Atc(Vec<String>),
    /// No mapping found; excluded from comorbidity inference
    Unmapped,
}

impl Classification {
    /// The mapped ATC codes, empty when unmapped
    #[must_use]
    pub fn codes(&self) -> &[String] {
        match self {
            Self::Atc(codes) => codes,
            Self::Unmapped => &[],
        }
    }

    /// Whether a mapping was found
    #[must_use]
    pub const fn is_mapped(&self) -> bool {
        matches!(self, Self::Atc(_))
    }

    /// Comma-joined display form, `unmapped` when no mapping exists
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Atc(codes) => codes.join(", "),
            Self::Unmapped => "unmapped".to_string(),
        }
    }
}

/// Aggregated prescription history for one drug code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationRecord {
    /// Canonical drug code, or the raw value when canonicalization failed
    pub drug_code: String,
    /// Whether `drug_code` is in canonical form
    pub code_valid: bool,
    /// Product name as supplied
    pub product_name: String,
    /// Active ingredient name as supplied
    pub ingredient_name: String,
    /// Earliest prescription date observed for this drug
    pub first_date: Option<NaiveDate>,
    /// Latest prescription date observed for this drug
    pub last_date: Option<NaiveDate>,
    /// Days between the earliest and latest prescription for the patient,
    /// `None` when no row carried a parseable date
    pub duration_days: Option<i64>,
    /// Total days supplied across all episodes of this drug
    pub supplied_days: i64,
    /// Number of prescription episodes observed
    pub episodes: usize,
    /// Resolved ATC classification
    pub classification: Classification,
    /// Selection state, owned by the calling workflow
    pub selected: bool,
}

impl MedicationRecord {
    /// Create a record for a drug code with everything else empty
    #[must_use]
    pub fn new(drug_code: impl Into<String>) -> Self {
        Self {
            drug_code: drug_code.into(),
            code_valid: true,
            product_name: String::new(),
            ingredient_name: String::new(),
            first_date: None,
            last_date: None,
            duration_days: None,
            supplied_days: 0,
            episodes: 0,
            classification: Classification::Unmapped,
            selected: false,
        }
    }
}
