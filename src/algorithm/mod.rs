//! Reconciliation and inference algorithms
//!
//! Pure, synchronous functions over the typed records produced at the
//! ingestion boundary: code canonicalization, medication preprocessing,
//! two-source diagnosis reconciliation, and comorbidity inference.

pub mod comorbidity;
pub mod medication;
pub mod normalize;
pub mod reconcile;

pub use comorbidity::{ComorbidityCandidate, ComorbidityRule, default_rules, infer_comorbidities};
pub use medication::{MedicationSets, preprocess};
pub use normalize::{NormalizedCode, normalize_code};
pub use reconcile::{merge_candidates, reconcile};
