//! A Rust library for reconciling a patient's medication and diagnosis
//! records from two partially-overlapping sources (spreadsheet export and
//! clinical database) into a unified clinical profile, with rule-based
//! comorbidity inference from medication history.
//!
//! The engine is synchronous and single-patient: transport (sheet reading,
//! database queries, UI) is owned by the calling layer, which hands in
//! rows as [`source::SourceRow`] field maps and receives a
//! [`models::ClinicalProfile`] back.

pub mod algorithm;
pub mod anomaly;
pub mod assemble;
pub mod config;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod models;
pub mod source;

// Re-export the most common types for easier use
// Core types
pub use anomaly::Anomalies;
pub use config::ReconConfig;
pub use engine::ReconSession;
pub use error::{ReconError, Result};

// Entity models
pub use models::{AdrRecord, ClinicalProfile, DiagnosisRecord, DiagnosisSource, MedicationRecord, Patient};

// Algorithms
pub use algorithm::{
    ComorbidityCandidate, ComorbidityRule, MedicationSets, default_rules, infer_comorbidities,
    normalize_code, preprocess, reconcile,
};

// Collaborator seams
pub use lookup::{ClassificationLookup, MappingTable};
pub use source::SourceRow;
