//! Domain models for the reconciliation engine
//!
//! Entity models owned by a single reconciliation run: the active patient,
//! aggregated medication records, reconciled diagnoses, adverse reactions,
//! and the final assembled profile.

pub mod adr;
pub mod diagnosis;
pub mod medication;
pub mod patient;
pub mod profile;

// Re-export commonly used types
pub use adr::AdrRecord;
pub use diagnosis::{DiagnosisRecord, DiagnosisSource};
pub use medication::{Classification, MedicationRecord};
pub use patient::{Patient, Sex};
pub use profile::ClinicalProfile;
