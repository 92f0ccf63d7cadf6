//! Profile assembly
//!
//! Combines the patient, the selected diagnoses and medications, and the
//! selected adverse reactions into one [`ClinicalProfile`]. All-or-nothing:
//! a missing or malformed patient identifier aborts the call and nothing
//! partial is emitted. Empty sections are valid.

use crate::config::ReconConfig;
use crate::error::{ReconError, Result};
use crate::models::adr::AdrRecord;
use crate::models::diagnosis::DiagnosisRecord;
use crate::models::medication::MedicationRecord;
use crate::models::patient::Patient;
use crate::models::profile::{
    AdrEntry, ClinicalProfile, Demographics, DiagnosisEntry, MedicationEntry,
};

/// Assemble the final profile from the session's records.
///
/// Only records with `selected == true` are included. The patient
/// identifier must be a numeric string of exactly the configured width
/// (8 digits by default); anything else fails with
/// [`ReconError::MissingIdentifier`].
pub fn assemble_profile(
    patient: &Patient,
    diagnoses: &[DiagnosisRecord],
    current: &[MedicationRecord],
    new: &[MedicationRecord],
    adrs: &[AdrRecord],
    config: &ReconConfig,
) -> Result<ClinicalProfile> {
    let id = patient.id.trim();
    if id.len() != config.patient_id_width || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReconError::MissingIdentifier {
            given: patient.id.clone(),
        });
    }

    let medication_entries = |records: &[MedicationRecord]| -> Vec<MedicationEntry> {
        records
            .iter()
            .filter(|record| record.selected)
            .map(|record| MedicationEntry {
                code: record.drug_code.clone(),
                name: record.product_name.clone(),
                ingredient: record.ingredient_name.clone(),
                atc: record.classification.display(),
            })
            .collect()
    };

    Ok(ClinicalProfile {
        demographics: Demographics {
            patient_id: id.to_string(),
            name: patient.name.clone(),
            research_id: patient.research_id.clone(),
            age: patient.age,
            sex: patient.sex,
        },
        diagnosis: diagnoses
            .iter()
            .filter(|record| record.selected)
            .map(|record| DiagnosisEntry {
                code: record.code.clone(),
                name: record.name.clone(),
                source: record.source,
            })
            .collect(),
        current_medication: medication_entries(current),
        new_medication: medication_entries(new),
        adr: adrs
            .iter()
            .filter(|record| record.selected)
            .map(|record| AdrEntry {
                label: record.label.clone(),
            })
            .collect(),
    })
}
