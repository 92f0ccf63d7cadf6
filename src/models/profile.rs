//! Final clinical profile
//!
//! The aggregate handed to the output collaborator once per session:
//! demographics plus the selected diagnoses, medications, and adverse
//! reactions, grouped the way the persisted record categories are grouped.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::diagnosis::DiagnosisSource;
use crate::models::patient::Sex;

/// Demographics section of the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    /// Canonical 8-digit patient identifier
    pub patient_id: String,
    /// Patient name
    pub name: String,
    /// Research registration number, if enrolled
    pub research_id: Option<String>,
    /// Age in whole years, when derivable
    pub age: Option<u32>,
    /// Recorded sex
    pub sex: Sex,
}

/// One diagnosis row in the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisEntry {
    /// ICD-10 code
    pub code: String,
    /// Condition name
    pub name: String,
    /// Which source the reconciled record came from
    pub source: DiagnosisSource,
}

/// One medication row in the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationEntry {
    /// Canonical drug code
    pub code: String,
    /// Product name
    pub name: String,
    /// Active ingredient name
    pub ingredient: String,
    /// Comma-joined ATC codes, `unmapped` when none resolved
    pub atc: String,
}

/// One adverse reaction row in the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdrEntry {
    /// Combined display label
    pub label: String,
}

/// The assembled single-patient profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalProfile {
    /// Demographics section
    pub demographics: Demographics,
    /// Selected diagnoses, reconciliation order
    pub diagnosis: Vec<DiagnosisEntry>,
    /// Selected current medications
    pub current_medication: Vec<MedicationEntry>,
    /// Selected newly prescribed medications
    pub new_medication: Vec<MedicationEntry>,
    /// Selected adverse reactions
    pub adr: Vec<AdrEntry>,
}

impl ClinicalProfile {
    /// Render the legacy export shape consumed by the downstream sheet
    /// uploader (`age`/`gender`/`comorbidities`/`currentMedication`/
    /// `newPrescriptions`/`adrs`).
    #[must_use]
    pub fn to_export_json(&self) -> serde_json::Value {
        let comorbidities: Vec<_> = self
            .diagnosis
            .iter()
            .map(|d| {
                json!({
                    "diagnosisType": "ICD10",
                    "diagnosisCode": d.code,
                    "diagnosisName": d.name,
                })
            })
            .collect();

        let medication_entries = |entries: &[MedicationEntry]| -> Vec<serde_json::Value> {
            entries
                .iter()
                .map(|m| {
                    json!({
                        "kdCode": m.code,
                        "kdName": m.name,
                        "atcCode": m.atc,
                    })
                })
                .collect()
        };

        let adrs: Vec<_> = self
            .adr
            .iter()
            .map(|a| json!({ "description": a.label }))
            .collect();

        json!({
            "age": self.demographics.age,
            "gender": self.demographics.sex.as_word(),
            "comorbidities": comorbidities,
            "currentMedication": medication_entries(&self.current_medication),
            "newPrescriptions": medication_entries(&self.new_medication),
            "adrs": adrs,
        })
    }
}
