//! Comorbidity inference
//!
//! Rule-based suggestion of likely but unrecorded diagnoses from the
//! current medications' ATC codes. A deterministic, side-effect-free
//! function of (classification codes, existing diagnosis codes, rule
//! table); candidates come out in rule-table order, unselected, and are
//! only ever dropped when the target code is already present.

pub mod rules;

use rustc_hash::FxHashSet;

use crate::models::diagnosis::{DiagnosisRecord, DiagnosisSource};
use crate::models::medication::MedicationRecord;
pub use rules::{ComorbidityRule, default_rules};

/// A suggested diagnosis plus the medication evidence that triggered it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComorbidityCandidate {
    /// The suggested diagnosis, source `Inferred`, unselected
    pub diagnosis: DiagnosisRecord,
    /// Product name of the first medication that matched the rule
    pub trigger_drug: String,
    /// The ATC code that matched the rule's prefix
    pub trigger_atc: String,
}

/// Infer comorbidity candidates from the current medication set.
///
/// For each rule, in table order, every ATC code of every current
/// medication is prefix-tested; the first match yields one candidate,
/// unless the rule's target code already appears in `existing`. A single
/// ATC code matching several rules yields one candidate per rule.
#[must_use]
pub fn infer_comorbidities(
    current: &[MedicationRecord],
    existing: &[DiagnosisRecord],
    rules: &[ComorbidityRule],
) -> Vec<ComorbidityCandidate> {
    let existing_codes: FxHashSet<&str> =
        existing.iter().map(|record| record.code.as_str()).collect();

    let mut candidates = Vec::new();
    for rule in rules {
        if existing_codes.contains(rule.icd10_code.as_str()) {
            continue;
        }

        let trigger = current.iter().find_map(|record| {
            record
                .classification
                .codes()
                .iter()
                .find(|code| rule.matches(code))
                .map(|code| (record.product_name.clone(), code.clone()))
        });

        if let Some((trigger_drug, trigger_atc)) = trigger {
            candidates.push(ComorbidityCandidate {
                diagnosis: DiagnosisRecord::new(
                    &rule.icd10_code,
                    &rule.icd10_name,
                    DiagnosisSource::Inferred,
                ),
                trigger_drug,
                trigger_atc,
            });
        }
    }

    candidates
}

/// String-shaped variant over the concatenated classification string
/// produced by medication preprocessing. Same semantics, same order.
#[must_use]
pub fn infer_from_classification_string(
    atc_string: &str,
    existing_codes: &FxHashSet<String>,
    rules: &[ComorbidityRule],
) -> Vec<DiagnosisRecord> {
    let atc_codes: Vec<&str> = atc_string
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .collect();

    let mut candidates = Vec::new();
    for rule in rules {
        if existing_codes.contains(rule.icd10_code.as_str()) {
            continue;
        }
        if atc_codes.iter().any(|code| rule.matches(code)) {
            candidates.push(DiagnosisRecord::new(
                &rule.icd10_code,
                &rule.icd10_name,
                DiagnosisSource::Inferred,
            ));
        }
    }

    candidates
}
