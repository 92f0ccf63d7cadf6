//! Diagnosis row ingestion
//!
//! Two shapes arrive here: database rows (already mapped SNOMED→ICD-10 by
//! the collaborator's query, pre-filtered to the patient) and spreadsheet
//! fallback rows (patient column present, code plus optional name).

use rustc_hash::FxHashSet;

use crate::anomaly::Anomalies;
use crate::config::ReconConfig;
use crate::models::diagnosis::{DiagnosisRecord, DiagnosisSource};
use crate::source::row::{SourceRow, rows_for_patient};

/// Header aliases for the ICD-10 code column
const CODE_FIELDS: [&str; 2] = ["diagnosis_code", "condition_source_value"];
/// Header aliases for the condition name column
const NAME_FIELDS: [&str; 2] = ["name", "concept_name"];
/// Fallback column the legacy sheet stored the name under
const NAME_FALLBACK: &str = "condition_source_concept_id";
/// Original source-vocabulary value, when the database query carries it
const ORIGIN_FIELDS: [&str; 2] = ["origin_code", "source_value_original"];

fn record_from_row(row: &SourceRow, source: DiagnosisSource) -> Option<DiagnosisRecord> {
    let code = row.get_any(&CODE_FIELDS)?;
    let name = row
        .get_any(&NAME_FIELDS)
        .or_else(|| row.get(NAME_FALLBACK))
        .unwrap_or_default();
    let mut record = DiagnosisRecord::new(code, name, source);
    if let Some(origin) = row.get_any(&ORIGIN_FIELDS) {
        record = record.with_origin_code(origin);
    }
    Some(record)
}

/// Type the database diagnosis rows, deduplicating on (code, name) the way
/// the upstream query's DISTINCT did.
pub fn db_diagnoses_from_rows(rows: &[SourceRow], anomalies: &mut Anomalies) -> Vec<DiagnosisRecord> {
    let mut seen: FxHashSet<(String, String)> = FxHashSet::default();
    let mut records = Vec::new();

    for row in rows {
        let Some(record) = record_from_row(row, DiagnosisSource::Database) else {
            anomalies.note_skipped_row("database diagnosis", "missing diagnosis code");
            continue;
        };
        if seen.insert((record.code.clone(), record.name.clone())) {
            records.push(record);
        }
    }

    records
}

/// Type the spreadsheet diagnosis rows for patient `pid`, deduplicating on
/// code alone.
pub fn sheet_diagnoses_from_rows(
    rows: &[SourceRow],
    pid: &str,
    config: &ReconConfig,
    anomalies: &mut Anomalies,
) -> Vec<DiagnosisRecord> {
    let matched = rows_for_patient(rows, pid, "sheet diagnosis", config, anomalies);
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut records = Vec::new();

    for row in matched {
        let Some(record) = record_from_row(row, DiagnosisSource::Sheet) else {
            anomalies.note_skipped_row("sheet diagnosis", "missing diagnosis code");
            continue;
        };
        if seen.insert(record.code.clone()) {
            records.push(record);
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_rows_dedup_on_code_and_name() {
        let rows = vec![
            [
                ("condition_source_value", "I10.0"),
                ("concept_name", "Essential hypertension"),
                ("source_value_original", "59621000"),
            ]
            .into_iter()
            .collect::<SourceRow>(),
            [
                ("condition_source_value", "I10.0"),
                ("concept_name", "Essential hypertension"),
            ]
            .into_iter()
            .collect(),
            [("concept_name", "no code")].into_iter().collect(),
        ];
        let mut anomalies = Anomalies::new();
        let records = db_diagnoses_from_rows(&rows, &mut anomalies);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "I10.0");
        assert_eq!(records[0].source, DiagnosisSource::Database);
        assert_eq!(records[0].origin_code.as_deref(), Some("59621000"));
        assert_eq!(anomalies.skipped_rows, 1);
    }

    #[test]
    fn test_name_falls_back_to_legacy_column() {
        let rows = vec![
            [
                ("diagnosis_code", "E11"),
                ("condition_source_concept_id", "Type 2 diabetes mellitus"),
            ]
            .into_iter()
            .collect::<SourceRow>(),
        ];
        let mut anomalies = Anomalies::new();
        let records = db_diagnoses_from_rows(&rows, &mut anomalies);
        assert_eq!(records[0].name, "Type 2 diabetes mellitus");
    }

    #[test]
    fn test_sheet_rows_filter_patient_and_dedup_code() {
        let rows = vec![
            [
                ("hospital_id", "12345"),
                ("diagnosis_code", "E78.5"),
                ("name", "Dyslipidemia"),
            ]
            .into_iter()
            .collect::<SourceRow>(),
            [("hospital_id", "12345"), ("diagnosis_code", "E78.5")]
                .into_iter()
                .collect(),
            [("hospital_id", "99999"), ("diagnosis_code", "I10.0")]
                .into_iter()
                .collect(),
        ];
        let mut anomalies = Anomalies::new();
        let records = sheet_diagnoses_from_rows(
            &rows,
            "00012345",
            &ReconConfig::default(),
            &mut anomalies,
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "E78.5");
        assert_eq!(records[0].source, DiagnosisSource::Sheet);
    }
}
