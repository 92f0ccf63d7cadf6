//! Demographics ingestion
//!
//! Builds the [`Patient`] for the run from the demographics sheet rows,
//! keeping only the row matching the requested identifier.

use chrono::NaiveDate;

use crate::anomaly::Anomalies;
use crate::config::ReconConfig;
use crate::models::patient::{Patient, Sex, age_at, parse_birth_date};
use crate::source::row::{SourceRow, rows_for_patient};

/// Column names read from the demographics source
const FIELD_NAME: &str = "name";
const FIELD_RESEARCH_ID: &str = "research_id";
const FIELD_BIRTH_DATE: &str = "birth_date";
const FIELD_AGE: &str = "age";
const FIELD_SEX: &str = "sex";

/// Load the patient matching `pid` from demographics rows.
///
/// Returns `None` when no row matches; extra matching rows beyond the first
/// are ignored. Age comes from the birth date when parseable, otherwise
/// from an explicit `age` column.
pub fn patient_from_rows(
    rows: &[SourceRow],
    pid: &str,
    today: NaiveDate,
    config: &ReconConfig,
    anomalies: &mut Anomalies,
) -> Option<Patient> {
    let matched = rows_for_patient(rows, pid, "demographics", config, anomalies);
    let row = matched.first()?;

    let mut patient = Patient::new(pid);
    patient.name = row.get(FIELD_NAME).unwrap_or_default().to_string();
    patient.research_id = row.get(FIELD_RESEARCH_ID).map(str::to_string);
    patient.sex = row.get(FIELD_SEX).map_or(Sex::Unknown, Sex::from_code);

    if let Some(birth_date) = row.get(FIELD_BIRTH_DATE).and_then(parse_birth_date) {
        patient.birth_date = Some(birth_date);
        patient.age = Some(age_at(birth_date, today));
    } else {
        patient.age = row.get(FIELD_AGE).and_then(|v| v.parse().ok());
    }

    Some(patient)
}
