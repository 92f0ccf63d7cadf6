//! Adverse reaction row ingestion

use crate::anomaly::Anomalies;
use crate::config::ReconConfig;
use crate::models::adr::AdrRecord;
use crate::source::row::{SourceRow, rows_for_patient};

const FIELD_ANNOTATION: &str = "annotation";
const FIELD_ACTION_PLAN: &str = "action_plan";
const FIELD_STATUS: &str = "status";
const FIELD_TYPE: &str = "reaction_type";
const FIELD_SEVERITY: &str = "severity";
const FIELD_CAUSALITY: &str = "causality";
const FIELD_EXPERT_OPINION: &str = "expert_opinion";

/// Type the ADR rows belonging to patient `pid`. Rows without an
/// annotation are kept (the label falls back to `null`), matching how the
/// review sheet displays them.
pub fn adrs_from_rows(
    rows: &[SourceRow],
    pid: &str,
    config: &ReconConfig,
    anomalies: &mut Anomalies,
) -> Vec<AdrRecord> {
    let matched = rows_for_patient(rows, pid, "adr", config, anomalies);
    matched
        .into_iter()
        .map(|row| {
            let mut record = AdrRecord::new(
                row.get(FIELD_ANNOTATION).map(str::to_string),
                row.get(FIELD_ACTION_PLAN).map(str::to_string),
            );
            record.status = row.get(FIELD_STATUS).map(str::to_string);
            record.reaction_type = row.get(FIELD_TYPE).map(str::to_string);
            record.severity = row.get(FIELD_SEVERITY).map(str::to_string);
            record.causality = row.get(FIELD_CAUSALITY).map(str::to_string);
            record.expert_opinion = row.get(FIELD_EXPERT_OPINION).map(str::to_string);
            record
        })
        .collect()
}
