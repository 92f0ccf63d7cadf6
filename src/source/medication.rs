//! Medication row ingestion
//!
//! Turns raw prescription rows into typed [`PrescriptionRow`]s for the
//! preprocessing algorithm: canonicalizes the drug code, parses the
//! prescription date and days-supplied, and filters to the active patient.

use chrono::NaiveDate;

use crate::algorithm::normalize::{NormalizedCode, normalize_code};
use crate::anomaly::Anomalies;
use crate::config::ReconConfig;
use crate::source::row::{SourceRow, rows_for_patient};

const FIELD_DRUG_CODE: &str = "drug_code";
const FIELD_DATE: &str = "prescription_date";
const FIELD_DAYS: &str = "days_supplied";
const FIELD_PRODUCT: &str = "product_name";
const FIELD_INGREDIENT: &str = "ingredient_name";

/// One validated prescription row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionRow {
    /// Drug code as supplied
    pub raw_code: String,
    /// Canonical drug code, or the sentinel when not coercible
    pub code: NormalizedCode,
    /// Prescription (dispensing) date, `None` when absent or unparseable
    pub date: Option<NaiveDate>,
    /// Days supplied by this prescription
    pub days_supplied: Option<i64>,
    /// Product name as supplied
    pub product_name: String,
    /// Active ingredient name as supplied
    pub ingredient_name: String,
}

impl PrescriptionRow {
    /// Grouping key: the canonical code when valid, the raw value otherwise
    /// so malformed codes stay visible as their own group.
    #[must_use]
    pub fn group_key(&self) -> &str {
        self.code.as_str().unwrap_or(&self.raw_code)
    }
}

/// Prescription dates arrive as `%Y%m%d` from the sheet export, `%Y-%m-%d`
/// once anything has round-tripped through the database.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

/// Validate and type the medication rows belonging to patient `pid`.
///
/// Rows without a drug code are dropped and counted. Codes that fail
/// canonicalization are kept with the sentinel (counted); missing dates and
/// day counts are kept as `None`.
pub fn prescriptions_from_rows(
    rows: &[SourceRow],
    pid: &str,
    config: &ReconConfig,
    anomalies: &mut Anomalies,
) -> Vec<PrescriptionRow> {
    let matched = rows_for_patient(rows, pid, "medication", config, anomalies);
    let mut prescriptions = Vec::with_capacity(matched.len());

    for row in matched {
        let Some(raw_code) = row.get(FIELD_DRUG_CODE) else {
            anomalies.note_skipped_row("medication", "missing drug code");
            continue;
        };

        let code = normalize_code(raw_code, config.drug_code_width);
        if !code.is_valid() {
            anomalies.note_invalid_code(raw_code);
        }

        prescriptions.push(PrescriptionRow {
            raw_code: raw_code.to_string(),
            code,
            date: row.get(FIELD_DATE).and_then(parse_date),
            days_supplied: row.get(FIELD_DAYS).and_then(|v| v.parse().ok()),
            product_name: row.get(FIELD_PRODUCT).unwrap_or_default().to_string(),
            ingredient_name: row.get(FIELD_INGREDIENT).unwrap_or_default().to_string(),
        });
    }

    prescriptions
}
