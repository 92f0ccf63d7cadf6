//! Loosely-typed source rows
//!
//! The transport collaborators (spreadsheet reader, database query layer)
//! hand the engine rows as order-irrelevant field maps. `SourceRow` is that
//! boundary representation; the per-source deserializers turn it into typed
//! records and everything past them works on typed data only.

use rustc_hash::FxHashMap;

use crate::algorithm::normalize::{NormalizedCode, normalize_code};
use crate::anomaly::Anomalies;
use crate::config::ReconConfig;

/// Header aliases accepted for the patient identifier column
pub const PATIENT_ID_FIELDS: [&str; 2] = ["patient_id", "hospital_id"];

/// One raw row from a tabular source, keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    fields: FxHashMap<String, String>,
}

impl SourceRow {
    /// Create an empty row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous value
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Trimmed field value; `None` when the column is absent or blank
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// First present value among aliased column names
    #[must_use]
    pub fn get_any(&self, fields: &[&str]) -> Option<&str> {
        fields.iter().find_map(|f| self.get(f))
    }

    /// The patient identifier in canonical zero-padded form
    #[must_use]
    pub fn patient_id(&self, config: &ReconConfig) -> NormalizedCode {
        match self.get_any(&PATIENT_ID_FIELDS) {
            Some(raw) => normalize_code(raw, config.patient_id_width),
            None => NormalizedCode::Invalid,
        }
    }

    /// Whether this row belongs to the patient with canonical id `pid`
    #[must_use]
    pub fn matches_patient(&self, pid: &str, config: &ReconConfig) -> bool {
        self.patient_id(config).as_str() == Some(pid)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SourceRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (field, value) in iter {
            row.set(field, value);
        }
        row
    }
}

/// Keep only rows that belong to the patient, counting mismatches of the
/// identifier column itself (rows for other patients are dropped silently,
/// like any filter).
pub fn rows_for_patient<'a>(
    rows: &'a [SourceRow],
    pid: &str,
    context: &str,
    config: &ReconConfig,
    anomalies: &mut Anomalies,
) -> Vec<&'a SourceRow> {
    let mut matched = Vec::new();
    for row in rows {
        match row.patient_id(config) {
            NormalizedCode::Valid(code) if code == pid => matched.push(row),
            NormalizedCode::Valid(_) => {}
            NormalizedCode::Invalid => {
                anomalies.note_skipped_row(context, "missing or malformed patient identifier");
            }
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_trims_and_drops_blanks() {
        let row: SourceRow = [("drug_code", " 1234 "), ("product_name", "  ")]
            .into_iter()
            .collect();
        assert_eq!(row.get("drug_code"), Some("1234"));
        assert_eq!(row.get("product_name"), None);
        assert_eq!(row.get("absent"), None);
    }

    #[test]
    fn test_patient_id_accepts_aliases() {
        let config = ReconConfig::default();
        let row: SourceRow = [("hospital_id", "12345")].into_iter().collect();
        assert_eq!(
            row.patient_id(&config),
            NormalizedCode::Valid("00012345".to_string())
        );
        assert!(row.matches_patient("00012345", &config));
    }

    #[test]
    fn test_rows_for_patient_filters_and_counts() {
        let config = ReconConfig::default();
        let rows = vec![
            [("patient_id", "12345")].into_iter().collect::<SourceRow>(),
            [("patient_id", "99999")].into_iter().collect(),
            [("patient_id", "not-a-number")].into_iter().collect(),
            [("other_column", "x")].into_iter().collect(),
        ];
        let mut anomalies = Anomalies::new();
        let matched = rows_for_patient(&rows, "00012345", "test", &config, &mut anomalies);
        assert_eq!(matched.len(), 1);
        // Only the rows without a usable identifier are counted
        assert_eq!(anomalies.skipped_rows, 2);
    }
}
