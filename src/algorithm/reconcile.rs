//! Diagnosis reconciliation
//!
//! Merges the database and spreadsheet diagnosis sequences into one set
//! with at most one record per ICD-10 code. Database records win when both
//! sources carry a code; an empty database sequence falls back to the
//! sheet sequence wholesale.

use rustc_hash::FxHashSet;

use crate::anomaly::Anomalies;
use crate::models::diagnosis::DiagnosisRecord;

/// Merge the two diagnosis sources, database first.
///
/// The result preserves insertion order and holds at most one record per
/// code. When the database sequence is empty the sheet sequence is
/// promoted to primary (counted as a source fallback, not an error). Both
/// sources empty is a valid terminal state: an empty set.
#[must_use]
pub fn reconcile(
    db: Vec<DiagnosisRecord>,
    sheet: Vec<DiagnosisRecord>,
    anomalies: &mut Anomalies,
) -> Vec<DiagnosisRecord> {
    if db.is_empty() && !sheet.is_empty() {
        anomalies.note_source_fallback();
    }

    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut merged = Vec::with_capacity(db.len() + sheet.len());

    for record in db.into_iter().chain(sheet) {
        if seen.insert(record.code.clone()) {
            merged.push(record);
        }
    }

    merged
}

/// Append accepted inference candidates to a reconciled set, skipping any
/// whose code is already present. Records are appended as given; selection
/// state is not touched.
pub fn merge_candidates(reconciled: &mut Vec<DiagnosisRecord>, accepted: Vec<DiagnosisRecord>) {
    let mut seen: FxHashSet<String> =
        reconciled.iter().map(|record| record.code.clone()).collect();
    for record in accepted {
        if seen.insert(record.code.clone()) {
            reconciled.push(record);
        }
    }
}
