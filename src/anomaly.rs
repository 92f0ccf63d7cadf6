//! Tally of absorbed per-record anomalies.
//!
//! The engine never aborts a batch for a malformed record; it annotates or
//! excludes the record, logs the event, and counts it here so the calling
//! workflow can surface the totals to a human reviewer.

use log::{debug, warn};

/// Counters for anomalies absorbed during a reconciliation run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Anomalies {
    /// Codes that could not be coerced to canonical form
    pub invalid_codes: usize,
    /// Drug codes with no classification mapping
    pub unmapped_drugs: usize,
    /// Source rows dropped for missing required fields
    pub skipped_rows: usize,
    /// Times the diagnosis merge fell back to the sheet source
    pub source_fallbacks: usize,
}

impl Anomalies {
    /// Create an empty tally
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a code that failed canonicalization
    pub fn note_invalid_code(&mut self, raw: &str) {
        warn!("code {raw:?} is not coercible to canonical form, marked invalid");
        self.invalid_codes += 1;
    }

    /// Record a drug code with no classification mapping
    pub fn note_unmapped_drug(&mut self, code: &str) {
        debug!("no classification mapping for drug code {code}, marked unmapped");
        self.unmapped_drugs += 1;
    }

    /// Record a source row dropped at the ingestion boundary
    pub fn note_skipped_row(&mut self, context: &str, reason: &str) {
        warn!("skipping {context} row: {reason}");
        self.skipped_rows += 1;
    }

    /// Record a fallback from the database source to the sheet source
    pub fn note_source_fallback(&mut self) {
        warn!("database diagnosis source empty, falling back to sheet source");
        self.source_fallbacks += 1;
    }

    /// Total number of absorbed anomalies
    #[must_use]
    pub const fn total(&self) -> usize {
        self.invalid_codes + self.unmapped_drugs + self.skipped_rows + self.source_fallbacks
    }
}
