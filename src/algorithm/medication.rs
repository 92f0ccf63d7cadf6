//! Medication preprocessing
//!
//! Aggregates validated prescription rows into per-drug medication records:
//! dosing span, supplied-day totals, episode counts, ATC classification via
//! the lookup collaborator, and the current / newly-prescribed partition.

use chrono::NaiveDate;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::anomaly::Anomalies;
use crate::config::ReconConfig;
use crate::error::Result;
use crate::lookup::ClassificationLookup;
use crate::models::medication::{Classification, MedicationRecord};
use crate::source::medication::PrescriptionRow;

/// The preprocessed, partitioned medication sets for one patient
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicationSets {
    /// Drug groups whose supplied days reach the configured fraction of
    /// the observed prescription span
    pub current: Vec<MedicationRecord>,
    /// The remaining drug groups, bucketable by latest prescription date
    pub new: Vec<MedicationRecord>,
    /// Days between the patient's earliest and latest prescription dates,
    /// `None` when no row carried a date
    pub span_days: Option<i64>,
}

impl MedicationSets {
    /// Whether preprocessing produced no medication groups at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.new.is_empty()
    }

    /// Deduplicated, comma-joined ATC codes of the current medications.
    /// Unmapped groups contribute nothing. Input shape for comorbidity
    /// inference; code order carries no meaning.
    #[must_use]
    pub fn current_atc_string(&self) -> String {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        self.current
            .iter()
            .flat_map(|record| record.classification.codes())
            .filter(|code| seen.insert(code.as_str()))
            .join(",")
    }

    /// Move the newly prescribed group for `drug_code` into the current
    /// set. This is the reviewer's explicit override of the threshold
    /// partition; the promoted group feeds comorbidity inference like any
    /// other current medication. Returns whether a group moved.
    pub fn promote_to_current(&mut self, drug_code: &str) -> bool {
        match self.new.iter().position(|record| record.drug_code == drug_code) {
            Some(pos) => {
                let record = self.new.remove(pos);
                self.current.push(record);
                true
            }
            None => false,
        }
    }

    /// Newly prescribed groups whose latest prescription fell on `date`
    #[must_use]
    pub fn new_on(&self, date: NaiveDate) -> Vec<&MedicationRecord> {
        self.new
            .iter()
            .filter(|record| record.last_date == Some(date))
            .collect()
    }

    /// Distinct prescription dates across the newly prescribed groups,
    /// sorted ascending, for date-bucketed review
    #[must_use]
    pub fn new_prescription_dates(&self) -> Vec<NaiveDate> {
        self.new
            .iter()
            .filter_map(|record| record.last_date)
            .sorted()
            .dedup()
            .collect()
    }
}

/// Aggregate prescription rows into partitioned medication records.
///
/// Rows are grouped by canonical drug code (first-seen order preserved).
/// Lookup misses mark the group `Unmapped` and count an anomaly; lookup
/// failures abort with [`crate::error::ReconError::Lookup`]. Empty input
/// yields empty sets.
pub fn preprocess(
    rows: &[PrescriptionRow],
    lookup: &dyn ClassificationLookup,
    config: &ReconConfig,
    anomalies: &mut Anomalies,
) -> Result<MedicationSets> {
    if rows.is_empty() {
        return Ok(MedicationSets::default());
    }

    let span_days = prescription_span(rows);

    // Group by drug code, preserving the order codes first appear in
    let mut order: Vec<String> = Vec::new();
    let mut groups: FxHashMap<String, MedicationRecord> = FxHashMap::default();

    for row in rows {
        let key = row.group_key().to_string();
        let record = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            let mut record = MedicationRecord::new(row.group_key());
            record.code_valid = row.code.is_valid();
            record
        });

        record.episodes += 1;
        record.supplied_days += row.days_supplied.unwrap_or(0);
        if record.product_name.is_empty() {
            record.product_name = row.product_name.clone();
        }
        if record.ingredient_name.is_empty() {
            record.ingredient_name = row.ingredient_name.clone();
        }
        if let Some(date) = row.date {
            record.first_date = Some(record.first_date.map_or(date, |d| d.min(date)));
            record.last_date = Some(record.last_date.map_or(date, |d| d.max(date)));
        }
    }

    // Resolve classifications and partition
    let threshold = span_days.unwrap_or(0) as f64 * config.current_fraction;
    let mut sets = MedicationSets {
        span_days,
        ..MedicationSets::default()
    };

    for key in order {
        let mut record = groups.remove(&key).unwrap_or_else(|| MedicationRecord::new(&key));

        record.duration_days = match (record.first_date, record.last_date) {
            (Some(first), Some(last)) => Some((last - first).num_days()),
            _ => None,
        };

        record.classification = if record.code_valid {
            let codes = lookup.atc_codes(&record.drug_code)?;
            if codes.is_empty() {
                anomalies.note_unmapped_drug(&record.drug_code);
                Classification::Unmapped
            } else {
                Classification::Atc(codes)
            }
        } else {
            // Already counted as an invalid code at ingestion
            Classification::Unmapped
        };

        if record.supplied_days as f64 >= threshold {
            sets.current.push(record);
        } else {
            sets.new.push(record);
        }
    }

    Ok(sets)
}

/// Days between the earliest and latest dated rows, `None` without dates
fn prescription_span(rows: &[PrescriptionRow]) -> Option<i64> {
    let dates: Vec<NaiveDate> = rows.iter().filter_map(|row| row.date).collect();
    let first = dates.iter().min()?;
    let last = dates.iter().max()?;
    Some((*last - *first).num_days())
}
