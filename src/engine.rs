//! Session workflow context
//!
//! `ReconSession` is the explicit mutable context for one single-patient
//! reconciliation run. It owns every record the run produces and the
//! anomaly tally; the algorithms themselves stay pure. Selection flags are
//! toggled only through the session by the calling layer, and inference
//! appends its accepted suggestions unselected.
//!
//! Repeated loads with the same input recompute the same state: nothing is
//! cached across calls and no external resources are held.

use chrono::NaiveDate;
use log::info;

use crate::algorithm::comorbidity::{ComorbidityCandidate, ComorbidityRule, default_rules};
use crate::algorithm::medication::{MedicationSets, preprocess};
use crate::algorithm::normalize::normalize_code;
use crate::algorithm::reconcile::{merge_candidates, reconcile};
use crate::anomaly::Anomalies;
use crate::assemble::assemble_profile;
use crate::config::ReconConfig;
use crate::error::Result;
use crate::lookup::ClassificationLookup;
use crate::models::adr::AdrRecord;
use crate::models::diagnosis::DiagnosisRecord;
use crate::models::patient::Patient;
use crate::models::profile::ClinicalProfile;
use crate::source::adr::adrs_from_rows;
use crate::source::demographics::patient_from_rows;
use crate::source::diagnosis::{db_diagnoses_from_rows, sheet_diagnoses_from_rows};
use crate::source::medication::prescriptions_from_rows;
use crate::source::row::SourceRow;

/// Workflow context for one patient's reconciliation run
#[derive(Debug)]
pub struct ReconSession {
    config: ReconConfig,
    rules: Vec<ComorbidityRule>,
    pid: String,
    /// Demographics, once loaded; editable by the calling layer
    pub patient: Option<Patient>,
    /// Preprocessed medication sets
    pub medications: MedicationSets,
    /// Reconciled diagnosis set
    pub diagnoses: Vec<DiagnosisRecord>,
    /// Adverse reaction entries
    pub adrs: Vec<AdrRecord>,
    /// Absorbed anomalies, for reviewer display
    pub anomalies: Anomalies,
}

impl ReconSession {
    /// Start a session for the patient identified by `patient_id`.
    ///
    /// The identifier is canonicalized up front; a non-coercible value is
    /// kept as given and will fail at [`Self::finalize`].
    #[must_use]
    pub fn new(patient_id: &str, config: ReconConfig) -> Self {
        let pid = normalize_code(patient_id, config.patient_id_width)
            .as_str()
            .map_or_else(|| patient_id.to_string(), str::to_string);
        Self {
            config,
            rules: default_rules(),
            pid,
            patient: None,
            medications: MedicationSets::default(),
            diagnoses: Vec::new(),
            adrs: Vec::new(),
            anomalies: Anomalies::new(),
        }
    }

    /// Replace the default comorbidity rule table
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<ComorbidityRule>) -> Self {
        self.rules = rules;
        self
    }

    /// The canonical patient identifier this session is scoped to
    #[must_use]
    pub fn patient_id(&self) -> &str {
        &self.pid
    }

    /// Load demographics from the patient-list rows
    pub fn load_demographics(&mut self, rows: &[SourceRow], today: NaiveDate) {
        self.patient = patient_from_rows(rows, &self.pid, today, &self.config, &mut self.anomalies);
        if self.patient.is_none() {
            info!("no demographics row found for patient {}", self.pid);
        }
    }

    /// Ingest and preprocess the medication rows
    pub fn load_medications(
        &mut self,
        rows: &[SourceRow],
        lookup: &dyn ClassificationLookup,
    ) -> Result<()> {
        let prescriptions =
            prescriptions_from_rows(rows, &self.pid, &self.config, &mut self.anomalies);
        self.medications = preprocess(&prescriptions, lookup, &self.config, &mut self.anomalies)?;
        info!(
            "medications for {}: {} current, {} new",
            self.pid,
            self.medications.current.len(),
            self.medications.new.len()
        );
        Ok(())
    }

    /// Ingest both diagnosis sources and reconcile them
    pub fn load_diagnoses(&mut self, db_rows: &[SourceRow], sheet_rows: &[SourceRow]) {
        let db = db_diagnoses_from_rows(db_rows, &mut self.anomalies);
        let sheet =
            sheet_diagnoses_from_rows(sheet_rows, &self.pid, &self.config, &mut self.anomalies);
        self.diagnoses = reconcile(db, sheet, &mut self.anomalies);
        info!(
            "reconciled {} diagnoses for {}",
            self.diagnoses.len(),
            self.pid
        );
    }

    /// Ingest the adverse reaction rows
    pub fn load_adrs(&mut self, rows: &[SourceRow]) {
        self.adrs = adrs_from_rows(rows, &self.pid, &self.config, &mut self.anomalies);
    }

    /// Comorbidity candidates for the current medication set
    #[must_use]
    pub fn comorbidity_candidates(&self) -> Vec<ComorbidityCandidate> {
        crate::algorithm::comorbidity::infer_comorbidities(
            &self.medications.current,
            &self.diagnoses,
            &self.rules,
        )
    }

    /// Append reviewer-accepted candidates to the diagnosis set; codes
    /// already present are skipped, appended records stay unselected
    pub fn accept_candidates(&mut self, accepted: Vec<ComorbidityCandidate>) {
        merge_candidates(
            &mut self.diagnoses,
            accepted.into_iter().map(|c| c.diagnosis).collect(),
        );
    }

    /// Set the selection state of the diagnosis with `code`
    pub fn select_diagnosis(&mut self, code: &str, selected: bool) {
        for record in &mut self.diagnoses {
            if record.code == code {
                record.selected = selected;
            }
        }
    }

    /// Set the selection state of a current medication by drug code
    pub fn select_current_medication(&mut self, drug_code: &str, selected: bool) {
        for record in &mut self.medications.current {
            if record.drug_code == drug_code {
                record.selected = selected;
            }
        }
    }

    /// Move a newly prescribed group into the current set, overriding the
    /// threshold partition. The promoted drug's classification then feeds
    /// comorbidity inference. Returns whether a group moved.
    pub fn promote_to_current(&mut self, drug_code: &str) -> bool {
        self.medications.promote_to_current(drug_code)
    }

    /// Set the selection state of a newly prescribed medication
    pub fn select_new_medication(&mut self, drug_code: &str, selected: bool) {
        for record in &mut self.medications.new {
            if record.drug_code == drug_code {
                record.selected = selected;
            }
        }
    }

    /// Set the selection state of the ADR entry at `index`
    pub fn select_adr(&mut self, index: usize, selected: bool) {
        if let Some(record) = self.adrs.get_mut(index) {
            record.selected = selected;
        }
    }

    /// Assemble the final profile from the currently selected records
    pub fn finalize(&self) -> Result<ClinicalProfile> {
        let fallback = Patient::new(&self.pid);
        let patient = self.patient.as_ref().unwrap_or(&fallback);
        assemble_profile(
            patient,
            &self.diagnoses,
            &self.medications.current,
            &self.medications.new,
            &self.adrs,
            &self.config,
        )
    }
}
