//! Configuration for the reconciliation engine.

/// Configuration for a reconciliation run
#[derive(Debug, Clone)]
pub struct ReconConfig {
    /// Canonical width of drug product codes (zero-padded)
    pub drug_code_width: usize,
    /// Canonical width of patient identifiers (zero-padded)
    pub patient_id_width: usize,
    /// Fraction of the observed prescription span a drug's supplied days
    /// must reach to count as current medication
    pub current_fraction: f64,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            drug_code_width: 9,
            patient_id_width: 8,
            current_fraction: 1.0 / 3.0,
        }
    }
}
