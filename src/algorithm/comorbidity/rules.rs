//! Comorbidity rule table
//!
//! Static mapping from ATC code prefixes to the ICD-10 diagnosis they
//! suggest. Not patient-specific; the default table covers the three
//! conditions the review workflow screens for, and callers may supply
//! their own.

/// One rule: any ATC code starting with one of the prefixes suggests the
/// diagnosis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComorbidityRule {
    /// Human-readable condition name
    pub name: String,
    /// ATC code prefixes, matched case-sensitively
    pub atc_prefixes: Vec<String>,
    /// Suggested ICD-10 code
    pub icd10_code: String,
    /// Condition name recorded on the suggested diagnosis
    pub icd10_name: String,
}

impl ComorbidityRule {
    /// Build a rule from borrowed parts
    #[must_use]
    pub fn new(name: &str, atc_prefixes: &[&str], icd10_code: &str, icd10_name: &str) -> Self {
        Self {
            name: name.to_string(),
            atc_prefixes: atc_prefixes.iter().map(|p| (*p).to_string()).collect(),
            icd10_code: icd10_code.to_string(),
            icd10_name: icd10_name.to_string(),
        }
    }

    /// Whether the ATC code matches any of the rule's prefixes
    #[must_use]
    pub fn matches(&self, atc_code: &str) -> bool {
        self.atc_prefixes
            .iter()
            .any(|prefix| atc_code.starts_with(prefix.as_str()))
    }
}

/// The default rule table used by the review workflow
#[must_use]
pub fn default_rules() -> Vec<ComorbidityRule> {
    vec![
        ComorbidityRule::new(
            "hypertension",
            &["C02", "C03", "C07", "C08", "C09"],
            "I10.0",
            "Essential (primary) Hypertension",
        ),
        ComorbidityRule::new(
            "diabetes",
            &["A10"],
            "E10.0",
            "Type 2 diabetes mellitus",
        ),
        ComorbidityRule::new("dyslipidemia", &["C10"], "E78.5", "dyslipidemia"),
    ]
}
