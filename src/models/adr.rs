//! Adverse drug reaction entity model

use serde::{Deserialize, Serialize};

/// One adverse drug reaction entry for the active patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdrRecord {
    /// Display label: annotation plus action plan when both are present
    pub label: String,
    /// Reaction annotation as recorded
    pub annotation: Option<String>,
    /// Action plan for tolerable drugs, when recorded
    pub action_plan: Option<String>,
    /// Current status of the reaction
    pub status: Option<String>,
    /// Reaction type
    pub reaction_type: Option<String>,
    /// Assessed severity
    pub severity: Option<String>,
    /// Assessed causality
    pub causality: Option<String>,
    /// Reviewer's expert opinion
    pub expert_opinion: Option<String>,
    /// Selection state, owned by the calling workflow
    pub selected: bool,
}

impl AdrRecord {
    /// Create an unselected entry from annotation and action plan,
    /// combining them into the display label the way the export expects
    #[must_use]
    pub fn new(annotation: Option<String>, action_plan: Option<String>) -> Self {
        let label = combined_label(annotation.as_deref(), action_plan.as_deref());
        Self {
            label,
            annotation,
            action_plan,
            status: None,
            reaction_type: None,
            severity: None,
            causality: None,
            expert_opinion: None,
            selected: false,
        }
    }
}

/// Combine annotation and action plan into one display label
#[must_use]
fn combined_label(annotation: Option<&str>, action_plan: Option<&str>) -> String {
    match (
        annotation.map(str::trim).filter(|s| !s.is_empty()),
        action_plan.map(str::trim).filter(|s| !s.is_empty()),
    ) {
        (Some(ann), Some(plan)) => format!("{ann} ({plan})"),
        (Some(ann), None) => ann.to_string(),
        (None, _) => "null".to_string(),
    }
}
