use serde::{Deserialize, Serialize};

use super::enums::{AppView, Severity};

/// Which part of the inference table produced an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBasis {
    /// A critical single-symptom entry that wins over any co-selected symptoms.
    Override,
    /// Exact match on the full symptom combination.
    Combination,
    /// Nothing matched; generic guidance.
    Fallback,
}

/// Result of one classification call. Held as the "last assessment" until overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub severity: Severity,
    pub summary: String,
    pub condition_type: Option<String>,
    pub advice: Option<String>,
    pub basis: MatchBasis,
}

/// What `complete_assessment` did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub assessment: Assessment,
    /// True when the assessment forced navigation to the chat view.
    pub escalated: bool,
    pub current_view: AppView,
}
