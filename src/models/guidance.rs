use serde::{Deserialize, Serialize};

/// Self-care bundle shown for a severity level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceBundle {
    pub now: Vec<String>,
    pub avoid: Vec<String>,
    pub meds: Vec<String>,
    pub warnings: Vec<String>,
}

/// Care plan phase for a symptom duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareTimeline {
    pub title: String,
    pub steps: Vec<String>,
    pub warning: Option<String>,
}
