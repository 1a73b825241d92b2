use serde::{Deserialize, Serialize};

use super::enums::{IllnessType, SymptomCategory};

/// A selectable symptom card. Built once from the static catalog and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub illness_type: IllnessType,
    pub icon: String,
    pub category: SymptomCategory,
}

impl SymptomCard {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        illness_type: IllnessType,
        icon: &str,
        category: SymptomCategory,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            illness_type,
            icon: icon.to_string(),
            category,
        }
    }

    /// Warning cards flag symptoms that need in-person care.
    pub fn is_warning(&self) -> bool {
        self.illness_type == IllnessType::Warning
    }
}
