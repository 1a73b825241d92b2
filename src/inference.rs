//! Condition inference table.
//!
//! Maps symptom combinations to a named condition, severity and advice.
//! Two kinds of rows:
//! - override rows, keyed by one critical symptom, that match whenever that
//!   symptom is selected (e.g. breathlessness always escalates);
//! - combination rows, keyed by the full sorted symptom set, that only match
//!   an exact selection.
//!
//! Overrides are checked first. The table is read-only after construction.

use std::collections::HashMap;

use crate::catalog::{SymptomCatalog, BREATHLESSNESS};
use crate::models::{canonical_key, ConditionEntry, Severity};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InferenceTableError {
    #[error("Condition {condition:?} references unknown symptom {symptom:?}")]
    UnknownSymptom { condition: String, symptom: String },
    #[error("Duplicate condition key: {0}")]
    DuplicateKey(String),
    #[error("Override condition {0:?} must be keyed by exactly one symptom")]
    OverrideNotSingle(String),
    #[error("Condition {0:?} has an empty key")]
    EmptyKey(String),
}

/// Static symptom-combination → condition table.
#[derive(Debug, Clone, Default)]
pub struct ConditionTable {
    /// Critical single-symptom rows, kept sorted by descending severity.
    overrides: Vec<ConditionEntry>,
    combinations: HashMap<String, ConditionEntry>,
}

impl ConditionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The student-health table shipped with the app.
    pub fn standard() -> Self {
        let mut table = Self::new();
        for entry in standard_entries() {
            table.combinations.insert(entry.key.clone(), entry);
        }
        table.overrides.push(ConditionEntry::new(
            &[BREATHLESSNESS],
            "Respiratory Distress",
            Severity::High,
            "Critical sign. Contact campus emergency medical now.",
        ));
        table
    }

    /// Add a combination row. Fails on an empty or already-present key.
    pub fn with_combination(mut self, entry: ConditionEntry) -> Result<Self, InferenceTableError> {
        if entry.key.is_empty() {
            return Err(InferenceTableError::EmptyKey(entry.condition_type));
        }
        if self.has_key(&entry.key) {
            return Err(InferenceTableError::DuplicateKey(entry.key));
        }
        self.combinations.insert(entry.key.clone(), entry);
        Ok(self)
    }

    /// Add a critical single-symptom override row.
    pub fn with_override(mut self, entry: ConditionEntry) -> Result<Self, InferenceTableError> {
        if entry.symptom_ids().count() != 1 {
            return Err(InferenceTableError::OverrideNotSingle(entry.condition_type));
        }
        if self.has_key(&entry.key) {
            return Err(InferenceTableError::DuplicateKey(entry.key));
        }
        self.overrides.push(entry);
        // Stable sort: equal severities keep insertion order.
        self.overrides.sort_by(|a, b| b.severity.cmp(&a.severity));
        Ok(self)
    }

    fn has_key(&self, key: &str) -> bool {
        self.combinations.contains_key(key) || self.overrides.iter().any(|o| o.key == key)
    }

    /// Highest-severity override whose symptom is in `selected_ids`.
    pub fn find_override(&self, selected_ids: &[&str]) -> Option<&ConditionEntry> {
        self.overrides
            .iter()
            .find(|entry| selected_ids.contains(&entry.key.as_str()))
    }

    /// Exact combination lookup by canonical key.
    pub fn find_combination(&self, key: &str) -> Option<&ConditionEntry> {
        self.combinations.get(key)
    }

    /// Lookup by canonical key across both row kinds.
    pub fn get(&self, key: &str) -> Option<&ConditionEntry> {
        self.find_combination(key)
            .or_else(|| self.overrides.iter().find(|o| o.key == key))
    }

    /// All rows: overrides first, then combinations sorted by key.
    pub fn entries(&self) -> Vec<&ConditionEntry> {
        let mut combos: Vec<&ConditionEntry> = self.combinations.values().collect();
        combos.sort_by(|a, b| a.key.cmp(&b.key));
        self.overrides.iter().chain(combos).collect()
    }

    pub fn len(&self) -> usize {
        self.overrides.len() + self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that every symptom referenced by a row exists in the catalog.
    pub fn validate(&self, catalog: &SymptomCatalog) -> Result<(), InferenceTableError> {
        for entry in self.entries() {
            if let Some(missing) = entry.symptom_ids().find(|id| !catalog.contains(id)) {
                return Err(InferenceTableError::UnknownSymptom {
                    condition: entry.condition_type.clone(),
                    symptom: missing.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Canonical key for a slice of symptom ids.
pub fn lookup_key(ids: &[&str]) -> String {
    canonical_key(ids.iter().copied())
}

fn standard_entries() -> Vec<ConditionEntry> {
    vec![
        ConditionEntry::new(
            &["fever", "throat"],
            "Viral Pharyngitis",
            Severity::Mild,
            "Likely a common cold. Prioritize throat rest and hydration.",
        ),
        ConditionEntry::new(
            &["headache", "fatigue"],
            "Academic Fatigue",
            Severity::Mild,
            "Stress-induced fatigue. Immediate rest required.",
        ),
        ConditionEntry::new(
            &["cough", "fever", "fatigue"],
            "Seasonal Influenza",
            Severity::Moderate,
            "Classic flu pattern. Monitor temp and isolate.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_is_valid_against_catalog() {
        let table = ConditionTable::standard();
        assert_eq!(table.len(), 4);
        table.validate(&SymptomCatalog::standard()).unwrap();
    }

    #[test]
    fn combination_keys_are_canonical() {
        let table = ConditionTable::standard();
        let flu = table.find_combination("cough,fatigue,fever").unwrap();
        assert_eq!(flu.condition_type, "Seasonal Influenza");
        let fatigue = table.get("fatigue,headache").unwrap();
        assert_eq!(fatigue.condition_type, "Academic Fatigue");
        // Insertion order of the source ids does not leak into the key.
        assert!(table.find_combination("cough,fever,fatigue").is_none());
    }

    #[test]
    fn override_matches_within_larger_selection() {
        let table = ConditionTable::standard();
        let hit = table.find_override(&["fever", "breath", "cough"]).unwrap();
        assert_eq!(hit.severity, Severity::High);
        assert!(table.find_override(&["fever", "cough"]).is_none());
    }

    #[test]
    fn highest_severity_override_wins() {
        let table = ConditionTable::new()
            .with_override(ConditionEntry::new(&["cough"], "Irritation", Severity::Moderate, "x"))
            .unwrap()
            .with_override(ConditionEntry::new(&["breath"], "Distress", Severity::High, "y"))
            .unwrap();
        let hit = table.find_override(&["cough", "breath"]).unwrap();
        assert_eq!(hit.condition_type, "Distress");
    }

    #[test]
    fn override_requires_single_symptom() {
        let err = ConditionTable::new()
            .with_override(ConditionEntry::new(&["cough", "breath"], "Bad", Severity::High, "z"))
            .unwrap_err();
        assert_eq!(err, InferenceTableError::OverrideNotSingle("Bad".into()));
    }

    #[test]
    fn duplicate_and_empty_keys_rejected() {
        let entry = ConditionEntry::new(&["throat", "fever"], "Dup", Severity::Mild, "a");
        let err = ConditionTable::standard().with_combination(entry).unwrap_err();
        assert_eq!(err, InferenceTableError::DuplicateKey("fever,throat".into()));

        let empty = ConditionEntry::new(&[], "Nothing", Severity::Mild, "a");
        assert!(matches!(
            ConditionTable::new().with_combination(empty),
            Err(InferenceTableError::EmptyKey(_))
        ));
    }

    #[test]
    fn validate_reports_unknown_symptom() {
        let table = ConditionTable::new()
            .with_combination(ConditionEntry::new(&["fever", "rash"], "Measles", Severity::High, "a"))
            .unwrap();
        let err = table.validate(&SymptomCatalog::standard()).unwrap_err();
        assert_eq!(
            err,
            InferenceTableError::UnknownSymptom {
                condition: "Measles".into(),
                symptom: "rash".into(),
            }
        );
    }

    #[test]
    fn lookup_key_matches_entry_key() {
        assert_eq!(lookup_key(&["throat", "fever"]), "fever,throat");
    }
}
