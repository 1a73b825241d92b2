use serde::{Deserialize, Serialize};

use super::enums::Severity;

/// Delimiter between symptom ids in a condition key.
pub const KEY_DELIMITER: &str = ",";

/// Build the canonical lookup key for a set of symptom ids.
///
/// Ids are sorted lexicographically and deduplicated, so insertion order
/// and repeats never change the key.
pub fn canonical_key<'a, I>(ids: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sorted: Vec<&str> = ids.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.join(KEY_DELIMITER)
}

/// One row of the condition inference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionEntry {
    /// Sorted, comma-joined symptom ids.
    pub key: String,
    pub condition_type: String,
    pub severity: Severity,
    pub advice: String,
}

impl ConditionEntry {
    /// Create an entry; the key is canonicalised from `symptom_ids`.
    pub fn new(symptom_ids: &[&str], condition_type: &str, severity: Severity, advice: &str) -> Self {
        Self {
            key: canonical_key(symptom_ids.iter().copied()),
            condition_type: condition_type.to_string(),
            severity,
            advice: advice.to_string(),
        }
    }

    /// Symptom ids named by the key.
    pub fn symptom_ids(&self) -> impl Iterator<Item = &str> {
        self.key.split(KEY_DELIMITER).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_sorts_and_dedups() {
        assert_eq!(canonical_key(["fever", "cough", "fatigue"]), "cough,fatigue,fever");
        assert_eq!(canonical_key(["throat", "fever", "throat"]), "fever,throat");
        assert_eq!(canonical_key(Vec::<&str>::new()), "");
    }

    #[test]
    fn entry_key_is_order_independent() {
        let a = ConditionEntry::new(&["headache", "fatigue"], "Academic Fatigue", Severity::Mild, "Rest.");
        let b = ConditionEntry::new(&["fatigue", "headache"], "Academic Fatigue", Severity::Mild, "Rest.");
        assert_eq!(a.key, b.key);
        assert_eq!(a.symptom_ids().collect::<Vec<_>>(), vec!["fatigue", "headache"]);
    }
}
