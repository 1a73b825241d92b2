//! Severity classifier: resolves a symptom selection to an assessment.
//!
//! Candidates are the best override row (a critical symptom anywhere in the
//! selection) and the exact combination match on the canonical key. The more
//! severe one wins, the override on a tie. With neither, the mild
//! rest-and-hydrate fallback applies.
//!
//! Pure over the injected table and the input ids; never fails.

use std::sync::Arc;

use crate::inference::{lookup_key, ConditionTable};
use crate::models::{Assessment, ConditionEntry, MatchBasis, Severity};

/// Summary returned when no table row matches.
pub const FALLBACK_SUMMARY: &str =
    "No specific pattern matched. Rest, stay hydrated and monitor your symptoms.";

#[derive(Debug, Clone)]
pub struct SeverityClassifier {
    table: Arc<ConditionTable>,
}

impl SeverityClassifier {
    pub fn new(table: Arc<ConditionTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ConditionTable {
        &self.table
    }

    /// Classify a selection. Empty and unknown selections get the fallback.
    pub fn classify<'a, I>(&self, selected_ids: I) -> Assessment
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ids: Vec<&str> = selected_ids.into_iter().collect();
        let key = lookup_key(&ids);

        let over = self.table.find_override(&ids);
        let combo = self.table.find_combination(&key);

        match (over, combo) {
            // Highest severity wins; the override takes ties.
            (Some(o), Some(c)) if c.severity > o.severity => {
                tracing::debug!(%key, condition = %c.condition_type, "Combination outranks override");
                from_entry(c, MatchBasis::Combination)
            }
            (Some(o), _) => {
                tracing::debug!(key = %o.key, "Critical symptom override matched");
                from_entry(o, MatchBasis::Override)
            }
            (None, Some(c)) => {
                tracing::debug!(%key, condition = %c.condition_type, "Symptom combination matched");
                from_entry(c, MatchBasis::Combination)
            }
            (None, None) => {
                tracing::debug!(%key, "No condition matched, using fallback");
                fallback_assessment()
            }
        }
    }
}

fn from_entry(entry: &ConditionEntry, basis: MatchBasis) -> Assessment {
    Assessment {
        severity: entry.severity,
        summary: format!("{}: {}", entry.condition_type, entry.advice),
        condition_type: Some(entry.condition_type.clone()),
        advice: Some(entry.advice.clone()),
        basis,
    }
}

/// The default mild assessment.
pub fn fallback_assessment() -> Assessment {
    Assessment {
        severity: Severity::Mild,
        summary: FALLBACK_SUMMARY.to_string(),
        condition_type: None,
        advice: None,
        basis: MatchBasis::Fallback,
    }
}
