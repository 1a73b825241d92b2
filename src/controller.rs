//! Assessment/navigation controller.
//!
//! Owns the view state machine and the assessment state for one student
//! session. Presentation layers drive it through `navigate`, `toggle_symptom`
//! and `complete_assessment` and render from its getters.
//!
//! Views: home (initial), guide, chat, library, history. Every view is
//! reachable from every other by explicit navigation. The one automatic
//! transition is a high-severity assessment forcing the chat view.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{CatalogError, SymptomCatalog};
use crate::classifier::SeverityClassifier;
use crate::models::{AppView, Assessment, AssessmentOutcome, Severity};
use crate::selection::SelectedSymptomSet;

/// Symptom context handed to the chat adapter when a chat session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatSeed {
    pub symptom_ids: Vec<String>,
    pub symptom_titles: Vec<String>,
}

impl ChatSeed {
    pub fn is_empty(&self) -> bool {
        self.symptom_ids.is_empty()
    }
}

/// Read-only view of the controller for renderers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub current_view: AppView,
    pub selected: SelectedSymptomSet,
    pub last_assessment: Option<Assessment>,
    pub has_symptoms: bool,
}

pub struct AssessmentController {
    catalog: Arc<SymptomCatalog>,
    classifier: SeverityClassifier,
    current_view: AppView,
    selected: SelectedSymptomSet,
    last_assessment: Option<Assessment>,
    pending_chat_seed: Option<ChatSeed>,
}

impl AssessmentController {
    pub fn new(catalog: Arc<SymptomCatalog>, classifier: SeverityClassifier) -> Self {
        Self {
            catalog,
            classifier,
            current_view: AppView::Home,
            selected: SelectedSymptomSet::new(),
            last_assessment: None,
            pending_chat_seed: None,
        }
    }

    pub fn current_view(&self) -> AppView {
        self.current_view
    }

    pub fn selected(&self) -> &SelectedSymptomSet {
        &self.selected
    }

    pub fn last_assessment(&self) -> Option<&Assessment> {
        self.last_assessment.as_ref()
    }

    pub fn has_symptoms(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_view: self.current_view,
            selected: self.selected.clone(),
            last_assessment: self.last_assessment.clone(),
            has_symptoms: self.has_symptoms(),
        }
    }

    /// User-initiated navigation. Unconditional.
    ///
    /// Entering the chat view from elsewhere queues a fresh chat seed.
    pub fn navigate(&mut self, view: AppView) -> AppView {
        if view == AppView::Chat && self.current_view != AppView::Chat {
            self.queue_chat_seed();
        }
        if view != self.current_view {
            tracing::info!(from = %self.current_view, to = %view, "View changed");
        }
        self.current_view = view;
        self.current_view
    }

    /// Add or remove a symptom. Returns whether it is selected afterwards.
    pub fn toggle_symptom(&mut self, id: &str) -> Result<bool, CatalogError> {
        self.catalog.require(id)?;
        let selected = self.selected.toggle(id);
        tracing::debug!(symptom = id, selected, "Symptom toggled");
        Ok(selected)
    }

    /// Classify the current selection without recording anything.
    pub fn preview(&self) -> Assessment {
        self.classifier.classify(self.selected.iter())
    }

    /// Classify the current selection, record it as the last assessment and
    /// escalate to chat on high severity.
    pub fn complete_assessment(&mut self) -> AssessmentOutcome {
        let assessment = self.classifier.classify(self.selected.iter());
        self.last_assessment = Some(assessment.clone());

        let escalated = assessment.severity == Severity::High;
        if escalated {
            tracing::warn!(
                from = %self.current_view,
                symptoms = ?self.selected,
                "High severity assessment, escalating to chat"
            );
            self.current_view = AppView::Chat;
            self.queue_chat_seed();
        } else {
            tracing::info!(severity = %assessment.severity, "Assessment recorded");
        }

        AssessmentOutcome {
            assessment,
            escalated,
            current_view: self.current_view,
        }
    }

    /// Take the queued seed, if a chat session should start.
    pub fn take_chat_seed(&mut self) -> Option<ChatSeed> {
        self.pending_chat_seed.take()
    }

    /// Logout: back to an empty session on the home view.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.last_assessment = None;
        self.pending_chat_seed = None;
        self.current_view = AppView::Home;
        tracing::info!("Session reset");
    }

    fn queue_chat_seed(&mut self) {
        self.pending_chat_seed = Some(ChatSeed {
            symptom_ids: self.selected.to_vec(),
            symptom_titles: self.catalog.titles_for(self.selected.iter()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::ConditionTable;

    fn controller() -> AssessmentController {
        AssessmentController::new(
            Arc::new(SymptomCatalog::standard()),
            SeverityClassifier::new(Arc::new(ConditionTable::standard())),
        )
    }

    fn select(c: &mut AssessmentController, ids: &[&str]) {
        for id in ids {
            assert!(c.toggle_symptom(id).unwrap());
        }
    }

    #[test]
    fn starts_on_home_with_empty_selection() {
        let c = controller();
        assert_eq!(c.current_view(), AppView::Home);
        assert!(!c.has_symptoms());
        assert!(c.last_assessment().is_none());
    }

    #[test]
    fn any_view_reachable_from_any_other() {
        let mut c = controller();
        for from in AppView::ALL {
            for to in AppView::ALL {
                c.navigate(*from);
                assert_eq!(c.navigate(*to), *to);
                assert_eq!(c.current_view(), *to);
            }
        }
    }

    #[test]
    fn toggle_rejects_unknown_symptom() {
        let mut c = controller();
        assert_eq!(
            c.toggle_symptom("rash"),
            Err(CatalogError::UnknownSymptom("rash".into()))
        );
        assert!(!c.has_symptoms());
    }

    #[test]
    fn toggle_twice_restores_selection() {
        let mut c = controller();
        select(&mut c, &["fever", "throat"]);
        let before = c.selected().clone();
        assert!(c.toggle_symptom("cough").unwrap());
        assert!(!c.toggle_symptom("cough").unwrap());
        assert!(c.selected().same_members(&before));
    }

    #[test]
    fn high_severity_forces_chat_and_queues_seed() {
        let mut c = controller();
        c.navigate(AppView::Guide);
        select(&mut c, &["fever", "breath"]);

        let outcome = c.complete_assessment();

        assert!(outcome.escalated);
        assert_eq!(outcome.assessment.severity, Severity::High);
        assert_eq!(outcome.current_view, AppView::Chat);
        assert_eq!(c.current_view(), AppView::Chat);

        let seed = c.take_chat_seed().unwrap();
        assert_eq!(seed.symptom_ids, vec!["fever".to_string(), "breath".to_string()]);
        assert_eq!(seed.symptom_titles, vec!["Fever".to_string(), "Breathless".to_string()]);
        assert!(c.take_chat_seed().is_none());
    }

    #[test]
    fn mild_and_moderate_leave_view_unchanged() {
        for (ids, severity) in [
            (&["fever", "throat"][..], Severity::Mild),
            (&["cough", "fever", "fatigue"][..], Severity::Moderate),
            (&[][..], Severity::Mild),
        ] {
            let mut c = controller();
            c.navigate(AppView::Guide);
            select(&mut c, ids);

            let outcome = c.complete_assessment();

            assert!(!outcome.escalated);
            assert_eq!(outcome.assessment.severity, severity);
            assert_eq!(c.current_view(), AppView::Guide);
            assert!(c.take_chat_seed().is_none());
        }
    }

    #[test]
    fn last_assessment_is_overwritten() {
        let mut c = controller();
        select(&mut c, &["fever", "throat"]);
        c.complete_assessment();
        assert_eq!(
            c.last_assessment().unwrap().condition_type.as_deref(),
            Some("Viral Pharyngitis")
        );

        c.toggle_symptom("throat").unwrap();
        c.complete_assessment();
        assert!(c.last_assessment().unwrap().condition_type.is_none());
    }

    #[test]
    fn preview_records_nothing() {
        let mut c = controller();
        c.navigate(AppView::Guide);
        select(&mut c, &["breath"]);
        assert_eq!(c.preview().severity, Severity::High);
        assert!(c.last_assessment().is_none());
        assert_eq!(c.current_view(), AppView::Guide);
    }

    #[test]
    fn entering_chat_manually_queues_seed_once() {
        let mut c = controller();
        select(&mut c, &["headache"]);
        c.navigate(AppView::Chat);
        assert_eq!(c.take_chat_seed().unwrap().symptom_ids, vec!["headache".to_string()]);

        // Re-navigating to the view already shown does not restart the chat.
        c.navigate(AppView::Chat);
        assert!(c.take_chat_seed().is_none());
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut c = controller();
        select(&mut c, &["breath"]);
        c.complete_assessment();
        c.reset();
        assert_eq!(c.current_view(), AppView::Home);
        assert!(!c.has_symptoms());
        assert!(c.last_assessment().is_none());
        assert!(c.take_chat_seed().is_none());
    }
}
