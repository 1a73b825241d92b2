//! Transport-agnostic application state.
//!
//! `CareEngine` wires the static tables, the controller, the chat adapter and
//! the history store together. It is shared behind an `Arc` by whatever
//! presentation layer drives it (the HTTP API in this crate).
//!
//! The controller sits behind a std `Mutex`: its critical sections are short
//! and never cross an await. Chat calls go through the adapter, which handles
//! its own async locking. Seeding a new chat session runs in a background
//! task, so navigation and assessment never wait on the remote service.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::catalog::{CatalogError, SymptomCatalog};
use crate::chat::{ChatCollaborator, ChatEscalationAdapter, GeminiCollaborator};
use crate::classifier::SeverityClassifier;
use crate::config::ChatConfig;
use crate::controller::{AssessmentController, ChatSeed, SessionSnapshot};
use crate::guidance::GuidanceResolver;
use crate::history::{record_from_assessment, ConsultationHistory, HistoryError, InMemoryHistory};
use crate::inference::{ConditionTable, InferenceTableError};
use crate::models::{
    AppView, Assessment, AssessmentOutcome, CareTimeline, ChatExchange, ChatReply,
    ConsultationRecord, DurationLevel, GuidanceBundle, Severity, SymptomCard,
};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Invalid condition table: {0}")]
    InvalidTable(#[from] InferenceTableError),
    #[error("History unavailable: {0}")]
    History(#[from] HistoryError),
    #[error("Failed to build chat client: {0}")]
    ChatClient(#[from] reqwest::Error),
}

pub struct CareEngine {
    catalog: Arc<SymptomCatalog>,
    classifier: SeverityClassifier,
    guidance: GuidanceResolver,
    controller: Mutex<AssessmentController>,
    chat: Arc<ChatEscalationAdapter>,
    history: Arc<dyn ConsultationHistory>,
}

impl CareEngine {
    /// Build an engine from explicit parts. Fails if the table references
    /// symptoms missing from the catalog.
    pub fn new(
        catalog: SymptomCatalog,
        table: ConditionTable,
        guidance: GuidanceResolver,
        collaborator: Arc<dyn ChatCollaborator>,
        history: Arc<dyn ConsultationHistory>,
    ) -> Result<Self, EngineError> {
        table.validate(&catalog)?;

        let catalog = Arc::new(catalog);
        let classifier = SeverityClassifier::new(Arc::new(table));
        let controller = AssessmentController::new(Arc::clone(&catalog), classifier.clone());

        tracing::info!(
            symptoms = catalog.len(),
            conditions = classifier.table().len(),
            "Care engine ready"
        );

        Ok(Self {
            catalog,
            classifier,
            guidance,
            controller: Mutex::new(controller),
            chat: Arc::new(ChatEscalationAdapter::new(collaborator)),
            history,
        })
    }

    /// Standard tables with the given chat collaborator and sample history.
    pub fn standard(collaborator: Arc<dyn ChatCollaborator>) -> Result<Self, EngineError> {
        Self::new(
            SymptomCatalog::standard(),
            ConditionTable::standard(),
            GuidanceResolver::standard(),
            collaborator,
            Arc::new(InMemoryHistory::with_sample()),
        )
    }

    /// Standard tables talking to the hosted chat service.
    pub fn from_config(config: ChatConfig) -> Result<Self, EngineError> {
        let temperature = config.temperature;
        let collaborator = GeminiCollaborator::new(config)?;
        Ok(Self::standard(Arc::new(collaborator))?.with_chat_temperature(temperature))
    }

    pub fn with_chat_temperature(mut self, temperature: f32) -> Self {
        match Arc::get_mut(&mut self.chat) {
            Some(chat) => chat.set_temperature(temperature),
            None => tracing::warn!("Chat adapter already shared, temperature unchanged"),
        }
        self
    }

    fn controller(&self) -> Result<MutexGuard<'_, AssessmentController>, EngineError> {
        self.controller.lock().map_err(|_| EngineError::LockPoisoned)
    }

    // ── Read path ───────────────────────────────────────────

    pub fn symptoms(&self) -> &[SymptomCard] {
        self.catalog.cards()
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, EngineError> {
        Ok(self.controller()?.snapshot())
    }

    pub fn current_view(&self) -> Result<AppView, EngineError> {
        Ok(self.controller()?.current_view())
    }

    pub fn guidance(&self, severity: Severity) -> &GuidanceBundle {
        self.guidance.resolve(severity)
    }

    pub fn timeline(&self, duration: DurationLevel) -> &CareTimeline {
        self.guidance.timeline(duration)
    }

    /// Classify arbitrary ids against the table. No state change.
    pub fn classify<'a, I>(&self, ids: I) -> Assessment
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.classifier.classify(ids)
    }

    pub fn preview_assessment(&self) -> Result<Assessment, EngineError> {
        Ok(self.controller()?.preview())
    }

    pub fn history(&self) -> Result<Vec<ConsultationRecord>, EngineError> {
        Ok(self.history.list()?)
    }

    pub fn transcript(&self) -> Vec<ChatExchange> {
        self.chat.transcript()
    }

    // ── Write path ──────────────────────────────────────────

    pub fn navigate(&self, view: AppView) -> Result<AppView, EngineError> {
        let (view, seed) = {
            let mut controller = self.controller()?;
            let view = controller.navigate(view);
            (view, controller.take_chat_seed())
        };
        self.start_chat(seed);
        Ok(view)
    }

    pub fn toggle_symptom(&self, id: &str) -> Result<bool, EngineError> {
        Ok(self.controller()?.toggle_symptom(id)?)
    }

    /// Record an assessment of the current selection, log it to history and,
    /// on escalation, open a chat session seeded with the selection.
    ///
    /// A history failure is logged and does not undo or block the escalation.
    pub fn complete_assessment(&self) -> Result<AssessmentOutcome, EngineError> {
        let (outcome, symptoms, seed) = {
            let mut controller = self.controller()?;
            let outcome = controller.complete_assessment();
            (outcome, controller.selected().to_vec(), controller.take_chat_seed())
        };

        self.start_chat(seed);
        if let Err(e) = self
            .history
            .append(record_from_assessment(symptoms, &outcome.assessment))
        {
            tracing::error!(error = %e, "Failed to record consultation");
        }
        Ok(outcome)
    }

    pub async fn send_chat_message(&self, text: &str) -> ChatReply {
        self.chat.send(text).await
    }

    /// Wait for any chat call in flight on the current session, seed included.
    pub async fn wait_for_chat(&self) {
        self.chat.wait_idle().await;
    }

    /// Logout: clear selection, assessment and chat.
    pub fn reset_session(&self) -> Result<(), EngineError> {
        self.controller()?.reset();
        self.chat.end_session();
        Ok(())
    }

    fn start_chat(&self, seed: Option<ChatSeed>) {
        if let Some(seed) = seed {
            self.chat.spawn_session(&seed);
        }
    }
}
