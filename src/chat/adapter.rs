//! Chat escalation adapter.
//!
//! Forwards student messages to the chat collaborator and always answers with
//! text: the assistant's reply on success, a fixed fallback message on any
//! remote failure. Failures stay typed (`RemoteCallFailure`) up to this
//! boundary so they can be logged, then collapse into the fallback string.
//!
//! Every call gets a monotonically increasing id and remembers the session
//! generation it started in. A reply whose call was overtaken by a newer one,
//! or whose session was replaced or ended meanwhile, is flagged `stale` and
//! left out of the transcript.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::OwnedMutexGuard;
use tokio::task::JoinHandle;

use super::collaborator::{ChatCollaborator, ChatSession, RemoteCallFailure};
use super::prompt::{seed_message, SYSTEM_INSTRUCTION};
use crate::config::CHAT_TEMPERATURE;
use crate::controller::ChatSeed;
use crate::models::{ChatExchange, ChatReply};

/// Shown when the remote call fails for any reason.
pub const FALLBACK_MESSAGE: &str =
    "I'm having trouble connecting right now. Please try again or visit the medical center directly.";

/// Shown when the remote call succeeds but returns no text.
pub const NO_REPLY_MESSAGE: &str = "I'm sorry, I couldn't process that request.";

type SharedSession = Arc<tokio::sync::Mutex<Box<dyn ChatSession>>>;

/// Identity of one in-flight call.
#[derive(Debug, Clone, Copy)]
struct PendingCall {
    call_id: u64,
    generation: u64,
}

/// Seed turn of a fresh session, with the session already locked.
struct SeedCall {
    call: PendingCall,
    message: String,
    session: OwnedMutexGuard<Box<dyn ChatSession>>,
}

pub struct ChatEscalationAdapter {
    collaborator: Arc<dyn ChatCollaborator>,
    temperature: f32,
    session: Mutex<Option<SharedSession>>,
    transcript: Mutex<Vec<ChatExchange>>,
    latest_call: AtomicU64,
    /// Bumped whenever the session is replaced or ended.
    generation: AtomicU64,
}

impl ChatEscalationAdapter {
    pub fn new(collaborator: Arc<dyn ChatCollaborator>) -> Self {
        Self {
            collaborator,
            temperature: CHAT_TEMPERATURE,
            session: Mutex::new(None),
            transcript: Mutex::new(Vec::new()),
            latest_call: AtomicU64::new(0),
            generation: AtomicU64::new(0),
        }
    }

    /// Temperature for sessions opened from now on.
    pub fn set_temperature(&mut self, temperature: f32) {
        self.temperature = temperature;
    }

    /// Start a fresh chat session, replacing any previous one.
    ///
    /// A non-empty seed is sent as the first user turn; its reply is returned.
    pub async fn start_session(&self, seed: &ChatSeed) -> Option<ChatReply> {
        let SeedCall {
            call,
            message,
            mut session,
        } = self.begin_session(seed)?;
        let result = session.send(&message).await;
        Some(self.finish_call(call, result))
    }

    /// Like `start_session`, but the seed turn runs in a background task.
    ///
    /// The session is replaced before this returns, and it stays locked until
    /// the seed reply is recorded, so later messages queue behind the seed.
    pub fn spawn_session(self: &Arc<Self>, seed: &ChatSeed) -> Option<JoinHandle<ChatReply>> {
        let SeedCall {
            call,
            message,
            mut session,
        } = self.begin_session(seed)?;
        let adapter = Arc::clone(self);
        Some(tokio::spawn(async move {
            let result = session.send(&message).await;
            let reply = adapter.finish_call(call, result);
            drop(session);
            reply
        }))
    }

    /// Send a message and return the reply text. Never fails.
    pub async fn send_message(&self, text: &str) -> String {
        self.send(text).await.text
    }

    /// Send a message and return the tagged reply. Never fails.
    pub async fn send(&self, text: &str) -> ChatReply {
        let call = self.begin_call(text);

        let session = self.current_session();
        let result = {
            let mut session = session.lock().await;
            session.send(text).await
        };

        self.finish_call(call, result)
    }

    /// Wait until no call is running on the current session.
    pub async fn wait_idle(&self) {
        let session = lock(&self.session).clone();
        if let Some(session) = session {
            drop(session.lock().await);
        }
    }

    /// Id of the most recent call, or 0 before any call.
    pub fn latest_call_id(&self) -> u64 {
        self.latest_call.load(Ordering::SeqCst)
    }

    pub fn transcript(&self) -> Vec<ChatExchange> {
        lock(&self.transcript).clone()
    }

    /// Drop the session and transcript (logout). Replies still in flight are discarded.
    pub fn end_session(&self) {
        self.clear_transcript();
        *lock(&self.session) = None;
        tracing::info!("Chat session ended");
    }

    fn begin_session(&self, seed: &ChatSeed) -> Option<SeedCall> {
        let session = self.open_session();
        // Fresh mutex, nobody else holds it yet.
        let guard = Arc::clone(&session).try_lock_owned().ok();
        self.clear_transcript();
        *lock(&self.session) = Some(session);
        tracing::info!(symptoms = ?seed.symptom_ids, "Chat session started");

        let message = seed_message(seed)?;
        let session = guard?;
        let call = self.begin_call(&message);
        Some(SeedCall {
            call,
            message,
            session,
        })
    }

    fn clear_transcript(&self) {
        let mut transcript = lock(&self.transcript);
        self.generation.fetch_add(1, Ordering::SeqCst);
        transcript.clear();
    }

    fn begin_call(&self, text: &str) -> PendingCall {
        let mut transcript = lock(&self.transcript);
        let call = PendingCall {
            call_id: self.latest_call.fetch_add(1, Ordering::SeqCst) + 1,
            generation: self.generation.load(Ordering::SeqCst),
        };
        transcript.push(ChatExchange::user(text));
        call
    }

    fn finish_call(&self, call: PendingCall, result: Result<String, RemoteCallFailure>) -> ChatReply {
        let (text, is_fallback) = match result {
            Ok(reply) if reply.trim().is_empty() => (NO_REPLY_MESSAGE.to_string(), false),
            Ok(reply) => (reply, false),
            Err(e) => {
                log_failure(call.call_id, &e);
                (FALLBACK_MESSAGE.to_string(), true)
            }
        };

        let mut transcript = lock(&self.transcript);
        let stale = self.latest_call.load(Ordering::SeqCst) != call.call_id
            || self.generation.load(Ordering::SeqCst) != call.generation;
        if stale {
            tracing::debug!(call_id = call.call_id, "Chat reply superseded");
        } else {
            transcript.push(ChatExchange::assistant(text.clone()));
        }

        ChatReply {
            call_id: call.call_id,
            text,
            is_fallback,
            stale,
        }
    }

    fn open_session(&self) -> SharedSession {
        let session = self
            .collaborator
            .create_session(SYSTEM_INSTRUCTION, self.temperature);
        Arc::new(tokio::sync::Mutex::new(session))
    }

    /// The active session, opening an unseeded one if none exists.
    fn current_session(&self) -> SharedSession {
        let mut slot = lock(&self.session);
        match slot.as_ref() {
            Some(session) => Arc::clone(session),
            None => {
                let session = self.open_session();
                *slot = Some(Arc::clone(&session));
                session
            }
        }
    }
}

fn log_failure(call_id: u64, e: &RemoteCallFailure) {
    match e {
        RemoteCallFailure::MissingApiKey | RemoteCallFailure::Parse(_) => {
            tracing::error!(call_id, kind = e.kind(), error = %e, "Chat call failed");
        }
        _ => {
            tracing::warn!(call_id, kind = e.kind(), error = %e, "Chat call failed");
        }
    }
}

/// Transcript and session slot hold plain data, so a poisoned lock is still usable.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::collaborator::testing::{GatedCollaborator, Scripted, ScriptedCollaborator};
    use crate::models::ChatRole;

    fn seed(ids: &[&str], titles: &[&str]) -> ChatSeed {
        ChatSeed {
            symptom_ids: ids.iter().map(|s| s.to_string()).collect(),
            symptom_titles: titles.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn success_returns_reply_verbatim() {
        let collaborator = ScriptedCollaborator::new([Scripted::Reply("Drink water.".into())]);
        let adapter = ChatEscalationAdapter::new(Arc::new(collaborator));
        assert_eq!(adapter.send_message("I feel hot").await, "Drink water.");
    }

    #[tokio::test]
    async fn any_failure_yields_exact_fallback() {
        for failure in [
            RemoteCallFailure::Connection("x".into()),
            RemoteCallFailure::MissingApiKey,
            RemoteCallFailure::Http { status: 429, body: "quota".into() },
            RemoteCallFailure::Timeout(30),
            RemoteCallFailure::Parse("bad json".into()),
        ] {
            let collaborator = ScriptedCollaborator::new([Scripted::Fail(failure)]);
            let adapter = ChatEscalationAdapter::new(Arc::new(collaborator));
            let reply = adapter.send("help").await;
            assert_eq!(reply.text, FALLBACK_MESSAGE);
            assert!(reply.is_fallback);
        }
    }

    #[tokio::test]
    async fn empty_reply_gets_apology() {
        let collaborator = ScriptedCollaborator::new([Scripted::Reply("  ".into())]);
        let adapter = ChatEscalationAdapter::new(Arc::new(collaborator));
        let reply = adapter.send("?").await;
        assert_eq!(reply.text, NO_REPLY_MESSAGE);
        assert!(!reply.is_fallback);
    }

    #[tokio::test]
    async fn no_retry_after_failure() {
        let collaborator = ScriptedCollaborator::failing();
        let adapter = ChatEscalationAdapter::new(Arc::new(collaborator.clone()));
        adapter.send_message("one").await;
        assert_eq!(collaborator.sent(), vec!["one".to_string()]);
    }

    #[tokio::test]
    async fn seeded_session_uses_fixed_instruction_and_temperature() {
        let collaborator = ScriptedCollaborator::new([Scripted::Reply("Please call the clinic.".into())]);
        let adapter = ChatEscalationAdapter::new(Arc::new(collaborator.clone()));

        let reply = adapter
            .start_session(&seed(&["breath"], &["Breathless"]))
            .await
            .unwrap();

        assert_eq!(reply.text, "Please call the clinic.");
        let sessions = collaborator.sessions();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].0, SYSTEM_INSTRUCTION);
        assert!((sessions[0].1 - 0.7).abs() < f32::EPSILON);
        assert!(collaborator.sent()[0].contains("Breathless"));
        assert!(collaborator.sent()[0].contains("breath"));
    }

    #[tokio::test]
    async fn empty_seed_opens_session_without_sending() {
        let collaborator = ScriptedCollaborator::default();
        let adapter = ChatEscalationAdapter::new(Arc::new(collaborator.clone()));
        assert!(adapter.start_session(&seed(&[], &[])).await.is_none());
        assert_eq!(collaborator.sessions().len(), 1);
        assert!(collaborator.sent().is_empty());
    }

    #[tokio::test]
    async fn restart_clears_transcript_and_opens_new_session() {
        let collaborator = ScriptedCollaborator::default();
        let adapter = ChatEscalationAdapter::new(Arc::new(collaborator.clone()));
        adapter.send_message("first").await;
        assert_eq!(adapter.transcript().len(), 2);

        adapter.start_session(&seed(&[], &[])).await;
        assert!(adapter.transcript().is_empty());
        // Lazy session from the first send, plus the explicit restart.
        assert_eq!(collaborator.sessions().len(), 2);
    }

    #[tokio::test]
    async fn transcript_records_both_turns_including_fallback() {
        let collaborator = ScriptedCollaborator::new([
            Scripted::Reply("Rest.".into()),
            Scripted::Fail(RemoteCallFailure::Timeout(30)),
        ]);
        let adapter = ChatEscalationAdapter::new(Arc::new(collaborator));
        adapter.send_message("a").await;
        adapter.send_message("b").await;

        let transcript = adapter.transcript();
        let roles: Vec<ChatRole> = transcript.iter().map(|e| e.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::User, ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]
        );
        assert_eq!(transcript[3].text, FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn call_ids_increase() {
        let adapter = ChatEscalationAdapter::new(Arc::new(ScriptedCollaborator::default()));
        assert_eq!(adapter.latest_call_id(), 0);
        let a = adapter.send("a").await;
        let b = adapter.send("b").await;
        assert_eq!((a.call_id, b.call_id), (1, 2));
        assert!(!a.stale && !b.stale);
    }

    #[tokio::test]
    async fn overtaken_reply_is_flagged_stale() {
        let (collaborator, entered) = GatedCollaborator::new();
        let adapter = Arc::new(ChatEscalationAdapter::new(Arc::new(collaborator.clone())));

        let slow = {
            let adapter = Arc::clone(&adapter);
            tokio::spawn(async move { adapter.send("first").await })
        };
        entered.await.unwrap();

        let (fresh, ()) = tokio::join!(adapter.send("second"), async {
            collaborator.release();
        });
        let slow = slow.await.unwrap();

        assert_eq!(slow.call_id, 1);
        assert!(slow.stale);
        assert_eq!(fresh.call_id, 2);
        assert!(!fresh.stale);
        assert_eq!(fresh.text, "re: second");

        let assistant_turns: Vec<String> = adapter
            .transcript()
            .into_iter()
            .filter(|e| e.role == ChatRole::Assistant)
            .map(|e| e.text)
            .collect();
        assert_eq!(assistant_turns, vec!["re: second".to_string()]);
    }

    #[tokio::test]
    async fn reply_in_flight_at_logout_is_discarded() {
        let (collaborator, entered) = GatedCollaborator::new();
        let adapter = Arc::new(ChatEscalationAdapter::new(Arc::new(collaborator.clone())));

        let pending = {
            let adapter = Arc::clone(&adapter);
            tokio::spawn(async move { adapter.send("previous student's question").await })
        };
        entered.await.unwrap();

        adapter.end_session();
        collaborator.release();
        let reply = pending.await.unwrap();

        assert!(reply.stale);
        assert!(adapter.transcript().is_empty());
    }

    #[tokio::test]
    async fn reply_in_flight_at_restart_stays_out_of_new_transcript() {
        let (collaborator, entered) = GatedCollaborator::new();
        let adapter = Arc::new(ChatEscalationAdapter::new(Arc::new(collaborator.clone())));

        let pending = {
            let adapter = Arc::clone(&adapter);
            tokio::spawn(async move { adapter.send("old").await })
        };
        entered.await.unwrap();

        assert!(adapter.start_session(&seed(&[], &[])).await.is_none());
        collaborator.release();

        assert!(pending.await.unwrap().stale);
        assert!(adapter.transcript().is_empty());
    }

    #[tokio::test]
    async fn spawned_seed_returns_before_reply_and_records_it_later() {
        let (collaborator, entered) = GatedCollaborator::new();
        let adapter = Arc::new(ChatEscalationAdapter::new(Arc::new(collaborator.clone())));

        let handle = adapter
            .spawn_session(&seed(&["breath"], &["Breathless"]))
            .unwrap();
        // Only the seed turn so far; the reply is still pending.
        assert_eq!(adapter.transcript().len(), 1);
        assert_eq!(adapter.transcript()[0].role, ChatRole::User);

        entered.await.unwrap();
        collaborator.release();
        let reply = handle.await.unwrap();

        assert!(!reply.stale);
        assert!(reply.text.starts_with("re: I am experiencing"));
        assert_eq!(adapter.transcript().len(), 2);
    }

    #[tokio::test]
    async fn messages_queue_behind_spawned_seed() {
        let collaborator = ScriptedCollaborator::default();
        let adapter = Arc::new(ChatEscalationAdapter::new(Arc::new(collaborator.clone())));

        adapter.spawn_session(&seed(&["fever"], &["Fever"]));
        let reply = adapter.send("and now?").await;

        assert_eq!(reply.text, "echo: and now?");
        let sent = collaborator.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].contains("Fever"));
        assert_eq!(sent[1], "and now?");
    }

    #[tokio::test]
    async fn wait_idle_returns_after_seed_reply() {
        let adapter = Arc::new(ChatEscalationAdapter::new(Arc::new(ScriptedCollaborator::default())));
        adapter.spawn_session(&seed(&["cough"], &["Dry Cough"]));
        adapter.wait_idle().await;
        assert_eq!(adapter.transcript().len(), 2);
    }
}
