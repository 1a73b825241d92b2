//! Chat collaborator backed by the hosted generative-language REST API.
//!
//! Each session keeps the running conversation locally and posts the whole
//! history to `{base_url}/{model}:generateContent` on every turn. A failed
//! turn is dropped from the history so the next attempt starts clean.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::collaborator::{ChatCollaborator, ChatSession, RemoteCallFailure};
use crate::config::ChatConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Collaborator that opens sessions against the hosted model.
pub struct GeminiCollaborator {
    client: reqwest::Client,
    config: ChatConfig,
}

impl GeminiCollaborator {
    pub fn new(config: ChatConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        if config.api_key.is_none() {
            tracing::warn!("No chat API key configured; chat replies will use the fallback message");
        }
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl ChatCollaborator for GeminiCollaborator {
    fn create_session(&self, system_instruction: &str, temperature: f32) -> Box<dyn ChatSession> {
        tracing::debug!(model = %self.config.model, temperature, "Opening chat session");
        Box::new(GeminiSession {
            client: self.client.clone(),
            endpoint: format!(
                "{}/{}:generateContent",
                self.config.base_url.trim_end_matches('/'),
                self.config.model
            ),
            api_key: self.config.api_key.clone(),
            timeout_secs: self.config.timeout.as_secs(),
            system_instruction: system_instruction.to_string(),
            temperature,
            history: Vec::new(),
        })
    }
}

struct GeminiSession {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout_secs: u64,
    system_instruction: String,
    temperature: f32,
    history: Vec<Content>,
}

impl GeminiSession {
    async fn post(&self, api_key: &str) -> Result<String, RemoteCallFailure> {
        let body = GenerateContentRequest {
            contents: &self.history,
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: self.system_instruction.clone(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    RemoteCallFailure::Connection(self.endpoint.clone())
                } else if e.is_timeout() {
                    RemoteCallFailure::Timeout(self.timeout_secs)
                } else {
                    RemoteCallFailure::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteCallFailure::Http {
                status: status.as_u16(),
                body: error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| RemoteCallFailure::Parse(e.to_string()))?;

        Ok(extract_text(parsed))
    }
}

#[async_trait]
impl ChatSession for GeminiSession {
    async fn send(&mut self, message: &str) -> Result<String, RemoteCallFailure> {
        let api_key = self
            .api_key
            .clone()
            .ok_or(RemoteCallFailure::MissingApiKey)?;

        self.history.push(Content::new(ROLE_USER, message));
        match self.post(&api_key).await {
            Ok(reply) => {
                self.history.push(Content::new(ROLE_MODEL, &reply));
                Ok(reply)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }
}

// ═══════════════════════════════════════════
// Wire format
// ═══════════════════════════════════════════

const ROLE_USER: &str = "user";
const ROLE_MODEL: &str = "model";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
    system_instruction: SystemInstruction,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

impl Content {
    fn new(role: &'static str, text: &str) -> Self {
        Self {
            role,
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Text of the first candidate, parts concatenated. Empty when the model returned no text.
fn extract_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Pull `STATUS: message` out of an API error body, or return the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|w| {
            let msg = w.error.message?;
            Some(match w.error.status {
                Some(status) if !status.is_empty() => format!("{status}: {msg}"),
                _ => msg,
            })
        })
        .unwrap_or_else(|| body.to_string())
}
