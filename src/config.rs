use std::net::SocketAddr;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Care4U";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default hosted model for the chat assistant.
pub const DEFAULT_CHAT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_CHAT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 30;
/// Sampling temperature fixed at chat session creation.
pub const CHAT_TEMPERATURE: f32 = 0.7;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "care4u_lib=info,care4u=info,tower_http=warn"
}

/// Settings for the hosted chat collaborator.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// `None` is allowed: every remote call then fails and the user gets the fallback reply.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_CHAT_MODEL.to_string(),
            base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_CHAT_TIMEOUT_SECS),
            temperature: CHAT_TEMPERATURE,
        }
    }
}

impl ChatConfig {
    /// Read chat settings from the environment.
    ///
    /// `GEMINI_API_KEY` wins over the legacy `API_KEY`. Blank values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout = non_blank("CARE4U_CHAT_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            api_key: non_blank("GEMINI_API_KEY").or_else(|| non_blank("API_KEY")),
            model: non_blank("CARE4U_CHAT_MODEL").unwrap_or(defaults.model),
            base_url: non_blank("CARE4U_CHAT_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout,
            temperature: defaults.temperature,
        }
    }
}

/// Settings for the HTTP API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Read `CARE4U_BIND`, falling back to the loopback default on absence or parse failure.
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("CARE4U_BIND")
            .ok()
            .and_then(|v| match v.parse::<SocketAddr>() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!(value = %v, error = %e, "Ignoring invalid CARE4U_BIND");
                    None
                }
            })
            .unwrap_or_else(default_bind_addr);
        Self { bind_addr }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8787))
}
