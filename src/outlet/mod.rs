//! Outbound collaborators: the narrator that speaks to the table and the
//! messenger that reaches a single player privately.

mod console;
mod webhook;

use crate::types::ContactId;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub use console::{ConsoleMessenger, ConsoleNarrator};
pub use webhook::{WebhookMessenger, WebhookNarrator};

/// Result type for outlet operations
pub type OutletResult<T> = Result<T, OutletError>;

/// Errors that can occur while talking to the outside world
#[derive(Debug, thiserror::Error)]
pub enum OutletError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Speaks a line to the whole table
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Resolves once the line has been spoken
    async fn announce(&self, text: &str) -> OutletResult<()>;

    fn name(&self) -> &str;
}

/// Sends a private text to one registered player
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, to: &ContactId, text: &str) -> OutletResult<()>;

    fn name(&self) -> &str;
}

/// Configuration for the outbound collaborators
#[derive(Debug, Clone)]
pub struct OutletConfig {
    pub narrator_webhook_url: Option<String>,
    pub messenger_webhook_url: Option<String>,
    /// How long the console narrator takes per spoken word
    pub narration_ms_per_word: u64,
    pub request_timeout: Duration,
}

impl Default for OutletConfig {
    fn default() -> Self {
        Self {
            narrator_webhook_url: None,
            messenger_webhook_url: None,
            narration_ms_per_word: 250,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl OutletConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let url = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let config = Self {
            narrator_webhook_url: url("NARRATOR_WEBHOOK_URL"),
            messenger_webhook_url: url("MESSENGER_WEBHOOK_URL"),
            narration_ms_per_word: std::env::var("NARRATION_MS_PER_WORD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(250),
            request_timeout: Duration::from_secs(
                std::env::var("OUTLET_TIMEOUT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
        };

        tracing::info!(
            narrator = config.narrator_webhook_url.as_deref().unwrap_or("console"),
            messenger = config.messenger_webhook_url.as_deref().unwrap_or("console"),
            "Outlet config loaded"
        );
        config
    }

    /// Webhook narrator if a URL is configured, otherwise the console
    pub fn build_narrator(&self) -> OutletResult<Arc<dyn Narrator>> {
        match &self.narrator_webhook_url {
            Some(url) => Ok(Arc::new(WebhookNarrator::new(url, self.request_timeout)?)),
            None => Ok(Arc::new(ConsoleNarrator::new(Duration::from_millis(
                self.narration_ms_per_word,
            )))),
        }
    }

    /// Webhook messenger if a URL is configured, otherwise the console
    pub fn build_messenger(&self) -> OutletResult<Arc<dyn Messenger>> {
        match &self.messenger_webhook_url {
            Some(url) => Ok(Arc::new(WebhookMessenger::new(url, self.request_timeout)?)),
            None => Ok(Arc::new(ConsoleMessenger)),
        }
    }
}
