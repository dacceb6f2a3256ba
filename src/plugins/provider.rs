//! Text generation provider seam

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to a generative-language API
#[derive(Debug, Error)]
pub enum AiError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,

    #[error("No API key configured")]
    MissingApiKey,
}

/// Anything that can turn a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name for log lines
    fn name(&self) -> &str;

    /// Free-form completion. Returns the reply text, possibly empty.
    async fn generate_text(&self, prompt: &str) -> Result<String, AiError>;

    /// Completion constrained to JSON matching `schema`. Returns the raw reply text.
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, AiError>;
}
