//! Test doubles for the text generation seam

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::plugins::{AiError, TextGenerator};

/// Replies with a fixed text, or fails when given none. Records every prompt.
pub struct CannedGenerator {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn answer(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts.lock().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| AiError::Connection("connection refused".into()))
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, AiError> {
        self.answer(prompt)
    }

    async fn generate_json(&self, prompt: &str, _schema: &Value) -> Result<String, AiError> {
        self.answer(prompt)
    }
}
