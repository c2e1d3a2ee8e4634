//! Request and response bodies for a local `/api/chat` model endpoint.
//!
//! Only the payloads live here; sending them is the caller's job.

use serde::{Deserialize, Serialize};

use crate::config::Settings;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Malformed chat response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatOptions {
    pub num_ctx: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub options: ChatOptions,
    pub stream: bool,
}

impl ChatRequest {
    /// Single-turn, non-streaming request: system prompt then user prompt.
    pub fn new(settings: &Settings, system_prompt: &str, user_prompt: &str) -> Self {
        Self {
            model: settings.model.clone(),
            messages: vec![
                Message {
                    role: Role::System,
                    content: system_prompt.to_string(),
                },
                Message {
                    role: Role::User,
                    content: user_prompt.to_string(),
                },
            ],
            options: ChatOptions {
                num_ctx: settings.num_ctx,
                temperature: settings.temperature,
            },
            stream: false,
        }
    }

    pub fn to_json(&self) -> Result<String, LlmError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: Message,
}

impl ChatResponse {
    pub fn from_json(body: &str) -> Result<Self, LlmError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn content(&self) -> &str {
        &self.message.content
    }
}

pub fn chat_endpoint(host: &str) -> String {
    format!("{}/api/chat", host.trim_end_matches('/'))
}
