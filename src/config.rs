//! Runtime settings: model endpoint and query limits.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the local model server
    pub ollama_host: String,
    pub model: String,
    /// Context window requested from the model
    pub num_ctx: u32,
    pub temperature: f32,
    /// Postgres `statement_timeout` applied to generated queries
    pub statement_timeout: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ollama_host: "http://localhost:11434".to_string(),
            model: "qwen2.5:7b-instruct".to_string(),
            num_ctx: 16384,
            temperature: 0.3,
            statement_timeout: "30s".to_string(),
        }
    }
}

impl Settings {
    /// Defaults, overlaid with the optional JSON file, overlaid with the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Override fields from `OLLAMA_HOST`, `OLLAMA_MODEL`, `NUM_CTX` and
    /// `STATEMENT_TIMEOUT`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("OLLAMA_HOST") {
            self.ollama_host = v;
        }
        if let Some(v) = lookup("OLLAMA_MODEL") {
            self.model = v;
        }
        if let Some(v) = lookup("NUM_CTX") {
            self.num_ctx = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "NUM_CTX",
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup("STATEMENT_TIMEOUT") {
            self.statement_timeout = v;
        }
        tracing::debug!(host = %self.ollama_host, model = %self.model, "settings loaded");
        Ok(())
    }
}
