//! Configuration loaded from environment variables (plus `.env` via dotenv).

use crate::error::{HugoError, Result};
use crate::browser::DEFAULT_ROW_LIMIT;
use crate::session::DEFAULT_MAX_MESSAGES;
use std::env;

pub const DEFAULT_MAX_INPUT_CHARS: usize = 4000;

#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI-compatible chat-completions endpoint base.
    pub openai_base_url: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,

    /// Backend executor serving /query, /modify and /upload.
    pub server_url: String,

    /// Hosted store for the dataset browser.
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,

    pub max_input_chars: usize,
    pub browse_limit: usize,
    pub max_history: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_model: env_or("OPENAI_MODEL", "gpt-4.1"),
            server_url: env_or("SERVER_URL", "http://localhost:5000"),
            supabase_url: env::var("SUPABASE_URL").ok(),
            supabase_key: env::var("SUPABASE_KEY").ok(),
            max_input_chars: env_usize("HUGO_MAX_INPUT_CHARS", DEFAULT_MAX_INPUT_CHARS),
            browse_limit: env_usize("HUGO_BROWSE_LIMIT", DEFAULT_ROW_LIMIT),
            max_history: env_usize("HUGO_MAX_HISTORY", DEFAULT_MAX_MESSAGES),
        }
    }

    pub fn require_openai_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| HugoError::Config("OPENAI_API_KEY is not set".to_string()))
    }

    pub fn require_store(&self) -> Result<(&str, &str)> {
        match (self.supabase_url.as_deref(), self.supabase_key.as_deref()) {
            (Some(url), Some(key)) => Ok((url, key)),
            _ => Err(HugoError::Config(
                "SUPABASE_URL and SUPABASE_KEY must be set".to_string(),
            )),
        }
    }
}

fn env_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

fn env_usize(var: &str, default: usize) -> usize {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_store_settings_error() {
        let config = Config {
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_api_key: None,
            openai_model: "gpt-4.1".to_string(),
            server_url: "http://localhost:5000".to_string(),
            supabase_url: None,
            supabase_key: None,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            browse_limit: DEFAULT_ROW_LIMIT,
            max_history: DEFAULT_MAX_MESSAGES,
        };
        assert!(matches!(
            config.require_store().unwrap_err(),
            HugoError::Config(_)
        ));
        assert!(matches!(
            config.require_openai_key().unwrap_err(),
            HugoError::Config(_)
        ));
    }
}
