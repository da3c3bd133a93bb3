//! Query/Modify Gateway - forwards user intent to the backend executor
//!
//! The backend runs the actual database work and answers over two JSON
//! endpoints. Calls are synchronous per chat turn, never retried; a non-2xx
//! response surfaces the backend's raw text unchanged.

use crate::error::{HugoError, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Timeout applied to the modify path only, matching the reference backend
/// contract. The query path has no client-side timeout.
const MODIFY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifyOutcome {
    pub modified_rows: u64,
}

impl ModifyOutcome {
    pub fn summary(&self) -> String {
        format!("Success: Changed {} rows.", self.modified_rows)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    status: String,
    #[serde(default)]
    response: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModifyResponse {
    #[serde(default)]
    modified_rows: u64,
}

#[derive(Clone)]
pub struct Gateway {
    client: reqwest::Client,
    base_url: String,
}

impl Gateway {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Forward a natural-language query to the backend and return its answer.
    pub async fn query(&self, user_input: &str) -> Result<String> {
        debug!("Gateway query: {}", user_input);
        let response = self
            .client
            .post(format!("{}/query", self.base_url))
            .json(&serde_json::json!({ "user_input": user_input }))
            .send()
            .await
            .map_err(|e| HugoError::Network(format!("Query request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HugoError::Network(format!("Failed to read query response: {}", e)))?;

        interpret_query_response(status, &body)
    }

    /// Forward a natural-language modification request to the backend.
    pub async fn modify(&self, user_input: &str) -> Result<ModifyOutcome> {
        debug!("Gateway modify: {}", user_input);
        let response = self
            .client
            .post(format!("{}/modify", self.base_url))
            .timeout(MODIFY_TIMEOUT)
            .json(&serde_json::json!({ "user_input": user_input }))
            .send()
            .await
            .map_err(|e| HugoError::Network(format!("Modify request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HugoError::Network(format!("Failed to read modify response: {}", e)))?;

        interpret_modify_response(status, &body)
    }
}

/// Map a raw `/query` response to an answer string or a gateway error.
pub fn interpret_query_response(status: reqwest::StatusCode, body: &str) -> Result<String> {
    if !status.is_success() {
        return Err(HugoError::Gateway(body.to_string()));
    }

    let parsed: QueryResponse = serde_json::from_str(body)
        .map_err(|e| HugoError::Gateway(format!("Unreadable backend response: {}", e)))?;

    if parsed.status == "success" {
        let answer = match parsed.response {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        Ok(answer)
    } else {
        Err(HugoError::Gateway(
            parsed.error.unwrap_or_else(|| "Unknown error".to_string()),
        ))
    }
}

/// Map a raw `/modify` response to a row-count outcome or a gateway error.
pub fn interpret_modify_response(
    status: reqwest::StatusCode,
    body: &str,
) -> Result<ModifyOutcome> {
    if !status.is_success() {
        return Err(HugoError::Gateway(body.to_string()));
    }

    let parsed: ModifyResponse = serde_json::from_str(body)
        .map_err(|e| HugoError::Gateway(format!("Unreadable backend response: {}", e)))?;

    Ok(ModifyOutcome {
        modified_rows: parsed.modified_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn query_success_returns_response_text() {
        let body = r#"{"status": "success", "response": "3 parts are below minimum stock."}"#;
        let answer = interpret_query_response(StatusCode::OK, body).unwrap();
        assert_eq!(answer, "3 parts are below minimum stock.");
    }

    #[test]
    fn query_non_2xx_carries_raw_backend_text() {
        let body = "table lock timeout";
        let err = interpret_query_response(StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
        match err {
            HugoError::Gateway(msg) => assert_eq!(msg, "table lock timeout"),
            other => panic!("expected Gateway error, got {:?}", other),
        }
    }

    #[test]
    fn query_backend_error_status_surfaces_error_field() {
        let body = r#"{"status": "error", "error": "no rows matched"}"#;
        let err = interpret_query_response(StatusCode::OK, body).unwrap_err();
        match err {
            HugoError::Gateway(msg) => assert_eq!(msg, "no rows matched"),
            other => panic!("expected Gateway error, got {:?}", other),
        }
    }

    #[test]
    fn modify_success_parses_row_count() {
        let outcome =
            interpret_modify_response(StatusCode::OK, r#"{"modified_rows": 4}"#).unwrap();
        assert_eq!(outcome.modified_rows, 4);
        assert_eq!(outcome.summary(), "Success: Changed 4 rows.");
    }

    #[test]
    fn modify_non_2xx_carries_raw_backend_text() {
        let err = interpret_modify_response(StatusCode::BAD_REQUEST, "unsafe statement").unwrap_err();
        match err {
            HugoError::Gateway(msg) => assert_eq!(msg, "unsafe statement"),
            other => panic!("expected Gateway error, got {:?}", other),
        }
    }
}
