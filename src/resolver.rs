//! Table-Relevance Resolver - maps free-text user intent to catalog tables
//!
//! One prompt-templated chat-completion call per invocation, no retries.
//! The raw model text is parsed into a strict candidate list; parse failure
//! is a `MalformedResponse`, and candidates naming tables outside the
//! catalog are filtered before anything is surfaced.

use crate::catalog::SchemaCatalog;
use crate::error::{HugoError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "You are a database assistant. Your job is to accurately map user queries to existing database tables based on a given schema description. Only use the provided tables, and explain relevance clearly.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelevanceCandidate {
    pub table_name: String,
    pub reason: String,
}

#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    async fn call(&self, system: &str, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.1,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| HugoError::Network(format!("LLM API call failed: {}", e)))?;

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| HugoError::Network(format!("Failed to read LLM response: {}", e)))?;

        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                HugoError::MalformedResponse("No content in LLM response".to_string())
            })?;

        Ok(content.to_string())
    }
}

pub struct TableResolver {
    llm: LlmClient,
    max_input_chars: usize,
}

impl TableResolver {
    pub fn new(llm: LlmClient, max_input_chars: usize) -> Self {
        Self {
            llm,
            max_input_chars,
        }
    }

    /// Resolve the user's request to a list of relevant catalog tables.
    ///
    /// Exactly one outbound LLM call; fails fast on transport errors.
    pub async fn resolve(
        &self,
        user_input: &str,
        catalog: &SchemaCatalog,
    ) -> Result<Vec<RelevanceCandidate>> {
        let trimmed = user_input.trim();
        if trimmed.is_empty() {
            return Err(HugoError::InvalidInput("Empty user input".to_string()));
        }

        // Truncate over-long input to respect downstream token limits.
        let bounded: String = trimmed.chars().take(self.max_input_chars).collect();
        if bounded.len() < trimmed.len() {
            warn!(
                "User input truncated from {} to {} chars",
                trimmed.chars().count(),
                self.max_input_chars
            );
        }

        let prompt = build_prompt(catalog, &bounded);
        let raw = self.llm.call(SYSTEM_PROMPT, &prompt).await?;
        debug!("Raw resolver response: {}", raw);

        parse_candidates(&raw, catalog)
    }
}

/// Build the single resolver prompt: full schema, user input, output rules.
pub fn build_prompt(catalog: &SchemaCatalog, user_input: &str) -> String {
    format!(
        r#"{schema}

Based on the schema above and the user input below:
{input}

Your task is to:
- Identify which tables from the schema are relevant to answer the user's request.
- For each relevant table, output:
  - `table_name`: the exact name of the table
  - `reason`: a short explanation (1-2 sentences) why this table is relevant

Important rules:
- Only pick tables defined in the schema.
- If no table fits, return an empty list.
- Do not invent or guess missing tables.
- Keep your reasoning clear and concise.

Format your final response as a JSON list of objects, like:
[
  {{"table_name": "material_master", "reason": "Contains information about materials and parts."}},
  {{"table_name": "suppliers", "reason": "Lists suppliers which may be needed for material sourcing."}}
]

Only return the JSON list, no other text."#,
        schema = catalog.describe(),
        input = user_input,
    )
}

/// Parse raw model output into candidates and enforce catalog membership.
pub fn parse_candidates(raw: &str, catalog: &SchemaCatalog) -> Result<Vec<RelevanceCandidate>> {
    // Models sometimes wrap JSON in markdown code fences.
    let cleaned = raw
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let parsed: Vec<RelevanceCandidate> = serde_json::from_str(cleaned)
        .map_err(|e| HugoError::MalformedResponse(format!("Failed to parse candidate list: {}", e)))?;

    let mut candidates = Vec::with_capacity(parsed.len());
    for c in parsed {
        if catalog.contains(&c.table_name) {
            candidates.push(c);
        } else {
            warn!("Model named unknown table '{}', dropping candidate", c.table_name);
        }
    }
    Ok(candidates)
}
