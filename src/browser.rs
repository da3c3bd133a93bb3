//! Dataset Browser - read-only paginated peek at a catalog table
//!
//! Reads rows straight from the hosted store's REST interface. The table
//! name is validated against the catalog before any request goes out, so an
//! unknown name is a lookup failure, never an empty success.

use crate::catalog::SchemaCatalog;
use crate::error::{HugoError, Result};
use tracing::debug;

pub const DEFAULT_ROW_LIMIT: usize = 100;

/// A fetched row as returned by the store, column name to JSON value.
pub type Row = serde_json::Map<String, serde_json::Value>;

#[derive(Clone)]
pub struct DatasetBrowser {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DatasetBrowser {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Fetch up to `limit` rows of `table`. An empty table yields an empty
    /// vec, which is a normal state for the caller to render as such.
    pub async fn fetch(
        &self,
        catalog: &SchemaCatalog,
        table: &str,
        limit: usize,
    ) -> Result<Vec<Row>> {
        catalog.resolve(table)?;

        let url = format!(
            "{}/rest/v1/{}?select=*&limit={}",
            self.base_url, table, limit
        );
        debug!("Fetching rows: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| HugoError::Network(format!("Row fetch failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HugoError::Network(format!("Failed to read rows: {}", e)))?;

        if !status.is_success() {
            return Err(HugoError::Network(format!(
                "Store returned {}: {}",
                status, body
            )));
        }

        let rows: Vec<Row> = serde_json::from_str(&body)?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_table_fails_before_any_request() {
        // Unroutable base URL: reaching the network would error differently.
        let browser = DatasetBrowser::new("http://127.0.0.1:0".to_string(), "key".to_string());
        let catalog = SchemaCatalog::procurement();
        let err = browser
            .fetch(&catalog, "not_a_table", DEFAULT_ROW_LIMIT)
            .await
            .unwrap_err();
        assert!(matches!(err, HugoError::UnknownTable(_)));
    }
}
