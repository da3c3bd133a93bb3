//! Data Ingestion Uploader - batch file upload to the ingestion endpoint
//!
//! All files go out in one multipart request under the `files` field. The
//! backend parses and loads them asynchronously; success is reported by
//! status code only, with no per-file granularity. An empty batch never
//! issues a request.

use crate::error::{HugoError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// File types the ingestion backend knows how to parse.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["csv", "txt", "eml", "pdf"];

#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    files: Vec<UploadFile>,
}

pub fn is_accepted(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            ACCEPTED_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

impl UploadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the batch; unsupported extensions are skipped.
    pub fn push(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        let name = name.into();
        if !is_accepted(&name) {
            warn!("Skipping '{}': unsupported file type", name);
            return;
        }
        self.files.push(UploadFile { name, bytes });
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

#[derive(Clone)]
pub struct Uploader {
    client: reqwest::Client,
    base_url: String,
}

impl Uploader {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Send the whole batch as one multipart request. All-or-nothing: a
    /// non-2xx status rejects the batch with the backend's raw body.
    pub async fn upload(&self, batch: UploadBatch) -> Result<()> {
        if batch.is_empty() {
            debug!("Empty upload batch, nothing to send");
            return Ok(());
        }

        let count = batch.len();
        let mut form = reqwest::multipart::Form::new();
        for file in batch.files {
            let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.name);
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| HugoError::Network(format!("Upload request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            info!("Uploaded {} file(s)", count);
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(HugoError::UploadRejected(body))
        }
    }
}
