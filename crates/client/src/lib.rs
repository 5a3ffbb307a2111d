//! # sheetmorph-client
//!
//! Async HTTP client for the remote spreadsheet transformation
//! service: multipart file upload, the transform call itself, and the
//! download of the produced artifact.
//!
//! The service contract is two POSTs plus a plain GET:
//! `{base}/upload-file` (multipart, field `file`) returns
//! `{file_url, size}`; `{base}/transform-excel` (JSON) returns the
//! output URL, the generated transformation code, and a change
//! summary; the output URL serves the transformed workbook bytes.

mod error;
mod types;

pub use error::{ClientError, Result};
pub use types::{
    ChangeSummary, ColumnChanges, RowChanges, TransformRequest, TransformResponse, UploadResult,
};

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for one transformation service instance
#[derive(Debug, Clone)]
pub struct TransformClient {
    client: Client,
    base_url: String,
}

impl TransformClient {
    /// Construct a client with the default 30-second request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the underlying HTTP
    /// client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Construct a client with a custom per-request timeout.
    ///
    /// A request that exceeds the timeout surfaces as
    /// [`ClientError::Timeout`] instead of hanging.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the underlying HTTP
    /// client cannot be built.
    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            // Disable system proxy lookup to avoid macOS system-configuration issues
            .no_proxy()
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(TransformClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The service base URL, without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a spreadsheet as a multipart form with field `file`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Upload`] on any non-2xx status,
    /// [`ClientError::Timeout`] when the request times out.
    pub async fn upload_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResult> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        tracing::debug!(file_name, "uploading spreadsheet");

        let response = self
            .client
            .post(format!("{}/upload-file", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Upload { status });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Json(e.to_string()))
    }

    /// Ask the service to transform a previously uploaded file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transform`] on any non-2xx status,
    /// [`ClientError::Timeout`] when the request times out.
    pub async fn transform(&self, request: &TransformRequest) -> Result<TransformResponse> {
        tracing::debug!(url = %request.url, "requesting transformation");

        let response = self
            .client
            .post(format!("{}/transform-excel", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Transform { status });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Json(e.to_string()))
    }

    /// Fetch the transformed artifact's raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Download`] on any non-2xx status,
    /// [`ClientError::Timeout`] when the request times out.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Download { status });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(ClientError::transport)?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = TransformClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_with_timeout_builds() {
        assert!(TransformClient::with_timeout("http://localhost:8000", 5).is_ok());
    }
}
