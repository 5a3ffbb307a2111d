use crate::error::{Result, WorkflowError};
use serde::{Deserialize, Serialize};
use sheetmorph_client::{
    ChangeSummary, ClientError, TransformClient, TransformRequest, TransformResponse, UploadResult,
};

/// The outcome of one completed pipeline run.
///
/// Owned by the workflow once the transform call succeeds; immutable;
/// discarded entirely on reset. The `size` is the uploaded file's size
/// as reported by the upload step, not the transform response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    pub output_url: String,
    pub transformation_code: String,
    pub changes: ChangeSummary,
    pub size: u64,
}

impl TransformResult {
    /// Merge the upload's size into the transform response
    #[must_use]
    pub fn from_response(response: TransformResponse, size: u64) -> Self {
        TransformResult {
            output_url: response.output_url,
            transformation_code: response.transformation_code,
            changes: response.changes,
            size,
        }
    }

    /// Last path segment of the output URL, shown as the result's file name
    #[must_use]
    pub fn output_file_name(&self) -> &str {
        self.output_url
            .rsplit('/')
            .next()
            .unwrap_or(&self.output_url)
    }
}

/// A snapshot of everything one pipeline run needs, detached from the
/// workflow so the run can be awaited while the workflow stays free to
/// be reset. The run id ties completions back to the state machine;
/// outcomes from a run that is no longer current are dropped there.
#[derive(Debug, Clone)]
pub struct SubmissionJob {
    run: u64,
    file_name: String,
    bytes: Vec<u8>,
    prompt: String,
    tab_name: Option<String>,
}

impl SubmissionJob {
    pub(crate) fn new(
        run: u64,
        file_name: String,
        bytes: Vec<u8>,
        prompt: String,
        tab_name: Option<String>,
    ) -> Self {
        SubmissionJob {
            run,
            file_name,
            bytes,
            prompt,
            tab_name,
        }
    }

    /// Identifier of the run this job belongs to
    #[must_use]
    pub fn run_id(&self) -> u64 {
        self.run
    }

    /// First pipeline phase: upload the spreadsheet bytes.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::UploadFailed`] on any failure; the
    /// transform phase must not run after that.
    pub async fn upload(&self, client: &TransformClient) -> Result<UploadResult> {
        client
            .upload_file(&self.file_name, self.bytes.clone())
            .await
            .map_err(|err| WorkflowError::UploadFailed {
                detail: error_detail(err),
            })
    }

    /// Second pipeline phase: request the transformation of the
    /// uploaded file and fold the upload's size into the result.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::TransformFailed`] on any failure.
    pub async fn transform(
        &self,
        client: &TransformClient,
        upload: UploadResult,
    ) -> Result<TransformResult> {
        let request = TransformRequest {
            url: upload.file_url,
            prompt: self.prompt.clone(),
            tab_name: self.tab_name.clone(),
        };

        let response = client
            .transform(&request)
            .await
            .map_err(|err| WorkflowError::TransformFailed {
                detail: error_detail(err),
            })?;

        Ok(TransformResult::from_response(response, upload.size))
    }
}

fn error_detail(err: ClientError) -> String {
    match err {
        ClientError::Upload { status }
        | ClientError::Transform { status }
        | ClientError::Download { status } => status.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetmorph_client::{ColumnChanges, RowChanges};

    fn response() -> TransformResponse {
        TransformResponse {
            output_url: "https://files.example/artifacts/out.xlsx".to_string(),
            transformation_code: "df".to_string(),
            changes: ChangeSummary {
                rows: RowChanges {
                    original: 10,
                    transformed: 5,
                },
                columns: ColumnChanges {
                    original: 3,
                    transformed: 3,
                    added: Vec::new(),
                },
            },
        }
    }

    #[test]
    fn test_size_comes_from_upload() {
        let result = TransformResult::from_response(response(), 100);
        assert_eq!(result.size, 100);
    }

    #[test]
    fn test_output_file_name_is_last_segment() {
        let result = TransformResult::from_response(response(), 1);
        assert_eq!(result.output_file_name(), "out.xlsx");
    }
}
