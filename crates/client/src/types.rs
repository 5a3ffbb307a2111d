use serde::{Deserialize, Serialize};

/// Response of the upload endpoint. Lives only between the upload and
/// transform calls; its size is folded into the final result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub file_url: String,
    pub size: u64,
}

/// Request body of the transform endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRequest {
    pub url: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_name: Option<String>,
}

/// Row counts before and after the transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowChanges {
    pub original: u64,
    pub transformed: u64,
}

/// Column counts before and after, plus the names of added columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnChanges {
    pub original: u64,
    pub transformed: u64,
    #[serde(default)]
    pub added: Vec<String>,
}

/// What the transformation changed, as reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub rows: RowChanges,
    pub columns: ColumnChanges,
}

/// Response of the transform endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResponse {
    pub output_url: String,
    pub transformation_code: String,
    pub changes: ChangeSummary,
}
