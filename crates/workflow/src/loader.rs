use crate::error::{Result, WorkflowError};
use crate::job::TransformResult;
use sheetmorph_client::TransformClient;
use sheetmorph_sheet::{decode_named_sheet, PreviewModel, SheetError};

/// Sheet name the service writes transformed rows into
pub const RESULT_SHEET_NAME: &str = "Transformed Data";

/// Fetch and decode the transformed artifact into a preview.
///
/// The artifact must contain a sheet named [`RESULT_SHEET_NAME`]; its
/// absence is reported explicitly rather than as an empty preview.
/// Callers treat any error here as a degraded preview, never as a
/// failure of the workflow itself.
///
/// # Errors
///
/// [`WorkflowError::OutputDownload`] when the artifact cannot be
/// fetched, [`WorkflowError::OutputSheetMissing`] when the expected
/// sheet is absent, [`WorkflowError::DecodePreview`] when the bytes do
/// not decode.
pub async fn fetch_result_preview(
    client: &TransformClient,
    result: &TransformResult,
) -> Result<PreviewModel> {
    let bytes = client
        .download(&result.output_url)
        .await
        .map_err(|_| WorkflowError::OutputDownload)?;

    let decoded = decode_named_sheet(&bytes, RESULT_SHEET_NAME).map_err(|err| match err {
        SheetError::SheetNotFound { name } => WorkflowError::OutputSheetMissing { name },
        other => WorkflowError::DecodePreview { source: other },
    })?;

    Ok(PreviewModel::build(decoded.sheet, decoded.used_range)
        .with_source(result.output_file_name(), result.size))
}
