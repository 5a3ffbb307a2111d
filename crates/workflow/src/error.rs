use sheetmorph_sheet::SheetError;
use thiserror::Error;

/// The single error channel every pipeline failure is normalized into.
///
/// All variants are recovered at the pipeline boundary and leave the
/// workflow in an actionable phase. The download/missing-sheet pair is
/// special: those degrade only the inline result preview, since the
/// transformation itself already succeeded server-side.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("unsupported file type: {name} (expected .xlsx, .xls or .xlsm)")]
    InvalidFileType { name: String },

    #[error("failed to preview file: {source}")]
    DecodePreview {
        #[source]
        source: SheetError,
    },

    #[error("a selected file and a non-empty prompt are required")]
    EmptySubmission,

    #[error("upload failed: {detail}")]
    UploadFailed { detail: String },

    #[error("transformation failed: {detail}")]
    TransformFailed { detail: String },

    #[error("failed to download transformed file for preview")]
    OutputDownload,

    #[error("sheet \"{name}\" not found in the output file")]
    OutputSheetMissing { name: String },
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
