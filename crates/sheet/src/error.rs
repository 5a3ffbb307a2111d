use thiserror::Error;

/// Errors that can occur during sheet operations
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("unsupported file type: {name} (expected .xlsx, .xls or .xlsm)")]
    UnsupportedExtension { name: String },

    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error("sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("workbook contains no sheets")]
    NoSheets,
}

pub type Result<T> = std::result::Result<T, SheetError>;
