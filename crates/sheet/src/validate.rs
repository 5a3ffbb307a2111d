use crate::error::{Result, SheetError};

/// File extensions admitted into the transform pipeline
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "xlsm"];

/// Check a candidate file name against the extension allow-list.
///
/// Matches the substring after the last `.`, case-insensitively. A
/// name with no dot is rejected. Rejection is a plain predicate
/// failure; callers report it and take no further action.
///
/// # Errors
///
/// Returns [`SheetError::UnsupportedExtension`] when the name does not
/// end in a supported extension.
pub fn validate_file_name(name: &str) -> Result<()> {
    let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase());

    match extension {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(SheetError::UnsupportedExtension {
            name: name.to_string(),
        }),
    }
}
