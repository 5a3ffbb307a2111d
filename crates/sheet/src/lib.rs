//! Sheet module for sheetmorph
//!
//! Provides the in-memory grid model behind spreadsheet previews:
//! decoding xlsx/xls/xlsm byte buffers into a [`Sheet`], building a
//! [`PreviewModel`] bounded by the container's declared used range, and
//! computing which columns a transformation introduced.
//!
//! # Examples
//!
//! ## Building a preview from data
//!
//! ```
//! use sheetmorph_sheet::{PreviewModel, Sheet, UsedRange};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["Name", "Age", "City"],
//!     vec!["Alice", "30", "NYC"],
//!     vec!["Bob", "25", "LA"],
//! ]);
//!
//! let preview = PreviewModel::build(sheet, UsedRange::new(2, 2));
//! assert_eq!(preview.total_rows(), 3);
//! assert_eq!(preview.total_cols(), 3);
//! ```
//!
//! ## Detecting added columns
//!
//! ```
//! use sheetmorph_sheet::added_columns;
//!
//! let added = added_columns(
//!     &["Name".into(), "Age".into()],
//!     &["Name".into(), "Age".into(), "Profit".into()],
//! );
//! assert!(added.contains("Profit"));
//! ```
//!
//! The truncation policy lives entirely on the view side: a
//! [`PreviewModel`] always retains the full decoded grid, and
//! [`PreviewModel::render`] caps the output at 16 rows and 12 columns,
//! summarizing whatever was cut.

mod cell;
mod changes;
mod error;
mod preview;
mod sheet;
mod validate;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export added-column detection.
pub use changes::added_columns;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export preview model and bounded view types.
pub use preview::{
    ColumnHeading, PreviewModel, RenderedTable, PREVIEW_COL_LIMIT, PREVIEW_ROW_LIMIT,
};
/// Re-export sheet type.
pub use sheet::Sheet;
/// Re-export file-name validation.
pub use validate::{validate_file_name, SUPPORTED_EXTENSIONS};
/// Re-export byte-buffer decoding.
pub use xlsx::{decode_first_sheet, decode_named_sheet, DecodedSheet, UsedRange};
