use crate::cell::CellValue;
use crate::sheet::Sheet;
use crate::xlsx::UsedRange;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// At most this many rows are ever rendered (header + 15 data rows).
pub const PREVIEW_ROW_LIMIT: usize = 16;
/// At most this many columns are ever rendered per row.
pub const PREVIEW_COL_LIMIT: usize = 12;

/// A renderable snapshot of one decoded sheet.
///
/// Holds the full decoded grid; truncation is applied only by
/// [`PreviewModel::render`]. The totals come from the container's
/// declared used range and stay valid however much is rendered. A
/// model is built once per successful decode and replaced wholesale,
/// never patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewModel {
    sheet: Sheet,
    total_rows: u32,
    total_cols: u32,
    source_name: Option<String>,
    source_size: Option<u64>,
}

/// One visible column of a rendered preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeading {
    pub title: String,
    /// Set when the column was introduced by the transformation
    pub is_new: bool,
}

/// The bounded view of a [`PreviewModel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    /// Visible column headings, at most [`PREVIEW_COL_LIMIT`]
    pub columns: Vec<ColumnHeading>,
    /// True when the header row had more columns than are shown
    pub truncated_cols: bool,
    /// Visible data rows; a row wider than the column limit carries a
    /// single trailing `"..."` placeholder cell
    pub rows: Vec<Vec<String>>,
    /// Summary line for rows beyond the limit, e.g. `… +4 more rows`
    pub more_rows: Option<String>,
}

impl PreviewModel {
    /// Build a preview from a decoded sheet and its declared used range
    #[must_use]
    pub fn build(sheet: Sheet, used_range: UsedRange) -> Self {
        PreviewModel {
            sheet,
            total_rows: used_range.total_rows(),
            total_cols: used_range.total_cols(),
            source_name: None,
            source_size: None,
        }
    }

    /// Attach the source file's name and size
    #[must_use]
    pub fn with_source(mut self, name: impl Into<String>, size: u64) -> Self {
        self.source_name = Some(name.into());
        self.source_size = Some(size);
        self
    }

    /// The full decoded grid, untruncated
    #[must_use]
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// Total rows of the declared used range
    #[must_use]
    pub fn total_rows(&self) -> u32 {
        self.total_rows
    }

    /// Total columns of the declared used range
    #[must_use]
    pub fn total_cols(&self) -> u32 {
        self.total_cols
    }

    /// Name of the sheet this preview was decoded from
    #[must_use]
    pub fn sheet_name(&self) -> &str {
        self.sheet.name()
    }

    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    #[must_use]
    pub fn source_size(&self) -> Option<u64> {
        self.source_size
    }

    /// Produce the bounded view: at most [`PREVIEW_ROW_LIMIT`] rows and
    /// [`PREVIEW_COL_LIMIT`] columns, with overflow summarized.
    ///
    /// `new_columns` flags headings introduced by a transformation so a
    /// surface can highlight them; pass an empty set for input
    /// previews.
    #[must_use]
    pub fn render(&self, new_columns: &IndexSet<String>) -> RenderedTable {
        let header = self.sheet.row(0).unwrap_or(&[]);

        let columns: Vec<ColumnHeading> = header
            .iter()
            .take(PREVIEW_COL_LIMIT)
            .map(|cell| {
                let title = cell.as_str();
                let is_new = new_columns.contains(&title);
                ColumnHeading { title, is_new }
            })
            .collect();

        let rows: Vec<Vec<String>> = self
            .sheet
            .data()
            .iter()
            .skip(1)
            .take(PREVIEW_ROW_LIMIT - 1)
            .map(|row| {
                let mut cells: Vec<String> = row
                    .iter()
                    .take(PREVIEW_COL_LIMIT)
                    .map(CellValue::as_str)
                    .collect();
                if row.len() > PREVIEW_COL_LIMIT {
                    cells.push("...".to_string());
                }
                cells
            })
            .collect();

        let more_rows = (self.sheet.row_count() > PREVIEW_ROW_LIMIT).then(|| {
            format!(
                "… +{} more rows",
                self.total_rows.saturating_sub(PREVIEW_ROW_LIMIT as u32)
            )
        });

        RenderedTable {
            columns,
            truncated_cols: header.len() > PREVIEW_COL_LIMIT,
            rows,
            more_rows,
        }
    }
}
