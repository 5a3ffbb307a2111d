use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// The bounding rectangle of non-empty cells a container declares for a
/// sheet, as 0-based last row/column indices.
///
/// A sheet that declares no range at all falls back to a single-cell
/// range, so totals are always at least 1x1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedRange {
    pub last_row: u32,
    pub last_col: u32,
}

impl UsedRange {
    #[must_use]
    pub fn new(last_row: u32, last_col: u32) -> Self {
        UsedRange { last_row, last_col }
    }

    /// Total rows in the declared range, independent of truncation
    #[must_use]
    pub fn total_rows(&self) -> u32 {
        self.last_row + 1
    }

    /// Total columns in the declared range, independent of truncation
    #[must_use]
    pub fn total_cols(&self) -> u32 {
        self.last_col + 1
    }
}

/// A decoded sheet together with the used range the container declared
#[derive(Debug, Clone)]
pub struct DecodedSheet {
    pub sheet: Sheet,
    pub used_range: UsedRange,
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as serial day numbers since 1899-12-30
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// Decode the first sheet of a spreadsheet byte buffer.
///
/// # Errors
///
/// Returns [`SheetError::Workbook`] when the bytes are not a readable
/// container and [`SheetError::NoSheets`] when it holds no sheets.
pub fn decode_first_sheet(bytes: &[u8]) -> Result<DecodedSheet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| SheetError::Workbook(e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names.first().ok_or(SheetError::NoSheets)?.clone();

    read_sheet(&mut workbook, &first)
}

/// Decode a specific sheet of a spreadsheet byte buffer by name.
///
/// # Errors
///
/// Returns [`SheetError::SheetNotFound`] when no sheet carries that
/// name, and [`SheetError::Workbook`] when the container is unreadable.
pub fn decode_named_sheet(bytes: &[u8], sheet_name: &str) -> Result<DecodedSheet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| SheetError::Workbook(e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    if !sheet_names.iter().any(|name| name == sheet_name) {
        return Err(SheetError::SheetNotFound {
            name: sheet_name.to_string(),
        });
    }

    read_sheet(&mut workbook, sheet_name)
}

fn read_sheet<RS>(workbook: &mut calamine::Sheets<RS>, sheet_name: &str) -> Result<DecodedSheet>
where
    RS: std::io::Read + std::io::Seek,
{
    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| SheetError::Workbook(e.to_string()))?;

    let data: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| row.iter().map(data_to_cell_value).collect())
        .collect();

    let mut sheet = Sheet::with_name(sheet_name);
    *sheet.data_mut() = data;

    // A sheet with no range marker still previews as a 1x1 range.
    let (last_row, last_col) = range.end().unwrap_or((0, 0));

    Ok(DecodedSheet {
        sheet,
        used_range: UsedRange::new(last_row, last_col),
    })
}
