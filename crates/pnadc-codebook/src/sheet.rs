//! Loading codebook rows from a workbook or CSV export.
//!
//! Every cell is rendered as trimmed text. Numeric spreadsheet cells lose
//! their float formatting (`1.0` → `"1"`) so positions, widths and codes look
//! the same whether they came from a workbook or a CSV export.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{CodebookError, Result};
use crate::layout::CodebookLayout;

/// Rows of text cells; index 0 is the first row of the sheet.
pub type CodebookRows = Vec<Vec<String>>;

/// Read all rows of the codebook, preamble included.
///
/// Files ending in `.csv` are parsed with the `csv` crate; anything else is
/// opened as a workbook (`.xls`, `.xlsx`, `.xlsm`, `.xlsb`, `.ods`).
pub fn read_codebook_rows(path: &Path, layout: &CodebookLayout) -> Result<CodebookRows> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let rows = if is_csv {
        read_csv_rows(path)?
    } else {
        read_workbook_rows(path, layout)?
    };
    debug!(path = %path.display(), rows = rows.len(), "read codebook rows");
    Ok(rows)
}

/// Rows are placed at their source line, so empty lines (which the `csv`
/// reader does not yield) still occupy a row index. A quoted cell spanning
/// several lines is followed by empty rows for the lines it consumed.
fn read_csv_rows(path: &Path) -> Result<CodebookRows> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut rows: CodebookRows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(position) = record.position() {
            let index = usize::try_from(position.line().saturating_sub(1)).unwrap_or(rows.len());
            if index > rows.len() {
                rows.resize(index, Vec::new());
            }
        }
        rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(rows)
}

fn read_workbook_rows(path: &Path, layout: &CodebookLayout) -> Result<CodebookRows> {
    let mut workbook = open_workbook_auto(path)?;
    let range = match &layout.sheet {
        Some(sheet) => {
            if !workbook.sheet_names().iter().any(|name| name == sheet) {
                return Err(CodebookError::SheetNotFound {
                    sheet: sheet.clone(),
                    path: path.to_path_buf(),
                });
            }
            workbook.worksheet_range(sheet)?
        }
        None => match workbook.worksheet_range_at(0) {
            Some(range) => range?,
            None => return Ok(Vec::new()),
        },
    };
    Ok(range_to_rows(&range))
}

/// Convert a worksheet range to rows anchored at cell A1.
///
/// Calamine ranges start at the first used cell, so leading empty rows and
/// columns are restored to keep layout indexes absolute.
fn range_to_rows(range: &Range<Data>) -> CodebookRows {
    let (row_offset, col_offset) = range
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));
    let mut rows: CodebookRows = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![String::new(); col_offset];
        cells.extend(row.iter().map(cell_to_string));
        rows.push(cells);
    }
    rows
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => normalize_cell(value),
        Data::Float(value) => format_number(*value),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        other => normalize_cell(&other.to_string()),
    }
}

/// Render a spreadsheet number without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}
