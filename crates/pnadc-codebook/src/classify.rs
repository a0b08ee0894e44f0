//! Row classification for the dictionary sheet.
//!
//! The sheet mixes three kinds of rows in a single table:
//!
//! 1. **Variable rows**: position, width and variable code are filled. The
//!    first category of a categorical variable often sits on the same row.
//! 2. **Label rows**: only the category code and label columns are filled;
//!    they continue the value labels of the variable above.
//! 3. **Everything else**: blank rows, section titles such as
//!    `Parte 2 - Características gerais dos moradores`, repeated header rows,
//!    and category cells that describe a range or free value (`1 a 130`,
//!    `Valor`) rather than a single code.
//!
//! [`classify_row`] maps one row to a [`CodebookRow`] without looking at its
//! neighbours; association between label rows and variables is the job of
//! the interpreter.

use pnadc_model::SchemaParseError;

use crate::layout::CodebookLayout;

/// Largest accepted position or width.
const MAX_OFFSET: f64 = u32::MAX as f64;

/// A classified codebook row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodebookRow {
    Variable(VariableRow),
    Label(LabelRow),
    Skip(SkipReason),
}

/// A row declaring a new variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRow {
    pub name: String,
    /// 0-indexed byte offset (the sheet is 1-indexed).
    pub start: usize,
    pub width: usize,
    pub description: Option<String>,
    /// First category declared on the variable row itself.
    pub first_label: Option<LabelRow>,
}

/// A category code and its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRow {
    pub code: String,
    pub label: String,
}

/// Why a row carries no schema information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    SectionTitle,
    Header,
    /// Category cell is a range or free-text value, not a code.
    NonNumericCategory,
    /// Category code without a label.
    UnlabeledCategory,
}

/// Classify one sheet row. `row_number` is the 1-based row used in errors.
pub fn classify_row(
    row: &[String],
    row_number: usize,
    layout: &CodebookLayout,
) -> Result<CodebookRow, SchemaParseError> {
    let position = cell(row, layout.position_col);
    let width = cell(row, layout.width_col);
    let name = cell(row, layout.name_col);

    if position.is_empty() && width.is_empty() && name.is_empty() {
        return Ok(match category(row, layout) {
            Ok(Some(label)) => CodebookRow::Label(label),
            Ok(None) => CodebookRow::Skip(SkipReason::Blank),
            Err(reason) => CodebookRow::Skip(reason),
        });
    }

    if !is_number(position) && width.is_empty() && name.is_empty() {
        return Ok(CodebookRow::Skip(SkipReason::SectionTitle));
    }
    if !position.is_empty() && !is_number(position) && !width.is_empty() && !is_number(width) {
        return Ok(CodebookRow::Skip(SkipReason::Header));
    }

    let start = parse_positive(position, "position", row_number)? - 1;
    let width = parse_positive(width, "width", row_number)?;
    if name.is_empty() {
        return Err(SchemaParseError::MissingField {
            row: row_number,
            field: "name",
        });
    }
    let description = Some(cell(row, layout.description_col))
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    Ok(CodebookRow::Variable(VariableRow {
        name: name.to_string(),
        start,
        width,
        description,
        first_label: category(row, layout).ok().flatten(),
    }))
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map_or("", |value| value.trim())
}

fn is_number(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Read the category columns. `Ok(None)` when both are empty.
fn category(row: &[String], layout: &CodebookLayout) -> Result<Option<LabelRow>, SkipReason> {
    let code = cell(row, layout.category_col);
    let label = cell(row, layout.category_label_col);
    if code.is_empty() && label.is_empty() {
        return Ok(None);
    }
    if !is_number(code) {
        return Err(SkipReason::NonNumericCategory);
    }
    if label.is_empty() {
        return Err(SkipReason::UnlabeledCategory);
    }
    Ok(Some(LabelRow {
        code: code.to_string(),
        label: label.to_string(),
    }))
}

fn parse_positive(
    value: &str,
    field: &'static str,
    row_number: usize,
) -> Result<usize, SchemaParseError> {
    if value.is_empty() {
        return Err(SchemaParseError::MissingField {
            row: row_number,
            field,
        });
    }
    let invalid = || SchemaParseError::InvalidNumber {
        row: row_number,
        field,
        value: value.to_string(),
    };
    let parsed = value.parse::<f64>().map_err(|_| invalid())?;
    if !parsed.is_finite() || parsed.fract() != 0.0 || !(1.0..=MAX_OFFSET).contains(&parsed) {
        return Err(invalid());
    }
    Ok(parsed as usize)
}
