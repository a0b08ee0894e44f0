//! Fixed row/column layout of the IBGE dictionary spreadsheet.

use serde::{Deserialize, Serialize};

/// Where things live in the codebook sheet.
///
/// The published PNAD Contínua dictionary opens with three title rows and a
/// header row, then lists one variable per row:
///
/// | col | content |
/// |-----|---------|
/// | 0 | start position (1-indexed) |
/// | 1 | width |
/// | 2 | variable code |
/// | 3 | questionnaire item number (ignored) |
/// | 4 | description |
/// | 5 | category code |
/// | 6 | category label |
///
/// Additional categories of the same variable follow on rows where only
/// columns 5 and 6 are filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodebookLayout {
    /// Worksheet to read; the first sheet when `None`.
    pub sheet: Option<String>,
    /// 0-indexed row where variable definitions begin.
    pub data_start_row: usize,
    pub position_col: usize,
    pub width_col: usize,
    pub name_col: usize,
    pub description_col: usize,
    pub category_col: usize,
    pub category_label_col: usize,
}

impl Default for CodebookLayout {
    fn default() -> Self {
        Self {
            sheet: None,
            data_start_row: 4,
            position_col: 0,
            width_col: 1,
            name_col: 2,
            description_col: 4,
            category_col: 5,
            category_label_col: 6,
        }
    }
}

impl CodebookLayout {
    #[must_use]
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    #[must_use]
    pub fn with_data_start_row(mut self, row: usize) -> Self {
        self.data_start_row = row;
        self
    }
}
