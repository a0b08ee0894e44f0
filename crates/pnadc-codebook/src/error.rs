//! Error types for codebook interpretation.

use std::path::PathBuf;

use pnadc_model::SchemaParseError;
use thiserror::Error;

/// Errors that can occur while turning a codebook into a schema.
///
/// Reader failures (missing file, unreadable workbook, malformed CSV) pass
/// through unchanged; only structural problems with the codebook contents
/// are reported as [`SchemaParseError`].
#[derive(Debug, Error)]
pub enum CodebookError {
    /// The codebook contents are structurally inconsistent.
    #[error(transparent)]
    Schema(#[from] SchemaParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Spreadsheet(#[from] calamine::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// The requested worksheet does not exist in the workbook.
    #[error("worksheet '{sheet}' not found in {path}")]
    SheetNotFound { sheet: String, path: PathBuf },
}

/// Result type for codebook operations.
pub type Result<T> = std::result::Result<T, CodebookError>;
