//! Error types for microdata loading.

use pnadc_codebook::CodebookError;
use thiserror::Error;

/// The microdata file does not fit the requested schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MicrodataParseError {
    /// A filtered column is not declared in the schema.
    #[error("column '{name}' does not exist in the schema")]
    UnknownColumn { name: String },

    /// The column filter selects nothing.
    #[error("column filter is empty")]
    EmptyColumnFilter,

    /// A data line ends before the last requested field.
    #[error(
        "line {line} has {length} bytes but column '{column}' needs {required}"
    )]
    LineTooShort {
        /// 1-based line number.
        line: usize,
        length: usize,
        required: usize,
        column: String,
    },
}

/// Errors that can occur while loading a microdata file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Microdata(#[from] MicrodataParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The encoding label is not a WHATWG encoding name.
    #[error("unsupported encoding '{label}'")]
    UnsupportedEncoding { label: String },

    /// DataFrame construction failed.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for LoadError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Errors from [`crate::read_pnadc`]: either stage, unchanged.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Codebook(#[from] CodebookError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;
