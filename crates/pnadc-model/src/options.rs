//! Configuration options for reading microdata files.

use serde::{Deserialize, Serialize};

/// Default number of lines extracted per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

/// Options controlling how a microdata file is read.
///
/// None of these options change the meaning of the data: `chunk_size` and
/// `encoding` only affect how bytes are buffered and decoded, while
/// `row_limit` and `column_filter` select a subset of the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderOptions {
    /// Read at most this many data lines.
    pub row_limit: Option<usize>,

    /// Output only these columns, in this order.
    ///
    /// Every name must exist in the schema. Only the listed fields are
    /// extracted from each line.
    pub column_filter: Option<Vec<String>>,

    /// WHATWG label of the file encoding (e.g. `latin1`, `utf-8`).
    /// Defaults to UTF-8.
    pub encoding: Option<String>,

    /// Number of lines gathered before they are appended to the output.
    /// Defaults to [`DEFAULT_CHUNK_SIZE`]. Output is identical for any value.
    pub chunk_size: Option<usize>,
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_filter = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = Some(size);
        self
    }

    /// Effective chunk size (never zero).
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE).max(1)
    }
}
