//! PNAD Contínua microdata loading.
//!
//! The microdata file has no delimiters: each line is one person record and
//! each variable occupies a fixed byte range given by the codebook. This
//! crate slices those ranges into a Polars [`DataFrame`](polars::prelude::DataFrame),
//! infers numeric types and optionally swaps categorical codes for their
//! labels.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pnadc_ingest::{ReaderOptions, build_schema, load};
//!
//! let schema = build_schema(Path::new("dicionario.xls"))?;
//! let df = load(
//!     Path::new("PNADC_012023.txt"),
//!     &schema,
//!     true,
//!     &ReaderOptions::new().with_row_limit(1000),
//! )?;
//! ```

mod coerce;
mod error;
mod fields;
mod fixed_width;
mod labels;
mod loader;
mod polars_utils;
mod read;

// === Error Types ===
pub use error::{LoadError, MicrodataParseError, ReadError, Result};

// === Column Selection ===
pub use fields::{FieldDescriptor, field_descriptors, select_columns};

// === Fixed-Width Extraction ===
pub use fixed_width::{FixedWidthReader, resolve_encoding};

// === Typing and Labels ===
pub use coerce::{ColumnKind, coerce_column, infer_kind};
pub use labels::{LabelStats, apply_value_labels};

// === Loading ===
pub use loader::{load, type_columns};
pub use read::read_pnadc;

// === Display ===
pub use polars_utils::{any_to_string, row_strings};

// === Re-exports ===
pub use pnadc_codebook::build_schema;
pub use pnadc_model::{ReaderOptions, Schema};
