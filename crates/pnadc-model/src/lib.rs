//! Data model for PNAD Contínua microdata.
//!
//! A [`Schema`] is an ordered list of [`ColumnSpec`]s derived from the survey
//! codebook. It drives fixed-width extraction and optional decoding of
//! categorical codes through each column's [`ValueLabels`].

pub mod column;
pub mod error;
pub mod options;
pub mod schema;

pub use column::{
    ColumnSpec, LabelLookup, MISSING_LABEL, ValueLabel, ValueLabels, normalize_numeric_key,
};
pub use error::SchemaParseError;
pub use options::{DEFAULT_CHUNK_SIZE, ReaderOptions};
pub use schema::Schema;
