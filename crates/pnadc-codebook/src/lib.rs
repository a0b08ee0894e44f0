//! PNAD Contínua codebook interpreter.
//!
//! IBGE publishes the layout of the fixed-width microdata as a spreadsheet
//! ("dicionário") where variable rows and value-label rows share one sheet.
//! This crate turns that sheet into a validated [`pnadc_model::Schema`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pnadc_codebook::build_schema;
//!
//! let schema = build_schema(Path::new("dicionario_PNADC_microdados_trimestral.xls"))?;
//! for column in &schema {
//!     println!("{} @ {}+{}", column.name, column.start, column.width);
//! }
//! ```

mod classify;
mod error;
mod interpreter;
mod layout;
mod sheet;

// === Error Types ===
pub use error::{CodebookError, Result};

// === Layout ===
pub use layout::CodebookLayout;

// === Row Loading ===
pub use sheet::{CodebookRows, format_number, read_codebook_rows};

// === Row Classification ===
pub use classify::{CodebookRow, LabelRow, SkipReason, VariableRow, classify_row};

// === Schema Construction ===
pub use interpreter::{build_schema, build_schema_from_rows, build_schema_with_layout};
