//! One-call entry point: codebook plus microdata to a DataFrame.

use std::path::Path;

use polars::prelude::DataFrame;

use pnadc_codebook::build_schema;
use pnadc_model::ReaderOptions;

use crate::error::ReadError;
use crate::loader::load;

/// Read PNAD Contínua microdata using its codebook.
///
/// The schema is derived fresh from `codebook_path` on every call, then the
/// microdata file is loaded with it. Errors from either stage are returned
/// unchanged.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use pnadc_ingest::{ReaderOptions, read_pnadc};
///
/// let options = ReaderOptions::new()
///     .with_columns(["UF", "V2007", "V2009"])
///     .with_encoding("latin1");
/// let df = read_pnadc(
///     Path::new("PNADC_012023.txt"),
///     Path::new("dicionario_PNADC_microdados_trimestral.xls"),
///     true,
///     &options,
/// )?;
/// ```
pub fn read_pnadc(
    microdata_path: &Path,
    codebook_path: &Path,
    label_values: bool,
    options: &ReaderOptions,
) -> Result<DataFrame, ReadError> {
    let schema = build_schema(codebook_path)?;
    Ok(load(microdata_path, &schema, label_values, options)?)
}
