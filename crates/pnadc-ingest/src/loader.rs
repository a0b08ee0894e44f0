//! Microdata loading: extraction, typing and labeling.

use std::path::Path;

use polars::prelude::*;
use tracing::{debug, info, info_span};

use pnadc_model::{ColumnSpec, ReaderOptions, Schema};

use crate::coerce::coerce_column;
use crate::error::Result;
use crate::fields::{field_descriptors, select_columns};
use crate::fixed_width::FixedWidthReader;
use crate::labels::apply_value_labels;

/// Load a fixed-width microdata file according to `schema`.
///
/// Columns come back in schema order, or in `options.column_filter` order
/// when a filter is given; rows keep file order. With `label_values`, every
/// column whose spec has value labels is decoded to label text (see
/// [`crate::labels`] for unmapped codes); all other columns are typed as
/// `Int64`, `Float64` or `String`.
pub fn load(
    microdata_path: &Path,
    schema: &Schema,
    label_values: bool,
    options: &ReaderOptions,
) -> Result<DataFrame> {
    let span = info_span!(
        "load",
        path = %microdata_path.display(),
        label_values,
        row_limit = ?options.row_limit
    );
    let _guard = span.enter();

    let columns = select_columns(schema, options.column_filter.as_deref())?;
    let fields = field_descriptors(&columns);
    let reader = FixedWidthReader::new(&fields, options)?;
    let raw = reader.read_path(microdata_path)?;
    let frame = type_columns(&raw, &columns, label_values)?;

    info!(
        rows = frame.height(),
        columns = frame.width(),
        "microdata loaded"
    );
    Ok(frame)
}

/// Turn the raw text frame into typed (and optionally labeled) columns.
pub fn type_columns(
    raw: &DataFrame,
    columns: &[&ColumnSpec],
    label_values: bool,
) -> Result<DataFrame> {
    let mut typed = Vec::with_capacity(columns.len());
    for spec in columns {
        let values = raw.column(&spec.name)?.as_materialized_series().str()?;
        let name = PlSmallStr::from(spec.name.as_str());
        if label_values && spec.is_labeled() {
            let (column, stats) = apply_value_labels(name, values, &spec.value_labels);
            debug!(
                column = %spec.name,
                labeled = stats.labeled,
                unmapped = stats.unmapped,
                missing = stats.missing,
                "value labels applied"
            );
            typed.push(column);
        } else {
            let (column, kind) = coerce_column(name, values);
            debug!(column = %spec.name, ?kind, "column typed");
            typed.push(column);
        }
    }
    Ok(DataFrame::new(typed)?)
}
