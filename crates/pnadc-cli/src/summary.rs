//! Table rendering for schemas and loaded data.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{DataFrame, PolarsError};

use pnadc_ingest::row_strings;
use pnadc_model::Schema;

/// One row per variable: name, byte range, label count and description.
pub fn schema_table(schema: &Schema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Start"),
        header_cell("Width"),
        header_cell("End"),
        header_cell("Labels"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for column in schema {
        let labels = if column.is_labeled() {
            Cell::new(column.value_labels.len())
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(&column.name).fg(Color::Cyan),
            Cell::new(column.start),
            Cell::new(column.width),
            Cell::new(column.end()),
            labels,
            Cell::new(column.description.as_deref().unwrap_or_default()),
        ]);
    }
    table
}

/// The first `rows` records of `frame`, nulls shown as blanks.
pub fn preview_table(frame: &DataFrame, rows: usize) -> Result<Table, PolarsError> {
    let mut table = Table::new();
    table.set_header(
        frame
            .get_column_names_str()
            .into_iter()
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in 0..rows.min(frame.height()) {
        table.add_row(row_strings(frame, row)?);
    }
    Ok(table)
}

pub fn print_schema(schema: &Schema) {
    println!("{}", schema_table(schema));
    println!(
        "{} variables, {} with value labels, records are {} bytes wide",
        schema.len(),
        schema.labeled_count(),
        schema.max_end()
    );
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}
