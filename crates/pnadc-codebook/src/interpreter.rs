//! Schema construction from classified codebook rows.

use std::path::Path;

use pnadc_model::{ColumnSpec, Schema, SchemaParseError};
use tracing::{debug, info, info_span, trace};

use crate::classify::{CodebookRow, LabelRow, SkipReason, VariableRow, classify_row};
use crate::error::Result;
use crate::layout::CodebookLayout;
use crate::sheet::{CodebookRows, read_codebook_rows};

/// Build the schema of a PNAD Contínua codebook using the default layout.
pub fn build_schema(codebook_path: &Path) -> Result<Schema> {
    build_schema_with_layout(codebook_path, &CodebookLayout::default())
}

/// Build the schema of a codebook with an explicit layout.
pub fn build_schema_with_layout(codebook_path: &Path, layout: &CodebookLayout) -> Result<Schema> {
    let span = info_span!("build_schema", path = %codebook_path.display());
    let _guard = span.enter();
    let rows = read_codebook_rows(codebook_path, layout)?;
    let schema = build_schema_from_rows(&rows, layout)?;
    info!(
        variables = schema.len(),
        labeled = schema.labeled_count(),
        record_length = schema.max_end(),
        "codebook interpreted"
    );
    Ok(schema)
}

/// Interpreter state while walking the sheet.
enum State {
    /// No variable block is open; label rows here are orphans.
    SeekingVariable,
    /// Label rows extend `current` until the next variable or section.
    AccumulatingLabels { current: ColumnSpec },
}

#[derive(Debug, Default)]
struct RowCounts {
    variables: usize,
    labels: usize,
    skipped: usize,
}

/// Fold sheet rows (preamble included) into a [`Schema`].
pub fn build_schema_from_rows(
    rows: &CodebookRows,
    layout: &CodebookLayout,
) -> std::result::Result<Schema, SchemaParseError> {
    let mut schema = Schema::new();
    let mut state = State::SeekingVariable;
    let mut counts = RowCounts::default();

    for (idx, row) in rows.iter().enumerate().skip(layout.data_start_row) {
        let row_number = idx + 1;
        let classified = classify_row(row, row_number, layout)?;
        trace!(row = row_number, ?classified, "classified codebook row");
        state = match (state, classified) {
            (State::SeekingVariable, CodebookRow::Variable(variable)) => {
                counts.variables += 1;
                State::AccumulatingLabels {
                    current: open_variable(variable),
                }
            }
            (State::AccumulatingLabels { current }, CodebookRow::Variable(variable)) => {
                counts.variables += 1;
                schema.push(current)?;
                State::AccumulatingLabels {
                    current: open_variable(variable),
                }
            }
            (State::AccumulatingLabels { mut current }, CodebookRow::Label(label)) => {
                counts.labels += 1;
                current.value_labels.insert(&label.code, &label.label);
                State::AccumulatingLabels { current }
            }
            (State::SeekingVariable, CodebookRow::Label(LabelRow { code, .. })) => {
                return Err(SchemaParseError::OrphanLabel {
                    row: row_number,
                    code,
                });
            }
            (State::AccumulatingLabels { current }, CodebookRow::Skip(SkipReason::SectionTitle)) => {
                counts.skipped += 1;
                schema.push(current)?;
                State::SeekingVariable
            }
            (state, CodebookRow::Skip(_)) => {
                counts.skipped += 1;
                state
            }
        };
    }

    if let State::AccumulatingLabels { current } = state {
        schema.push(current)?;
    }
    debug!(
        variables = counts.variables,
        labels = counts.labels,
        skipped = counts.skipped,
        "codebook rows folded"
    );
    if schema.is_empty() {
        return Err(SchemaParseError::Empty);
    }
    Ok(schema)
}

fn open_variable(variable: VariableRow) -> ColumnSpec {
    let mut spec = ColumnSpec::new(variable.name, variable.start, variable.width);
    spec.description = variable.description;
    if let Some(label) = variable.first_label {
        spec.value_labels.insert(&label.code, &label.label);
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnadc_model::LabelLookup;

    /// One sheet row per line, cells separated by `|`.
    fn sheet(lines: &[&str]) -> CodebookRows {
        [
            "Dicionário das variáveis da PNAD Contínua",
            "",
            "Microdados trimestrais",
            "Parte 1 - Identificação e Controle",
        ]
        .iter()
        .chain(lines)
        .map(|line| line.split('|').map(str::to_string).collect())
        .collect()
    }

    fn build(lines: &[&str]) -> std::result::Result<Schema, SchemaParseError> {
        build_schema_from_rows(&sheet(lines), &CodebookLayout::default())
    }

    #[test]
    fn folds_label_rows_into_previous_variable() {
        let schema = build(&[
            "1|4|Ano||Ano de referência||",
            "5|1|Trimestre||Trimestre de referência|1 a 4|Trimestre",
            "6|2|UF||Unidade da Federação|11|Rondônia",
            "|||||12|Acre",
            "|||||13|Amazonas",
            "Parte 2 - Características gerais dos moradores",
            "8|1|V1022||Situação do domicílio|1|Urbana",
            "|||||2|Rural",
        ])
        .unwrap();

        assert_eq!(schema.names(), vec!["Ano", "Trimestre", "UF", "V1022"]);
        let uf = schema.get("UF").unwrap();
        assert_eq!((uf.start, uf.width), (5, 2));
        assert_eq!(uf.description.as_deref(), Some("Unidade da Federação"));
        assert_eq!(uf.value_labels.len(), 3);
        assert_eq!(uf.value_labels.lookup("12"), LabelLookup::Label("Acre"));
        assert!(schema.get("Ano").unwrap().value_labels.is_empty());
        assert!(schema.get("Trimestre").unwrap().value_labels.is_empty());
        assert_eq!(
            schema.get("V1022").unwrap().value_labels.lookup("2"),
            LabelLookup::Label("Rural")
        );
    }

    #[test]
    fn blank_rows_keep_the_open_variable() {
        let schema =
            build(&["6|2|UF||Unidade da Federação|11|Rondônia", "", "|||||12|Acre"]).unwrap();
        assert_eq!(schema.get("UF").unwrap().value_labels.len(), 2);
    }

    #[test]
    fn orphan_label_is_rejected() {
        let err = build(&["|||||11|Rondônia"]).unwrap_err();
        assert_eq!(
            err,
            SchemaParseError::OrphanLabel {
                row: 5,
                code: "11".to_string()
            }
        );
    }

    #[test]
    fn label_after_section_title_is_orphan() {
        let err = build(&[
            "6|2|UF||Unidade da Federação|11|Rondônia",
            "Parte 2 - Características gerais dos moradores",
            "|||||12|Acre",
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaParseError::OrphanLabel { row: 7, .. }));
    }

    #[test]
    fn overlapping_variables_are_rejected() {
        let err = build(&["1|4|Ano", "4|1|Trimestre"]).unwrap_err();
        assert!(matches!(err, SchemaParseError::Overlap { ref name, .. } if name == "Trimestre"));
    }

    #[test]
    fn duplicate_variables_are_rejected() {
        let err = build(&["1|2|UF", "3|2|UF"]).unwrap_err();
        assert_eq!(
            err,
            SchemaParseError::DuplicateName {
                name: "UF".to_string()
            }
        );
    }

    #[test]
    fn preamble_only_is_empty() {
        assert_eq!(build(&[]).unwrap_err(), SchemaParseError::Empty);
    }

    #[test]
    fn custom_start_row() {
        let rows: CodebookRows = vec![
            vec!["Posição".to_string(), "Tamanho".to_string()],
            vec!["1".to_string(), "2".to_string(), "UF".to_string()],
        ];
        let layout = CodebookLayout::default().with_data_start_row(1);
        let schema = build_schema_from_rows(&rows, &layout).unwrap();
        assert_eq!(schema.names(), vec!["UF"]);
    }
}
