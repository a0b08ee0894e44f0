//! Translation of schema columns into fixed-width field descriptors.

use std::collections::BTreeSet;

use pnadc_model::{ColumnSpec, Schema};
use tracing::warn;

use crate::error::MicrodataParseError;

/// Byte range of one output column within a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub offset: usize,
    pub width: usize,
}

impl FieldDescriptor {
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.width)
    }
}

impl From<&ColumnSpec> for FieldDescriptor {
    fn from(spec: &ColumnSpec) -> Self {
        Self {
            name: spec.name.clone(),
            offset: spec.start,
            width: spec.width,
        }
    }
}

/// Pick the columns to read, in output order.
///
/// Without a filter every schema column is returned in schema order. With a
/// filter, columns come back in filter order; repeated names are read once.
pub fn select_columns<'a>(
    schema: &'a Schema,
    filter: Option<&[String]>,
) -> Result<Vec<&'a ColumnSpec>, MicrodataParseError> {
    let Some(filter) = filter else {
        return Ok(schema.iter().collect());
    };
    if filter.is_empty() {
        return Err(MicrodataParseError::EmptyColumnFilter);
    }
    let mut seen = BTreeSet::new();
    let mut selected = Vec::with_capacity(filter.len());
    for name in filter {
        let spec = schema
            .get(name)
            .ok_or_else(|| MicrodataParseError::UnknownColumn { name: name.clone() })?;
        if !seen.insert(name.as_str()) {
            warn!(column = %name, "column requested more than once; reading it once");
            continue;
        }
        selected.push(spec);
    }
    Ok(selected)
}

/// Field descriptors for the selected columns.
pub fn field_descriptors(columns: &[&ColumnSpec]) -> Vec<FieldDescriptor> {
    columns.iter().map(|&spec| FieldDescriptor::from(spec)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::from_columns([
            ColumnSpec::new("Ano", 0, 4),
            ColumnSpec::new("UF", 5, 2),
            ColumnSpec::new("V2007", 8, 1),
        ])
        .unwrap()
    }

    #[test]
    fn no_filter_keeps_schema_order() {
        let schema = schema();
        let columns = select_columns(&schema, None).unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ano", "UF", "V2007"]);
    }

    #[test]
    fn filter_sets_output_order() {
        let schema = schema();
        let filter = vec!["V2007".to_string(), "Ano".to_string(), "V2007".to_string()];
        let columns = select_columns(&schema, Some(filter.as_slice())).unwrap();
        let fields = field_descriptors(&columns);
        assert_eq!(
            fields,
            vec![
                FieldDescriptor {
                    name: "V2007".to_string(),
                    offset: 8,
                    width: 1
                },
                FieldDescriptor {
                    name: "Ano".to_string(),
                    offset: 0,
                    width: 4
                },
            ]
        );
    }

    #[test]
    fn unknown_and_empty_filters_fail() {
        let schema = schema();
        let filter = vec!["UF".to_string(), "NONEXISTENT".to_string()];
        assert_eq!(
            select_columns(&schema, Some(filter.as_slice())).unwrap_err(),
            MicrodataParseError::UnknownColumn {
                name: "NONEXISTENT".to_string()
            }
        );
        assert_eq!(
            select_columns(&schema, Some(Vec::new().as_slice())).unwrap_err(),
            MicrodataParseError::EmptyColumnFilter
        );
    }
}
