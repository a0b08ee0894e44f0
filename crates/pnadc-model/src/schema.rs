//! Ordered, validated column layout of a microdata file.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::column::ColumnSpec;
use crate::error::SchemaParseError;

/// Ordered sequence of [`ColumnSpec`]s.
///
/// Specs are only added through [`Schema::push`], which keeps them sorted by
/// start offset, non-overlapping and uniquely named. Gaps between columns are
/// allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
    #[serde(skip)]
    by_name: BTreeMap<String, usize>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema from specs in layout order.
    pub fn from_columns(
        columns: impl IntoIterator<Item = ColumnSpec>,
    ) -> Result<Self, SchemaParseError> {
        let mut schema = Self::new();
        for column in columns {
            schema.push(column)?;
        }
        Ok(schema)
    }

    /// Append a spec, validating name uniqueness and byte ranges.
    pub fn push(&mut self, column: ColumnSpec) -> Result<(), SchemaParseError> {
        if self.by_name.contains_key(&column.name) {
            return Err(SchemaParseError::DuplicateName { name: column.name });
        }
        if column.start.checked_add(column.width).is_none() {
            return Err(SchemaParseError::RangeOverflow {
                name: column.name,
                start: column.start,
                width: column.width,
            });
        }
        if let Some(previous) = self.columns.last()
            && column.start < previous.end()
        {
            return Err(SchemaParseError::Overlap {
                end: column.end(),
                name: column.name,
                start: column.start,
                previous: previous.name.clone(),
                previous_end: previous.end(),
            });
        }
        self.by_name.insert(column.name.clone(), self.columns.len());
        self.columns.push(column);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ColumnSpec> {
        self.by_name.get(name).map(|&idx| &self.columns[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnSpec> {
        self.columns.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Minimum record length needed to read every column.
    pub fn max_end(&self) -> usize {
        self.columns.last().map_or(0, ColumnSpec::end)
    }

    /// Number of variables carrying value labels.
    pub fn labeled_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_labeled()).count()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a ColumnSpec;
    type IntoIter = std::slice::Iter<'a, ColumnSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_accepts_contiguous_and_gapped_columns() {
        let schema = Schema::from_columns([
            ColumnSpec::new("Ano", 0, 4),
            ColumnSpec::new("Trimestre", 4, 1),
            ColumnSpec::new("UF", 10, 2),
        ])
        .unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.max_end(), 12);
        assert_eq!(schema.names(), vec!["Ano", "Trimestre", "UF"]);
        assert_eq!(schema.get("UF").map(|c| c.start), Some(10));
    }

    #[test]
    fn push_rejects_overlap() {
        let mut schema = Schema::new();
        schema.push(ColumnSpec::new("Ano", 0, 4)).unwrap();
        let err = schema.push(ColumnSpec::new("Trimestre", 3, 1)).unwrap_err();
        assert_eq!(
            err,
            SchemaParseError::Overlap {
                name: "Trimestre".to_string(),
                start: 3,
                end: 4,
                previous: "Ano".to_string(),
                previous_end: 4,
            }
        );
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn push_rejects_duplicate_name() {
        let mut schema = Schema::new();
        schema.push(ColumnSpec::new("UF", 0, 2)).unwrap();
        let err = schema.push(ColumnSpec::new("UF", 2, 2)).unwrap_err();
        assert_eq!(
            err,
            SchemaParseError::DuplicateName {
                name: "UF".to_string()
            }
        );
    }

    #[test]
    fn push_rejects_range_past_usize() {
        let mut schema = Schema::new();
        schema.push(ColumnSpec::new("Ano", 0, 4)).unwrap();
        let err = schema
            .push(ColumnSpec::new("X", usize::MAX - 1, 4))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaParseError::RangeOverflow {
                name: "X".to_string(),
                start: usize::MAX - 1,
                width: 4,
            }
        );
        assert_eq!(schema.max_end(), 4);
    }

    #[test]
    fn empty_schema_has_zero_end() {
        let schema = Schema::new();
        assert!(schema.is_empty());
        assert_eq!(schema.max_end(), 0);
    }
}
