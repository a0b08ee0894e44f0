//! Polars `AnyValue` helpers for displaying loaded data.

use polars::prelude::*;

/// Render a cell for display. Nulls render as an empty string.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Float64(v) => v.to_string(),
        AnyValue::Float32(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Render row `row` of `frame`, one string per column.
pub fn row_strings(frame: &DataFrame, row: usize) -> Result<Vec<String>, PolarsError> {
    frame
        .get_columns()
        .iter()
        .map(|column| column.get(row).map(any_to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_values_and_nulls() {
        assert_eq!(any_to_string(AnyValue::Null), "");
        assert_eq!(any_to_string(AnyValue::Int64(11)), "11");
        assert_eq!(any_to_string(AnyValue::Float64(10.0)), "10");
        assert_eq!(any_to_string(AnyValue::Float64(2.5)), "2.5");
        assert_eq!(any_to_string(AnyValue::String("Rondônia")), "Rondônia");
    }

    #[test]
    fn renders_rows() {
        let frame = DataFrame::new(vec![
            Series::new("UF".into(), [Some(11i64), None]).into_column(),
            Series::new("V2007".into(), [Some("Homem"), Some("Mulher")]).into_column(),
        ])
        .unwrap();
        assert_eq!(row_strings(&frame, 1).unwrap(), vec!["", "Mulher"]);
    }
}
