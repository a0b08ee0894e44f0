//! Type inference and coercion of raw text columns.

use polars::prelude::*;

/// Target type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every value is an integer without a fractional part marker.
    Integer,
    /// Every value parses as a finite decimal.
    Decimal,
    /// Anything else stays text.
    Text,
}

/// Infer the narrowest type holding every non-null value.
///
/// A column with no values at all is treated as integer. Integers that do
/// not fit in `i64` (long identifiers) keep the column as text so no digits
/// are lost.
pub fn infer_kind<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> ColumnKind {
    let mut kind = ColumnKind::Integer;
    for value in values.into_iter().flatten() {
        if kind == ColumnKind::Integer && (value.contains('.') || value.parse::<i64>().is_err()) {
            kind = if value.contains('.') && is_decimal(value) {
                ColumnKind::Decimal
            } else {
                return ColumnKind::Text;
            };
        }
        if kind == ColumnKind::Decimal && !is_decimal(value) {
            return ColumnKind::Text;
        }
    }
    kind
}

/// Plain decimal notation only: no exponent, no `inf` or `NaN`.
fn is_decimal(value: &str) -> bool {
    value
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+'))
        && value.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Convert a raw text column to its inferred type.
pub fn coerce_column(name: PlSmallStr, values: &StringChunked) -> (Column, ColumnKind) {
    let kind = infer_kind(values);
    let series = match kind {
        ColumnKind::Integer => {
            let parsed: Vec<Option<i64>> = values
                .into_iter()
                .map(|value| value.and_then(|v| v.parse::<i64>().ok()))
                .collect();
            Series::new(name, parsed)
        }
        ColumnKind::Decimal => {
            let parsed: Vec<Option<f64>> = values
                .into_iter()
                .map(|value| value.and_then(|v| v.parse::<f64>().ok()))
                .collect();
            Series::new(name, parsed)
        }
        ColumnKind::Text => values.clone().into_series().with_name(name),
    };
    (series.into_column(), kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(values: &[Option<&str>]) -> ColumnKind {
        infer_kind(values.iter().copied())
    }

    #[test]
    fn infers_integer_decimal_and_text() {
        assert_eq!(kind(&[Some("01"), Some("11"), None]), ColumnKind::Integer);
        assert_eq!(kind(&[Some("-3"), Some("+4")]), ColumnKind::Integer);
        assert_eq!(kind(&[Some("1"), Some("2.5")]), ColumnKind::Decimal);
        assert_eq!(kind(&[Some("2.5"), Some("1")]), ColumnKind::Decimal);
        assert_eq!(kind(&[Some("1"), Some("A")]), ColumnKind::Text);
        assert_eq!(kind(&[Some("2.5"), Some("x")]), ColumnKind::Text);
        assert_eq!(kind(&[Some("1e3")]), ColumnKind::Text);
        assert_eq!(kind(&[Some("1.5"), Some("1e3")]), ColumnKind::Text);
        assert_eq!(kind(&[Some("1.5e3")]), ColumnKind::Text);
        assert_eq!(kind(&[Some("2.5"), Some("inf")]), ColumnKind::Text);
        assert_eq!(kind(&[None, None]), ColumnKind::Integer);
        assert_eq!(kind(&[Some("12345678901234567890123")]), ColumnKind::Text);
    }

    #[test]
    fn coerces_to_int64_with_nulls() {
        let raw = StringChunked::from_iter_options(
            "V2009".into(),
            [Some("045"), None, Some("7")].into_iter(),
        );
        let (column, kind) = coerce_column("V2009".into(), &raw);
        assert_eq!(kind, ColumnKind::Integer);
        assert_eq!(column.dtype(), &DataType::Int64);
        let values: Vec<Option<i64>> = column
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(values, vec![Some(45), None, Some(7)]);
    }

    #[test]
    fn coerces_to_float64() {
        let raw = StringChunked::from_iter_options(
            "V1028".into(),
            [Some("00000123.456"), Some("2")].into_iter(),
        );
        let (column, kind) = coerce_column("V1028".into(), &raw);
        assert_eq!(kind, ColumnKind::Decimal);
        assert_eq!(column.dtype(), &DataType::Float64);
    }
}
