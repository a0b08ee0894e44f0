//! Structural errors raised while deriving a schema from a codebook.

use thiserror::Error;

/// The codebook is structurally inconsistent.
///
/// Row numbers are 1-based spreadsheet rows so they can be located in the
/// original file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaParseError {
    /// A variable row lacks one of position, width or name.
    #[error("row {row}: variable row is missing the {field} column")]
    MissingField { row: usize, field: &'static str },

    /// A position or width cell is not a positive integer.
    #[error("row {row}: invalid {field} value '{value}'")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// A value-label row appears before any variable it could belong to.
    #[error("row {row}: value label '{code}' is not preceded by a variable row")]
    OrphanLabel { row: usize, code: String },

    /// A variable starts before the previous one ends.
    #[error(
        "variable '{name}' (bytes {start}..{end}) overlaps '{previous}' which ends at byte {previous_end}"
    )]
    Overlap {
        name: String,
        start: usize,
        end: usize,
        previous: String,
        previous_end: usize,
    },

    /// A variable's byte range does not fit in an offset.
    #[error("variable '{name}' (start {start}, width {width}) ends past the largest byte offset")]
    RangeOverflow {
        name: String,
        start: usize,
        width: usize,
    },

    /// Two variables share the same name.
    #[error("variable '{name}' is declared more than once")]
    DuplicateName { name: String },

    /// No variable rows were found after the preamble.
    #[error("codebook declares no variables")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaParseError::MissingField {
            row: 12,
            field: "width",
        };
        assert_eq!(
            err.to_string(),
            "row 12: variable row is missing the width column"
        );

        let err = SchemaParseError::Overlap {
            name: "V1008".to_string(),
            start: 30,
            end: 32,
            previous: "V1016".to_string(),
            previous_end: 31,
        };
        assert!(err.to_string().contains("overlaps 'V1016'"));
    }
}
