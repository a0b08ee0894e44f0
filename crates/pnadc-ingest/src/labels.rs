//! Substitution of categorical codes with their value labels.
//!
//! Codes found in the data but absent from the codebook are kept as the raw
//! code text. Published codebooks are known to be incomplete, so this is the
//! expected outcome rather than an error; the count is reported in
//! [`LabelStats`] and logged.

use polars::prelude::*;

use pnadc_model::{LabelLookup, ValueLabels};

/// Outcome counters for one labeled column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelStats {
    pub labeled: usize,
    /// Codes with no entry in the mapping, kept as raw text.
    pub unmapped: usize,
    /// Codes documented as "not informed", turned into nulls.
    pub missing: usize,
}

/// Replace codes with labels, producing a `String` column.
pub fn apply_value_labels(
    name: PlSmallStr,
    values: &StringChunked,
    labels: &ValueLabels,
) -> (Column, LabelStats) {
    let mut stats = LabelStats::default();
    let decoded: Vec<Option<String>> = values
        .into_iter()
        .map(|value| {
            let raw = value?;
            match labels.lookup(raw) {
                LabelLookup::Label(label) => {
                    stats.labeled += 1;
                    Some(label.to_string())
                }
                LabelLookup::Missing => {
                    stats.missing += 1;
                    None
                }
                LabelLookup::Unmapped => {
                    stats.unmapped += 1;
                    Some(raw.to_string())
                }
            }
        })
        .collect();
    (Series::new(name, decoded).into_column(), stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_known_codes_and_keeps_unknown_ones() {
        let labels: ValueLabels = [("1", "Homem"), ("2", "Mulher"), ("9", "Não informado")]
            .into_iter()
            .collect();
        let raw = StringChunked::from_iter_options(
            "V2007".into(),
            [Some("1"), Some("02"), Some("7"), Some("9"), None].into_iter(),
        );
        let (column, stats) = apply_value_labels("V2007".into(), &raw, &labels);

        let values: Vec<Option<&str>> = column
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            values,
            vec![Some("Homem"), Some("Mulher"), Some("7"), None, None]
        );
        assert_eq!(
            stats,
            LabelStats {
                labeled: 2,
                unmapped: 1,
                missing: 1,
            }
        );
    }
}
