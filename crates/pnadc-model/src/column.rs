//! Column specifications and categorical value labels.
//!
//! A [`ColumnSpec`] describes one variable of the fixed-width record: where it
//! starts, how many bytes it spans and, for categorical variables, the
//! code → label pairs published in the codebook.
//!
//! ## Code matching
//!
//! Codebooks and data files disagree on zero padding: the data file stores
//! `"01"` while the spreadsheet cell holds the number `1` (or the other way
//! round). [`ValueLabels`] keeps each code exactly as captured and also
//! indexes it by its numeric form, so both spellings resolve to the same
//! label.

use std::collections::BTreeMap;

use serde::Serialize;

/// Label text the agency uses for codes that mean "not informed".
///
/// Codes carrying this label decode to a missing value rather than to the
/// literal text.
pub const MISSING_LABEL: &str = "Não informado";

/// One variable of the fixed-width layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    /// Variable code (e.g. `UF`, `V2007`).
    pub name: String,
    /// 0-indexed byte offset within a record.
    pub start: usize,
    /// Field width in bytes.
    pub width: usize,
    /// Free-text description from the codebook.
    pub description: Option<String>,
    /// Categorical labels; empty for purely numeric variables.
    pub value_labels: ValueLabels,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, start: usize, width: usize) -> Self {
        Self {
            name: name.into(),
            start,
            width,
            description: None,
            value_labels: ValueLabels::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_value_labels(mut self, value_labels: ValueLabels) -> Self {
        self.value_labels = value_labels;
        self
    }

    /// Exclusive end offset (`start + width`).
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.width)
    }

    /// 1-indexed start position as printed in the codebook.
    pub fn position(&self) -> usize {
        self.start + 1
    }

    pub fn is_labeled(&self) -> bool {
        !self.value_labels.is_empty()
    }
}

/// A single code → label pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueLabel {
    /// Code exactly as captured from the codebook.
    pub code: String,
    /// Label text.
    pub label: String,
    /// Whether the label marks the code as "not informed".
    pub missing: bool,
}

/// Result of resolving a raw code against a [`ValueLabels`] mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelLookup<'a> {
    /// The code has a label.
    Label(&'a str),
    /// The code is documented as "not informed".
    Missing,
    /// The code is not in the mapping; callers keep the raw code.
    Unmapped,
}

/// Code → label mapping of a categorical variable, in codebook order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValueLabels {
    entries: Vec<ValueLabel>,
    /// Exact code → entry index.
    #[serde(skip)]
    exact: BTreeMap<String, usize>,
    /// Numeric-normalized code → entry index.
    #[serde(skip)]
    numeric: BTreeMap<String, usize>,
}

impl ValueLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a code → label pair.
    ///
    /// Blank codes are ignored. A code that is already present has its label
    /// replaced, so the last occurrence in the codebook wins.
    pub fn insert(&mut self, code: &str, label: &str) {
        let code = code.trim();
        if code.is_empty() {
            return;
        }
        let label = label.trim();
        let entry = ValueLabel {
            code: code.to_string(),
            label: label.to_string(),
            missing: is_missing_label(label),
        };
        let numeric_key = normalize_numeric_key(code);
        let existing = self
            .exact
            .get(code)
            .copied()
            .or_else(|| numeric_key.as_ref().and_then(|key| self.numeric.get(key).copied()));
        let idx = match existing {
            Some(idx) => {
                self.entries[idx] = entry;
                idx
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        self.exact.insert(code.to_string(), idx);
        if let Some(key) = numeric_key {
            self.numeric.insert(key, idx);
        }
    }

    /// Resolve a raw code read from the data file.
    pub fn lookup(&self, raw: &str) -> LabelLookup<'_> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return LabelLookup::Unmapped;
        }
        let idx = self.exact.get(trimmed).copied().or_else(|| {
            normalize_numeric_key(trimmed).and_then(|key| self.numeric.get(&key).copied())
        });
        match idx.map(|idx| &self.entries[idx]) {
            Some(entry) if entry.missing => LabelLookup::Missing,
            Some(entry) => LabelLookup::Label(&entry.label),
            None => LabelLookup::Unmapped,
        }
    }

    /// Label for `raw`, if the code is mapped to text.
    pub fn label_for(&self, raw: &str) -> Option<&str> {
        match self.lookup(raw) {
            LabelLookup::Label(label) => Some(label),
            LabelLookup::Missing | LabelLookup::Unmapped => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValueLabel> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ValueLabels {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut labels = Self::new();
        for (code, label) in iter {
            labels.insert(code, label);
        }
        labels
    }
}

fn is_missing_label(label: &str) -> bool {
    label.trim().to_lowercase() == MISSING_LABEL.to_lowercase()
}

/// Canonical numeric spelling of a code: `"01"`, `"1"` and `"1.0"` all map to `"1"`.
pub fn normalize_numeric_key(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<f64>().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    let mut text = format!("{parsed}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text == "-0" {
        text = "0".to_string();
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_numeric_key_strips_padding() {
        assert_eq!(normalize_numeric_key("01").as_deref(), Some("1"));
        assert_eq!(normalize_numeric_key("1.0").as_deref(), Some("1"));
        assert_eq!(normalize_numeric_key(" 0010 ").as_deref(), Some("10"));
        assert_eq!(normalize_numeric_key("2.50").as_deref(), Some("2.5"));
        assert_eq!(normalize_numeric_key("A"), None);
        assert_eq!(normalize_numeric_key(""), None);
        assert_eq!(normalize_numeric_key("NaN"), None);
    }

    #[test]
    fn lookup_tolerates_leading_zeros_both_ways() {
        let labels: ValueLabels = [("1", "Urbana"), ("02", "Rural")].into_iter().collect();
        assert_eq!(labels.lookup("01"), LabelLookup::Label("Urbana"));
        assert_eq!(labels.lookup("1"), LabelLookup::Label("Urbana"));
        assert_eq!(labels.lookup("2"), LabelLookup::Label("Rural"));
        assert_eq!(labels.lookup("02"), LabelLookup::Label("Rural"));
        assert_eq!(labels.lookup("3"), LabelLookup::Unmapped);
        assert_eq!(labels.lookup("  "), LabelLookup::Unmapped);
    }

    #[test]
    fn missing_marker_decodes_to_missing() {
        let labels: ValueLabels = [("1", "Sim"), ("9", "Não informado")]
            .into_iter()
            .collect();
        assert_eq!(labels.lookup("9"), LabelLookup::Missing);
        assert_eq!(labels.label_for("9"), None);
        assert_eq!(labels.label_for("1"), Some("Sim"));
    }

    #[test]
    fn later_duplicate_code_replaces_label() {
        let mut labels = ValueLabels::new();
        labels.insert("1", "Homem");
        labels.insert("01", "Masculino");
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.label_for("1"), Some("Masculino"));
    }

    #[test]
    fn column_spec_offsets() {
        let spec = ColumnSpec::new("UF", 5, 2);
        assert_eq!(spec.end(), 7);
        assert_eq!(spec.position(), 6);
        assert!(!spec.is_labeled());
    }
}
