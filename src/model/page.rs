//! The tabular result of one report generation.

use serde::{Deserialize, Serialize};

/// A cell: zero or more strings.
///
/// Empty for NULL source values, one string for a plain column, several for
/// a flattened one-to-many column such as the child summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    pub values: Vec<String>,
}

impl Value {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(value: impl Into<String>) -> Self {
        Self {
            values: vec![value.into()],
        }
    }

    pub fn many(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Option<String>> for Value {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) => Value::single(v),
            None => Value::empty(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.values.join(", "))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flattened cell text, for assertions and plain-text output.
    pub fn texts(&self) -> Vec<Vec<&str>> {
        self.values
            .iter()
            .map(|v| v.values.iter().map(String::as_str).collect())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub column_names: Vec<String>,
}

/// One page of a generated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    pub name: String,
    pub description: String,
    pub header: Header,
    pub rows: Vec<Row>,
    pub has_more: bool,
    pub generated_by: String,
    /// ISO-8601 UTC timestamp.
    pub generated_on: String,
}
