//! Report metadata: what a report can show and what it can be filtered by.

use serde::{Deserialize, Serialize};

use super::types::{FieldType, Operator};

/// A column a caller may request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayableField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub mandatory: bool,
}

impl DisplayableField {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            mandatory: false,
        }
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }
}

/// A filter, either as declared by a report or as supplied with a request.
///
/// Declared parameters carry no value. Request parameters carry the raw
/// value text: a single value, a comma separated list for `IN`, or
/// `low..high` for `BETWEEN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub mandatory: bool,
}

impl QueryParameter {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            operator: Operator::default(),
            value: None,
            mandatory: false,
        }
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// The value, if it is present and not blank.
    pub fn effective_value(&self) -> Option<&str> {
        self.value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// Static description of one report type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub query_parameters: Vec<QueryParameter>,
    pub displayable_fields: Vec<DisplayableField>,
}

impl ReportDefinition {
    pub fn parameter(&self, name: &str) -> Option<&QueryParameter> {
        self.query_parameters.iter().find(|p| p.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&DisplayableField> {
        self.displayable_fields.iter().find(|f| f.name == name)
    }

    /// Mandatory fields, in declaration order.
    pub fn mandatory_fields(&self) -> impl Iterator<Item = &DisplayableField> {
        self.displayable_fields.iter().filter(|f| f.mandatory)
    }
}
