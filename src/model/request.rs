use serde::{Deserialize, Serialize};

use super::definition::{DisplayableField, QueryParameter};

/// The caller's column selection and filters for one report run.
///
/// Field order determines header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default)]
    pub query_parameters: Vec<QueryParameter>,
    #[serde(default)]
    pub displayable_fields: Vec<DisplayableField>,
}

impl ReportRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: DisplayableField) -> Self {
        self.displayable_fields.push(field);
        self
    }

    pub fn parameter(mut self, parameter: QueryParameter) -> Self {
        self.query_parameters.push(parameter);
        self
    }

    /// Requested field names, in request order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.displayable_fields.iter().map(|f| f.name.as_str())
    }
}
