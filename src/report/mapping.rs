//! Field name to source column mapping, and request validation.
//!
//! Each hierarchy level owns one [`ColumnMapping`]. A request's field list is
//! consulted against every level; names a level does not map contribute no
//! column there. Validation runs against the union of all levels.

use crate::error::ValidationError;
use crate::model::ReportRequest;
use crate::sql::{table_col, Expr};

/// A qualified source column: `table.column`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Table name or alias.
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn to_expr(&self) -> Expr {
        table_col(&self.table, &self.column)
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Insertion-ordered mapping from field name to column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<(String, ColumnRef)>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, column: ColumnRef) -> Self {
        self.insert(name, column);
        self
    }

    /// Insert a mapping. Re-inserting a name replaces its column in place.
    pub fn insert(&mut self, name: impl Into<String>, column: ColumnRef) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = column,
            None => self.entries.push((name, column)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ColumnRef> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnRef)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Columns for the requested names that this mapping knows, in mapping
    /// insertion order. Unknown names are skipped.
    pub fn map_fields<'a, I>(&self, requested: I) -> Vec<&ColumnRef>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let requested: Vec<&str> = requested.into_iter().collect();
        self.entries
            .iter()
            .filter(|(name, _)| requested.contains(&name.as_str()))
            .map(|(_, column)| column)
            .collect()
    }

    /// Merge several mappings. Earlier mappings win on a name clash.
    pub fn union<'a, I>(mappings: I) -> ColumnMapping
    where
        I: IntoIterator<Item = &'a ColumnMapping>,
    {
        let mut merged = ColumnMapping::new();
        for mapping in mappings {
            for (name, column) in mapping.iter() {
                if !merged.contains(name) {
                    merged.entries.push((name.to_string(), column.clone()));
                }
            }
        }
        merged
    }
}

/// Check every parameter and field name in `request` against `known`.
///
/// Parameters are checked before fields. Each unknown name is reported once.
pub fn validate_request(known: &ColumnMapping, request: &ReportRequest) -> Result<(), ValidationError> {
    let names = request
        .query_parameters
        .iter()
        .map(|p| p.name.as_str())
        .chain(request.field_names());

    let mut unknown: Vec<String> = Vec::new();
    for name in names {
        if !known.contains(name) && !unknown.iter().any(|u| u == name) {
            unknown.push(name.to_string());
        }
    }

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { unknown })
    }
}
