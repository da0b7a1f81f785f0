//! Lookup of report specifications by category and identifier.

use std::collections::BTreeMap;

use crate::error::{ReportError, ReportResult};
use crate::model::ReportDefinition;
use crate::report::{catalog, LookAhead, ReportSpecification};

/// Static `(category, identifier)` to specification map.
#[derive(Debug, Clone, Default)]
pub struct ReportRegistry {
    reports: BTreeMap<(String, String), ReportSpecification>,
}

impl ReportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in catalog.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for spec in catalog::all() {
            registry.register(spec);
        }
        registry
    }

    /// Register a specification, returning the one it replaced.
    pub fn register(&mut self, spec: ReportSpecification) -> Option<ReportSpecification> {
        let key = (spec.category.clone(), spec.identifier().to_string());
        self.reports.insert(key, spec)
    }

    /// Use `lookahead` for every registered report.
    pub fn with_lookahead(mut self, lookahead: LookAhead) -> Self {
        for spec in self.reports.values_mut() {
            spec.lookahead = lookahead;
        }
        self
    }

    pub fn lookup(&self, category: &str, identifier: &str) -> ReportResult<&ReportSpecification> {
        self.reports
            .get(&(category.to_string(), identifier.to_string()))
            .ok_or_else(|| ReportError::not_found(category, identifier))
    }

    /// Category names, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.reports.keys().map(|(c, _)| c.as_str()).collect();
        categories.dedup();
        categories
    }

    /// Definitions in `category`, sorted by identifier.
    pub fn definitions(&self, category: &str) -> Vec<&ReportDefinition> {
        self.reports
            .iter()
            .filter(|((c, _), _)| c == category)
            .map(|(_, spec)| spec.report_definition())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportSpecification> {
        self.reports.values()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
