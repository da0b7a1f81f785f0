//! Error types for report generation.

use thiserror::Error;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// A request referenced names the report does not know.
///
/// Carries every unknown name once, in the order first seen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unspecified fields requested: {}", .unknown.join(", "))]
pub struct ValidationError {
    pub unknown: Vec<String>,
}

/// Errors raised by a query executor.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// SQLite driver error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Any other backend failure.
    #[error("query backend error: {0}")]
    Backend(String),
}

/// Errors that can occur while resolving or generating a report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A filter value does not fit its operator.
    #[error("malformed value for parameter '{name}': {reason}")]
    MalformedParameter { name: String, reason: String },

    /// None of the requested fields maps to the root level.
    #[error("report '{0}' needs at least one root-level field")]
    NoRootColumns(String),

    #[error("page size must be between 1 and {max}, got {size}")]
    InvalidPageSize { size: u32, max: u32 },

    #[error("report not found: {category}/{identifier}")]
    ReportNotFound {
        category: String,
        identifier: String,
    },

    /// Query execution failed; passed through unchanged.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl ReportError {
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(category: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::ReportNotFound {
            category: category.into(),
            identifier: identifier.into(),
        }
    }

    /// Whether the caller sent a bad request (as opposed to a backend failure).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Execution(_))
    }
}
