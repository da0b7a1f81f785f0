//! # reportgen
//!
//! A pluggable report engine: named report types walk a small hierarchy of
//! related tables and page the result into a tabular report.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        ReportRegistry  (category, identifier) lookup     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [validate + plan]
//! ┌─────────────────────────────────────────────────────────┐
//! │     ReportSpecification (definition + Hierarchy)         │
//! │     column mappings, criteria per level                  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compose]
//! ┌─────────────────────────────────────────────────────────┐
//! │     sql::Query  ──▶  Statement { sql, params }           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [assemble: root, look-ahead, fan-out]
//! ┌─────────────────────────────────────────────────────────┐
//! │     QueryExecutor  ──▶  ReportPage (rows of Values)      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use reportgen::prelude::*;
//!
//! let executor = SqliteExecutor::open("ledger.sqlite")?;
//! let service = ReportService::new(
//!     ReportRegistry::with_defaults(),
//!     Box::new(executor),
//!     Box::new(StaticIdentity::new("operator")),
//!     Box::new(SystemClock),
//! );
//!
//! let request = ReportRequest::new()
//!     .field(DisplayableField::new("Teller Id", FieldType::Text))
//!     .field(DisplayableField::new("Amount", FieldType::Text))
//!     .parameter(
//!         QueryParameter::new("Status", FieldType::Text)
//!             .operator(Operator::In)
//!             .value("OPEN, CLOSED"),
//!     );
//!
//! let page = service.generate("Teller", "Transactions", &request, 0, Some(20))?;
//! println!("{} rows, more: {}", page.rows.len(), page.has_more);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod model;
pub mod registry;
pub mod report;
pub mod service;
pub mod sql;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::context::{
        Clock, FixedClock, IdentityProvider, ReportContext, StaticIdentity, SystemClock,
    };
    pub use crate::error::{ExecutionError, ReportError, ReportResult, ValidationError};
    pub use crate::executor::{QueryExecutor, Record, Scalar, SqliteExecutor};
    pub use crate::model::{
        DisplayableField, FieldType, Header, Operator, QueryParameter, ReportDefinition,
        ReportPage, ReportRequest, Row, Value,
    };
    pub use crate::registry::ReportRegistry;
    pub use crate::report::{
        ColumnMapping, ColumnRef, Hierarchy, Level, LookAhead, ParentLink, ReportSpecification,
        SummaryRule,
    };
    pub use crate::service::ReportService;
    pub use crate::sql::{BoundValue, Dialect, Query, Statement, TableRef};
}

// Also export at crate root for convenience
pub use error::{ReportError, ReportResult};
pub use registry::ReportRegistry;
pub use report::ReportSpecification;
pub use service::ReportService;
