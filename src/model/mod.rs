//! Report data model: definitions, requests and result pages.
//!
//! Everything here is plain serde data so pages can be emitted as JSON.

pub mod definition;
pub mod page;
pub mod request;
pub mod types;

pub use definition::{DisplayableField, QueryParameter, ReportDefinition};
pub use page::{Header, ReportPage, Row, Value};
pub use request::ReportRequest;
pub use types::{FieldType, Operator};
