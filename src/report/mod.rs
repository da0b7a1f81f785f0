//! The report engine.
//!
//! A report walks a hierarchy of up to three levels. Each level maps field
//! names to columns; a request picks fields and filters, and every level gets
//! one composed query:
//!
//! ```text
//! ReportRequest ──validate──▶ plan (columns + criteria per level)
//!                                   │
//!                                   ▼
//!                root page ─▶ look-ahead ─▶ child / grandchild fan-out
//!                                   │
//!                                   ▼
//!                               ReportPage
//! ```

pub mod assemble;
pub mod catalog;
pub mod compose;
pub mod criteria;
pub mod layout;
pub mod mapping;
pub mod specification;

pub use assemble::{AssembledPage, Assembler, LevelPlan, LookAhead, ReportPlan};
pub use compose::{compose_query, PageWindow, Scope};
pub use criteria::{build_criteria, build_level_criteria};
pub use layout::{ChildTier, GrandchildTier, Hierarchy, Level, ParentLink, SummaryRule};
pub use mapping::{validate_request, ColumnMapping, ColumnRef};
pub use specification::{ExplainedQuery, ReportSpecification, PARENT_KEY_PLACEHOLDER};
