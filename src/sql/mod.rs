//! Typed SQL for report queries.
//!
//! Queries are built as values ([`Query`], [`Expr`]), lowered to a
//! [`TokenStream`], and only then rendered for a [`Dialect`]: inline for
//! display, or as a [`Statement`] whose values travel as bound parameters.

pub mod dialect;
pub mod expr;
pub mod query;
pub mod token;


pub use dialect::{Dialect, SqlDialect};
pub use expr::{param, table_col, Comparison, Expr, ExprExt};
pub use query::{LeftJoin, Query, TableRef};
pub use token::{BoundValue, Statement, Token, TokenStream};
