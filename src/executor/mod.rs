//! Query execution boundary.
//!
//! The report engine only composes statements; running them is delegated to
//! a [`QueryExecutor`]. Results come back fully materialized.

mod sqlite;

pub use sqlite::SqliteExecutor;

use crate::error::ExecutionError;
use crate::sql::{BoundValue, Dialect, Statement};

/// A nullable scalar returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl Scalar {
    /// Cell text, `None` for NULL.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Scalar::Null => None,
            Scalar::Int(n) => Some(n.to_string()),
            Scalar::Float(f) => {
                if f.is_finite() {
                    let mut buffer = ryu::Buffer::new();
                    Some(buffer.format(*f).to_string())
                } else {
                    Some(f.to_string())
                }
            }
            Scalar::Text(s) => Some(s.clone()),
            Scalar::Bool(b) => Some(b.to_string()),
        }
    }

    /// The value to bind when this scalar keys the next level's query.
    pub fn to_bound(&self) -> Option<BoundValue> {
        match self {
            Scalar::Null => None,
            Scalar::Int(n) => Some(BoundValue::Int(*n)),
            Scalar::Float(f) if f.is_finite() => Some(BoundValue::Float(*f)),
            Scalar::Float(f) => Some(BoundValue::Text(f.to_string())),
            Scalar::Text(s) => Some(BoundValue::Text(s.clone())),
            Scalar::Bool(b) => Some(BoundValue::Int(i64::from(*b))),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.into())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

/// One result record: the selected columns in SELECT order.
pub type Record = Vec<Scalar>;

/// Runs composed, read-only SELECT statements.
pub trait QueryExecutor {
    /// The dialect statements must be rendered in for this backend.
    fn dialect(&self) -> Dialect;

    fn execute(&self, statement: &Statement) -> Result<Vec<Record>, ExecutionError>;
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for &E {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn execute(&self, statement: &Statement) -> Result<Vec<Record>, ExecutionError> {
        (**self).execute(statement)
    }
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for Box<E> {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn execute(&self, statement: &Statement) -> Result<Vec<Record>, ExecutionError> {
        (**self).execute(statement)
    }
}
