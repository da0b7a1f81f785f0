//! SQLite-backed executor.

use std::path::Path;

use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, OpenFlags, ToSql};

use super::{QueryExecutor, Record, Scalar};
use crate::error::ExecutionError;
use crate::sql::{BoundValue, Dialect, Statement};

/// Executes statements against a SQLite database.
pub struct SqliteExecutor {
    conn: Connection,
}

impl SqliteExecutor {
    /// Open an existing database file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExecutionError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Open a private in-memory database (for tests and demos).
    pub fn open_in_memory() -> Result<Self, ExecutionError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// The underlying connection, e.g. to seed fixture data.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl QueryExecutor for SqliteExecutor {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute(&self, statement: &Statement) -> Result<Vec<Record>, ExecutionError> {
        let mut stmt = self.conn.prepare(&statement.sql)?;
        let column_count = stmt.column_count();

        let rows = stmt.query_map(params_from_iter(statement.params.iter()), |row| {
            (0..column_count)
                .map(|i| row.get_ref(i).map(Scalar::from))
                .collect::<rusqlite::Result<Record>>()
        })?;

        let records = rows.collect::<rusqlite::Result<Vec<Record>>>()?;
        tracing::trace!(rows = records.len(), "sqlite statement returned");
        Ok(records)
    }
}

impl ToSql for BoundValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            BoundValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            BoundValue::Int(n) => ToSqlOutput::Owned(SqlValue::Integer(*n)),
            BoundValue::Float(f) => ToSqlOutput::Owned(SqlValue::Real(*f)),
        })
    }
}

impl From<ValueRef<'_>> for Scalar {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Scalar::Null,
            ValueRef::Integer(n) => Scalar::Int(n),
            ValueRef::Real(f) => Scalar::Float(f),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                Scalar::Text(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}
