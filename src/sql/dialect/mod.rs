//! Backend dialects.
//!
//! A report statement differs between backends in four places only:
//!
//! | | identifiers | placeholders | pagination |
//! |---|---|---|---|
//! | SQLite | `"x"` | `?` | `LIMIT n OFFSET m` |
//! | DuckDB | `"x"` | `?` | `LIMIT n OFFSET m` |
//! | MySQL | `` `x` `` | `?` | `LIMIT n OFFSET m` |
//! | Postgres | `"x"` | `$n` | `LIMIT n OFFSET m` |
//! | T-SQL | `[x]` | `@Pn` | `OFFSET m ROWS FETCH NEXT n ROWS ONLY` |
//!
//! plus string literal quoting, which only T-SQL varies (`N'..'` for
//! non-ASCII text).

mod duckdb;
pub mod helpers;
mod mysql;
mod postgres;
mod sqlite;
mod tsql;

pub use duckdb::DuckDb;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;
pub use tsql::TSql;

use serde::{Deserialize, Serialize};

use super::token::TokenStream;

/// How one backend spells the dialect-sensitive parts of a statement.
pub trait SqlDialect: std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn quote_identifier(&self, ident: &str) -> String;

    /// Escaped string literal for inline rendering.
    fn quote_string(&self, s: &str) -> String {
        helpers::single_quoted(s)
    }

    /// Placeholder for the bound value at 1-based `position`.
    fn placeholder(&self, position: usize) -> String {
        helpers::question_mark(position)
    }

    /// The row window clause.
    fn pagination(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        helpers::limit_offset(limit, offset)
    }

    /// Whether [`SqlDialect::pagination`] is only valid after an ORDER BY.
    fn pagination_needs_order_by(&self) -> bool {
        false
    }
}

/// The backends statements can be rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Sqlite,
    DuckDb,
    TSql,
    MySql,
    Postgres,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::Sqlite,
        Dialect::DuckDb,
        Dialect::TSql,
        Dialect::MySql,
        Dialect::Postgres,
    ];

    fn backend(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Sqlite => &Sqlite,
            Dialect::DuckDb => &DuckDb,
            Dialect::TSql => &TSql,
            Dialect::MySql => &MySql,
            Dialect::Postgres => &Postgres,
        }
    }
}

impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.backend().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.backend().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.backend().quote_string(s)
    }

    fn placeholder(&self, position: usize) -> String {
        self.backend().placeholder(position)
    }

    fn pagination(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        self.backend().pagination(limit, offset)
    }

    fn pagination_needs_order_by(&self) -> bool {
        self.backend().pagination_needs_order_by()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
