//! DuckDB: Postgres-style quoting, but positional `?` placeholders.

use super::helpers;
use super::SqlDialect;

#[derive(Debug, Clone, Copy)]
pub struct DuckDb;

impl SqlDialect for DuckDb {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::double_quoted(ident)
    }
}
