//! SQLite: ANSI quoting, `?` placeholders, `LIMIT`/`OFFSET`.

use super::helpers;
use super::SqlDialect;

#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::double_quoted(ident)
    }
}
