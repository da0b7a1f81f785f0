//! PostgreSQL: numbered `$n` placeholders.

use super::helpers;
use super::SqlDialect;

#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::double_quoted(ident)
    }

    fn placeholder(&self, position: usize) -> String {
        helpers::dollar_numbered(position)
    }
}
