//! SQL Server.
//!
//! Bracket quoting, `@Pn` placeholders and `OFFSET .. FETCH` paging, which
//! SQL Server only accepts after an ORDER BY.

use super::helpers;
use super::SqlDialect;
use crate::sql::token::TokenStream;

#[derive(Debug, Clone, Copy)]
pub struct TSql;

impl SqlDialect for TSql {
    fn name(&self) -> &'static str {
        "tsql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::bracketed(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        if s.is_ascii() {
            helpers::single_quoted(s)
        } else {
            helpers::national_quoted(s)
        }
    }

    fn placeholder(&self, position: usize) -> String {
        helpers::at_numbered(position)
    }

    fn pagination(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        helpers::offset_fetch(limit, offset)
    }

    fn pagination_needs_order_by(&self) -> bool {
        true
    }
}
