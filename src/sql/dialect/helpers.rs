//! Building blocks the dialects share.

use super::super::token::{Token, TokenStream};

/// `"name"`, used by SQLite, DuckDB and Postgres.
pub fn double_quoted(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// `` `name` ``, used by MySQL.
pub fn backticked(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// `[name]`, used by T-SQL.
pub fn bracketed(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

pub fn single_quoted(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// `N'...'` national character literal.
pub fn national_quoted(s: &str) -> String {
    format!("N{}", single_quoted(s))
}

pub fn question_mark(_position: usize) -> String {
    "?".into()
}

pub fn dollar_numbered(position: usize) -> String {
    format!("${}", position)
}

pub fn at_numbered(position: usize) -> String {
    format!("@P{}", position)
}

/// `LIMIT n OFFSET m`, either part optional.
pub fn limit_offset(limit: Option<u64>, offset: Option<u64>) -> TokenStream {
    let mut ts = TokenStream::new();
    if let Some(n) = limit {
        ts.push(Token::Limit).space().push(Token::Count(n));
    }
    if let Some(m) = offset {
        if !ts.is_empty() {
            ts.space();
        }
        ts.push(Token::Offset).space().push(Token::Count(m));
    }
    ts
}

/// `OFFSET m ROWS [FETCH NEXT n ROWS ONLY]`; OFFSET is mandatory here.
pub fn offset_fetch(limit: Option<u64>, offset: Option<u64>) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::Offset)
        .space()
        .push(Token::Count(offset.unwrap_or(0)))
        .space()
        .push(Token::Rows);
    if let Some(n) = limit {
        ts.space()
            .push(Token::Fetch)
            .space()
            .push(Token::Next)
            .space()
            .push(Token::Count(n))
            .space()
            .push(Token::Rows)
            .space()
            .push(Token::Only);
    }
    ts
}
