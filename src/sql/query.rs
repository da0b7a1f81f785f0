//! SELECT builder for one report level.
//!
//! Layout of the rendered SQL, one clause per line:
//!
//! ```text
//! SELECT [DISTINCT]
//!   col,
//!   col
//! FROM table AS alias
//! LEFT JOIN table AS alias ON a = b
//! WHERE p1 AND p2
//! ORDER BY col ASC
//! <pagination>
//! ```

use std::fmt;

use super::dialect::{Dialect, SqlDialect};
use super::expr::Expr;
use super::token::{Statement, Token, TokenStream};

/// A table with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "builders have no effect until used"]
pub struct TableRef {
    pub table: String,
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// What columns of this table are qualified with.
    pub fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }

    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::Ident(self.table.clone()));
        if let Some(alias) = &self.alias {
            ts.space()
                .push(Token::As)
                .space()
                .push(Token::Ident(alias.clone()));
        }
        ts
    }
}

/// `LEFT JOIN table ON condition`
#[derive(Debug, Clone, PartialEq)]
pub struct LeftJoin {
    pub table: TableRef,
    pub on: Expr,
}

/// A SELECT statement.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "a query does nothing until rendered with to_sql() or to_statement()"]
pub struct Query {
    pub distinct: bool,
    pub columns: Vec<Expr>,
    pub from: Option<TableRef>,
    pub joins: Vec<LeftJoin>,
    /// ANDed together.
    pub conditions: Vec<Expr>,
    /// All ascending.
    pub order_by: Vec<Expr>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: Vec<Expr>) -> Self {
        self.columns = columns;
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn from(mut self, table: TableRef) -> Self {
        self.from = Some(table);
        self
    }

    pub fn left_join(mut self, table: TableRef, on: Expr) -> Self {
        self.joins.push(LeftJoin { table, on });
        self
    }

    /// Add a WHERE condition; every condition must hold.
    pub fn filter(mut self, condition: Expr) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Append an ascending sort key.
    pub fn order_by(mut self, key: Expr) -> Self {
        self.order_by.push(key);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    fn is_paged(&self) -> bool {
        self.limit.is_some() || self.offset.is_some()
    }

    pub fn to_tokens(&self, dialect: Dialect) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.push(Token::Select);
        if self.distinct {
            ts.space().push(Token::Distinct);
        }
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                ts.comma();
            }
            ts.line(1).append(column.to_tokens());
        }

        if let Some(from) = &self.from {
            ts.line(0).push(Token::From).space().append(from.to_tokens());
        }

        for join in &self.joins {
            ts.line(0)
                .push(Token::Left)
                .space()
                .push(Token::Join)
                .space()
                .append(join.table.to_tokens())
                .space()
                .push(Token::On)
                .space()
                .append(join.on.to_tokens());
        }

        for (i, condition) in self.conditions.iter().enumerate() {
            if i == 0 {
                ts.line(0).push(Token::Where);
            } else {
                ts.space().push(Token::And);
            }
            ts.space().append(condition.to_tokens());
        }

        if !self.order_by.is_empty() {
            ts.line(0).push(Token::OrderBy).space();
            ts.comma_separated(self.order_by.iter().map(|key| {
                let mut item = key.to_tokens();
                item.space().push(Token::Asc);
                item
            }));
        } else if self.is_paged() && dialect.pagination_needs_order_by() {
            // ORDER BY (SELECT NULL): keeps the backend's order.
            ts.line(0)
                .push(Token::OrderBy)
                .space()
                .push(Token::LParen)
                .push(Token::Select)
                .space()
                .push(Token::Null)
                .push(Token::RParen);
        }

        if self.is_paged() {
            ts.line(0).append(dialect.pagination(self.limit, self.offset));
        }

        ts
    }

    /// Inline SQL, for logs and explain output.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens(dialect).serialize(dialect)
    }

    /// Parameterized SQL, for execution.
    pub fn to_statement(&self, dialect: Dialect) -> Statement {
        self.to_tokens(dialect).to_statement(dialect)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql(Dialect::default()))
    }
}
