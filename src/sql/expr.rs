//! Predicates and column references used by report queries.
//!
//! Report levels only ever compare a qualified column against another column
//! (join conditions) or against bound values (parent keys and filter
//! parameters), so the tree stays small. User-supplied text can only enter a
//! statement through [`Expr::Param`] and friends, which are bound.

use super::dialect::Dialect;
use super::token::{BoundValue, Statement, Token, TokenStream};

/// An expression in a SELECT list, join condition, WHERE or ORDER BY.
///
/// Rendering in [`Expr::to_tokens`] matches every variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `alias.column`
    Column { table: String, column: String },
    /// A bound value.
    Param(BoundValue),
    /// `left op right`
    Compare {
        left: Box<Expr>,
        op: Comparison,
        right: Box<Expr>,
    },
    /// `target IN (v1, v2, ...)`
    InList {
        target: Box<Expr>,
        items: Vec<BoundValue>,
    },
    /// `target BETWEEN low AND high`, bounds inclusive.
    Between {
        target: Box<Expr>,
        low: BoundValue,
        high: BoundValue,
    },
}

/// Binary comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gt,
    Lt,
    Like,
}

impl Comparison {
    fn token(self) -> Token {
        match self {
            Comparison::Eq => Token::Eq,
            Comparison::Gt => Token::Gt,
            Comparison::Lt => Token::Lt,
            Comparison::Like => Token::Like,
        }
    }
}

impl Expr {
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        match self {
            Expr::Column { table, column } => {
                ts.push(Token::Ident(table.clone()))
                    .push(Token::Dot)
                    .push(Token::Ident(column.clone()));
            }
            Expr::Param(value) => {
                ts.push(Token::Bind(value.clone()));
            }
            Expr::Compare { left, op, right } => {
                ts.append(left.to_tokens())
                    .space()
                    .push(op.token())
                    .space()
                    .append(right.to_tokens());
            }
            Expr::InList { items, .. } if items.is_empty() => {
                // Matches nothing; `IN ()` is not valid SQL.
                ts.push(Token::Count(1))
                    .space()
                    .push(Token::Eq)
                    .space()
                    .push(Token::Count(0));
            }
            Expr::InList { target, items } => {
                ts.append(target.to_tokens())
                    .space()
                    .push(Token::In)
                    .space()
                    .push(Token::LParen)
                    .comma_separated(items.iter().map(|item| {
                        let mut slot = TokenStream::new();
                        slot.push(Token::Bind(item.clone()));
                        slot
                    }))
                    .push(Token::RParen);
            }
            Expr::Between { target, low, high } => {
                ts.append(target.to_tokens())
                    .space()
                    .push(Token::Between)
                    .space()
                    .push(Token::Bind(low.clone()))
                    .space()
                    .push(Token::And)
                    .space()
                    .push(Token::Bind(high.clone()));
            }
        }
        ts
    }

    /// Parameterized rendering of this expression alone.
    pub fn to_statement(&self, dialect: Dialect) -> Statement {
        self.to_tokens().to_statement(dialect)
    }

    /// Inline rendering of this expression alone.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens().serialize(dialect)
    }
}

/// `table.column`
pub fn table_col(table: &str, column: &str) -> Expr {
    Expr::Column {
        table: table.into(),
        column: column.into(),
    }
}

pub fn param(value: impl Into<BoundValue>) -> Expr {
    Expr::Param(value.into())
}

/// Fluent predicate construction.
pub trait ExprExt: Sized {
    fn into_expr(self) -> Expr;

    fn compare(self, op: Comparison, right: Expr) -> Expr {
        Expr::Compare {
            left: Box::new(self.into_expr()),
            op,
            right: Box::new(right),
        }
    }

    fn eq(self, right: Expr) -> Expr {
        self.compare(Comparison::Eq, right)
    }

    fn gt(self, right: Expr) -> Expr {
        self.compare(Comparison::Gt, right)
    }

    fn lt(self, right: Expr) -> Expr {
        self.compare(Comparison::Lt, right)
    }

    fn like(self, pattern: Expr) -> Expr {
        self.compare(Comparison::Like, pattern)
    }

    fn in_list(self, items: Vec<BoundValue>) -> Expr {
        Expr::InList {
            target: Box::new(self.into_expr()),
            items,
        }
    }

    fn between(self, low: impl Into<BoundValue>, high: impl Into<BoundValue>) -> Expr {
        Expr::Between {
            target: Box::new(self.into_expr()),
            low: low.into(),
            high: high.into(),
        }
    }
}

impl ExprExt for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}
