//! Tokens: the smallest pieces of rendered report SQL.
//!
//! A [`TokenStream`] is dialect-neutral until it is rendered; quoting,
//! placeholders and literal escaping are decided at that point.

use std::borrow::Cow;
use std::fmt;

use super::dialect::{Dialect, SqlDialect};

/// A value carried next to the SQL text rather than spliced into it.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl BoundValue {
    /// Escaped literal form, used when a statement is rendered inline.
    fn literal(&self, dialect: Dialect) -> String {
        match self {
            BoundValue::Text(s) => dialect.quote_string(s),
            BoundValue::Int(n) => n.to_string(),
            // NaN and infinities have no SQL literal.
            BoundValue::Float(f) if !f.is_finite() => "NULL".into(),
            BoundValue::Float(f) => ryu::Buffer::new().format(*f).to_string(),
        }
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Text(s) => f.write_str(s),
            BoundValue::Int(n) => write!(f, "{}", n),
            BoundValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for BoundValue {
    fn from(s: &str) -> Self {
        BoundValue::Text(s.into())
    }
}

impl From<String> for BoundValue {
    fn from(s: String) -> Self {
        BoundValue::Text(s)
    }
}

impl From<i64> for BoundValue {
    fn from(n: i64) -> Self {
        BoundValue::Int(n)
    }
}

impl From<f64> for BoundValue {
    fn from(f: f64) -> Self {
        BoundValue::Float(f)
    }
}

/// Everything a report statement can be made of.
///
/// New variants must be given a rendering in [`Token::render`]; the match
/// there is exhaustive.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Clauses
    Select,
    Distinct,
    From,
    Left,
    Join,
    On,
    Where,
    OrderBy,
    Limit,
    Offset,
    Fetch,
    Next,
    Rows,
    Only,

    // Predicates
    And,
    In,
    Between,
    Like,
    Eq,
    Lt,
    Gt,

    // Misc keywords
    As,
    Asc,
    Null,

    Comma,
    Dot,
    LParen,
    RParen,

    Space,
    Newline,
    Indent(usize),

    /// Table, alias or column name; quoted per dialect.
    Ident(String),
    /// Row count or offset.
    Count(u64),
    /// A bound value: a placeholder in a [`Statement`], an escaped literal
    /// in inline SQL.
    Bind(BoundValue),
}

impl Token {
    /// Inline rendering of one token. Bound values become literals.
    pub fn render(&self, dialect: Dialect) -> Cow<'static, str> {
        let fixed = match self {
            Token::Select => "SELECT",
            Token::Distinct => "DISTINCT",
            Token::From => "FROM",
            Token::Left => "LEFT",
            Token::Join => "JOIN",
            Token::On => "ON",
            Token::Where => "WHERE",
            Token::OrderBy => "ORDER BY",
            Token::Limit => "LIMIT",
            Token::Offset => "OFFSET",
            Token::Fetch => "FETCH",
            Token::Next => "NEXT",
            Token::Rows => "ROWS",
            Token::Only => "ONLY",
            Token::And => "AND",
            Token::In => "IN",
            Token::Between => "BETWEEN",
            Token::Like => "LIKE",
            Token::Eq => "=",
            Token::Lt => "<",
            Token::Gt => ">",
            Token::As => "AS",
            Token::Asc => "ASC",
            Token::Null => "NULL",
            Token::Comma => ",",
            Token::Dot => ".",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Space => " ",
            Token::Newline => "\n",
            Token::Indent(depth) => return Cow::Owned("  ".repeat(*depth)),
            Token::Ident(name) => return Cow::Owned(dialect.quote_identifier(name)),
            Token::Count(n) => return Cow::Owned(n.to_string()),
            Token::Bind(value) => return Cow::Owned(value.literal(dialect)),
        };
        Cow::Borrowed(fixed)
    }
}

/// SQL text plus the values for its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    /// In placeholder order.
    pub params: Vec<BoundValue>,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// An ordered run of tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    pub fn append(&mut self, other: TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens);
        self
    }

    /// Push `items` separated by `", "`.
    pub fn comma_separated<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = TokenStream>,
    {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.comma().space();
            }
            self.append(item);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }

    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }

    /// A line break followed by `depth` levels of indentation.
    pub fn line(&mut self, depth: usize) -> &mut Self {
        self.push(Token::Newline);
        if depth > 0 {
            self.push(Token::Indent(depth));
        }
        self
    }

    /// Render with values inlined as escaped literals.
    pub fn serialize(&self, dialect: Dialect) -> String {
        self.render(dialect, false).sql
    }

    /// Render with a placeholder per bound value; the values are collected
    /// into [`Statement::params`] in the order they appear.
    pub fn to_statement(&self, dialect: Dialect) -> Statement {
        self.render(dialect, true)
    }

    fn render(&self, dialect: Dialect, placeholders: bool) -> Statement {
        let mut sql = String::new();
        let mut params = Vec::new();
        for token in &self.tokens {
            match token {
                Token::Bind(value) if placeholders => {
                    params.push(value.clone());
                    sql.push_str(&dialect.placeholder(params.len()));
                }
                other => sql.push_str(&other.render(dialect)),
            }
        }
        Statement { sql, params }
    }
}
