//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use chrono::{TimeZone, Utc};
use reportgen::prelude::*;
use sqlparser::dialect::{
    DuckDbDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};
use sqlparser::parser::Parser;

// ============================================================================
// Recording executor
// ============================================================================

/// Answers each statement with `respond` and records it.
pub struct RecordingExecutor<F> {
    respond: F,
    statements: RefCell<Vec<Statement>>,
}

impl<F> RecordingExecutor<F>
where
    F: Fn(&Statement) -> Vec<Record>,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            statements: RefCell::new(Vec::new()),
        }
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.statements.borrow().len()
    }
}

impl<F> QueryExecutor for RecordingExecutor<F>
where
    F: Fn(&Statement) -> Vec<Record>,
{
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute(&self, statement: &Statement) -> Result<Vec<Record>, ExecutionError> {
        self.statements.borrow_mut().push(statement.clone());
        Ok((self.respond)(statement))
    }
}

/// Whether `statement` pages the root level (it is the only one with LIMIT).
pub fn is_root(statement: &Statement) -> bool {
    statement.sql.contains("LIMIT")
}

/// Whether `statement` is the first page (no OFFSET).
pub fn is_first_page(statement: &Statement) -> bool {
    is_root(statement) && !statement.sql.contains("OFFSET")
}

// ============================================================================
// Collaborators
// ============================================================================

pub fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2017, 6, 1, 12, 30, 0).unwrap())
}

pub fn identity() -> StaticIdentity {
    StaticIdentity::new("operator")
}

pub fn text_field(name: &str) -> DisplayableField {
    DisplayableField::new(name, FieldType::Text)
}

pub fn request_fields(names: &[&str]) -> ReportRequest {
    names
        .iter()
        .fold(ReportRequest::new(), |request, name| request.field(text_field(name)))
}

// ============================================================================
// SQL validity
// ============================================================================

pub fn assert_valid_sql(sql: &str, dialect: Dialect) {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Sqlite => Box::new(SQLiteDialect {}),
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::DuckDb => Box::new(DuckDbDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::TSql => Box::new(MsSqlDialect {}),
    };
    if let Err(e) = Parser::parse_sql(&*parser_dialect, sql) {
        panic!("Invalid SQL for {:?}: {}\nSQL: {}", dialect, e, sql);
    }
}

// ============================================================================
// Seeded SQLite database
// ============================================================================

pub const BANK_FIXTURE: &str = "
    CREATE TABLE thoth_ledgers (
        id INTEGER PRIMARY KEY,
        identifier TEXT NOT NULL,
        description TEXT,
        parent_ledger_id INTEGER
    );
    INSERT INTO thoth_ledgers VALUES (1, '1000', 'Assets', NULL);
    INSERT INTO thoth_ledgers VALUES (2, '2000', 'Liabilities', NULL);
    INSERT INTO thoth_ledgers VALUES (3, '1100', 'Cash', 1);
    INSERT INTO thoth_ledgers VALUES (4, '1200', 'Receivables', 1);
    INSERT INTO thoth_ledgers VALUES (5, '2100', 'Payables', 2);

    CREATE TABLE thoth_accounts (
        id INTEGER PRIMARY KEY,
        identifier TEXT NOT NULL,
        a_name TEXT,
        balance REAL,
        ledger_id INTEGER
    );
    INSERT INTO thoth_accounts VALUES (1, '1100-01', 'Main Till', 1500.5, 3);
    INSERT INTO thoth_accounts VALUES (2, '1100-02', 'Vault', 20000.0, 3);
    INSERT INTO thoth_accounts VALUES (3, '1200-01', 'Customer A', 300.0, 4);
    INSERT INTO thoth_accounts VALUES (4, '2100-01', 'Supplier B', NULL, 5);

    CREATE TABLE tajet_teller (
        id INTEGER PRIMARY KEY,
        identifier TEXT NOT NULL
    );
    INSERT INTO tajet_teller VALUES (1, 'T-001');
    INSERT INTO tajet_teller VALUES (2, 'T-002');
    INSERT INTO tajet_teller VALUES (3, 'T-003');

    CREATE TABLE tajet_teller_transactions (
        id INTEGER PRIMARY KEY,
        teller_id INTEGER NOT NULL,
        transaction_type TEXT,
        transaction_date TEXT,
        customer_identifier TEXT,
        customer_account_identifier TEXT,
        target_account_identifier TEXT,
        clerk TEXT,
        amount REAL,
        a_state TEXT
    );
    INSERT INTO tajet_teller_transactions
        VALUES (1, 1, 'DEPOSIT', '2017-06-01', 'C1', 'C1-SAV', NULL, 'alice', 100.0, 'OPEN');
    INSERT INTO tajet_teller_transactions
        VALUES (2, 1, 'WITHDRAWAL', '2017-06-02', 'C2', 'C2-CHK', NULL, 'alice', 50.0, 'CLOSED');
    INSERT INTO tajet_teller_transactions
        VALUES (3, 2, 'TRANSFER', '2017-06-03', 'C1', 'C1-SAV', 'C2-CHK', 'bob', 25.0, 'PENDING');
    INSERT INTO tajet_teller_transactions
        VALUES (4, 2, 'DEPOSIT', '2017-07-01', 'C3', 'C3-SAV', NULL, 'bob', 10.0, 'OPEN');

    CREATE TABLE horus_offices (
        id INTEGER PRIMARY KEY,
        identifier TEXT NOT NULL,
        a_name TEXT
    );
    INSERT INTO horus_offices VALUES (1, 'HQ', 'Head Office');
    INSERT INTO horus_offices VALUES (2, 'BR1', 'Branch One');

    CREATE TABLE horus_employees (
        id INTEGER PRIMARY KEY,
        identifier TEXT NOT NULL,
        given_name TEXT,
        middle_name TEXT,
        surname TEXT,
        created_by TEXT,
        assigned_office_id INTEGER
    );
    INSERT INTO horus_employees VALUES (1, 'jdoe', 'John', NULL, 'Doe', 'admin', 1);
    INSERT INTO horus_employees VALUES (2, 'asmith', 'Anna', 'Maria', 'Smith', 'admin', 2);
    INSERT INTO horus_employees VALUES (3, 'bnew', 'Ben', NULL, 'New', 'jdoe', NULL);
";

/// An in-memory database holding the bank fixture.
pub fn bank() -> SqliteExecutor {
    let executor = SqliteExecutor::open_in_memory().unwrap();
    executor.connection().execute_batch(BANK_FIXTURE).unwrap();
    executor
}
