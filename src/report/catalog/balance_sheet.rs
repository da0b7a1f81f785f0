//! Accounting / Balancesheet: ledgers, their sub-ledgers and the accounts
//! booked on each sub-ledger.

use crate::model::{DisplayableField, FieldType, ReportDefinition};
use crate::report::layout::{Hierarchy, Level, ParentLink, SummaryRule};
use crate::report::mapping::{ColumnMapping, ColumnRef};
use crate::report::specification::ReportSpecification;
use crate::sql::TableRef;

use super::ACCOUNTING;

pub const IDENTIFIER: &str = "Balancesheet";

pub const ID: &str = "Id";
pub const LEDGER_IDENTIFIER: &str = "Identifier";
pub const LEDGER: &str = "Ledger";
pub const PARENT_LEDGER: &str = "Parent Ledger";
pub const ACCOUNT_IDENTIFIER: &str = "Account Identifier";
pub const ACCOUNT_NAME: &str = "Account Name";
pub const ACCOUNT_BALANCE: &str = "Account Balance";

fn ledger_columns() -> ColumnMapping {
    ColumnMapping::new()
        .with(ID, ColumnRef::new("ledger", "id"))
        .with(LEDGER_IDENTIFIER, ColumnRef::new("ledger", "identifier"))
        .with(LEDGER, ColumnRef::new("ledger", "description"))
}

fn ledgers() -> TableRef {
    TableRef::new("thoth_ledgers").with_alias("ledger")
}

pub fn specification() -> ReportSpecification {
    let root = Level::root(
        "ledger",
        ledgers(),
        ledger_columns(),
        ColumnRef::new("ledger", "identifier"),
    );

    let sub_ledger = Level::linked(
        "sub-ledger",
        ledgers(),
        ledger_columns(),
        ColumnRef::new("ledger", "identifier"),
        ParentLink::Key(ColumnRef::new("ledger", "parent_ledger_id")),
    );

    // Parent Ledger is filterable and requestable but not advertised.
    let account = Level::linked(
        "account",
        TableRef::new("thoth_accounts").with_alias("acc"),
        ColumnMapping::new()
            .with(PARENT_LEDGER, ColumnRef::new("acc", "ledger_id"))
            .with(ACCOUNT_IDENTIFIER, ColumnRef::new("acc", "identifier"))
            .with(ACCOUNT_NAME, ColumnRef::new("acc", "a_name"))
            .with(ACCOUNT_BALANCE, ColumnRef::new("acc", "balance")),
        ColumnRef::new("acc", "identifier"),
        ParentLink::Join {
            table: ledgers(),
            child: ColumnRef::new("acc", "ledger_id"),
            parent: ColumnRef::new("ledger", "id"),
        },
    );

    let definition = ReportDefinition {
        identifier: IDENTIFIER.to_string(),
        name: "Balance Sheet".to_string(),
        description: "Balance sheet report".to_string(),
        query_parameters: Vec::new(),
        displayable_fields: [
            ID,
            LEDGER_IDENTIFIER,
            LEDGER,
            ACCOUNT_IDENTIFIER,
            ACCOUNT_NAME,
            ACCOUNT_BALANCE,
        ]
        .into_iter()
        .map(|name| DisplayableField::new(name, FieldType::Text).mandatory())
        .collect(),
    };

    ReportSpecification::new(
        ACCOUNTING,
        definition,
        Hierarchy::with_grandchild(root, sub_ledger, account, SummaryRule::leading(3)),
    )
}
