//! Teller / Transactions: every teller with the transactions booked on it.

use crate::model::{DisplayableField, FieldType, Operator, QueryParameter, ReportDefinition};
use crate::report::layout::{Hierarchy, Level, ParentLink};
use crate::report::mapping::{ColumnMapping, ColumnRef};
use crate::report::specification::ReportSpecification;
use crate::sql::TableRef;

use super::TELLER;

pub const IDENTIFIER: &str = "Transactions";

pub const TELLER_ID: &str = "Teller Id";
pub const TELLER_IDENTIFIER: &str = "Teller";
pub const TRANSACTION_TYPE: &str = "Transaction Type";
pub const TRANSACTION_DATE: &str = "Transaction Date";
pub const CUSTOMER: &str = "Customer";
pub const SOURCE_ACCOUNT: &str = "Source Account";
pub const TARGET_ACCOUNT: &str = "Target Account";
pub const CLERK: &str = "Clerk";
pub const AMOUNT: &str = "Amount";
pub const STATUS: &str = "Status";

fn tellers() -> TableRef {
    TableRef::new("tajet_teller").with_alias("teller")
}

pub fn specification() -> ReportSpecification {
    let root = Level::root(
        "teller",
        tellers(),
        ColumnMapping::new()
            .with(TELLER_ID, ColumnRef::new("teller", "id"))
            .with(TELLER_IDENTIFIER, ColumnRef::new("teller", "identifier")),
        ColumnRef::new("teller", "id"),
    );

    let transaction = Level::linked(
        "transaction",
        TableRef::new("tajet_teller_transactions").with_alias("trx"),
        ColumnMapping::new()
            .with(TRANSACTION_TYPE, ColumnRef::new("trx", "transaction_type"))
            .with(TRANSACTION_DATE, ColumnRef::new("trx", "transaction_date"))
            .with(CUSTOMER, ColumnRef::new("trx", "customer_identifier"))
            .with(SOURCE_ACCOUNT, ColumnRef::new("trx", "customer_account_identifier"))
            .with(TARGET_ACCOUNT, ColumnRef::new("trx", "target_account_identifier"))
            .with(CLERK, ColumnRef::new("trx", "clerk"))
            .with(AMOUNT, ColumnRef::new("trx", "amount"))
            .with(STATUS, ColumnRef::new("trx", "a_state")),
        ColumnRef::new("trx", "id"),
        ParentLink::Join {
            table: tellers(),
            child: ColumnRef::new("trx", "teller_id"),
            parent: ColumnRef::new("teller", "id"),
        },
    );

    let optional = [TARGET_ACCOUNT, CLERK];
    let displayable_fields = [
        (TELLER_ID, FieldType::Text),
        (TELLER_IDENTIFIER, FieldType::Text),
        (TRANSACTION_TYPE, FieldType::Text),
        (TRANSACTION_DATE, FieldType::Date),
        (CUSTOMER, FieldType::Text),
        (SOURCE_ACCOUNT, FieldType::Text),
        (TARGET_ACCOUNT, FieldType::Text),
        (CLERK, FieldType::Text),
        (AMOUNT, FieldType::Text),
        (STATUS, FieldType::Text),
    ]
    .into_iter()
    .map(|(name, ty)| {
        let field = DisplayableField::new(name, ty);
        if optional.contains(&name) {
            field
        } else {
            field.mandatory()
        }
    })
    .collect();

    let definition = ReportDefinition {
        identifier: IDENTIFIER.to_string(),
        name: "Teller Transactions".to_string(),
        description: "List all teller-cashier transactions.".to_string(),
        query_parameters: vec![
            QueryParameter::new(TRANSACTION_DATE, FieldType::Date).operator(Operator::Between),
            QueryParameter::new(STATUS, FieldType::Text).operator(Operator::In),
        ],
        displayable_fields,
    };

    ReportSpecification::new(TELLER, definition, Hierarchy::with_child(root, transaction))
}
