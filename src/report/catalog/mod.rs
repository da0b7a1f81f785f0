//! Built-in report types.

pub mod balance_sheet;
pub mod employee;
pub mod teller;

use super::specification::ReportSpecification;

pub const ACCOUNTING: &str = "Accounting";
pub const TELLER: &str = "Teller";
pub const ORGANIZATION: &str = "Organization";

/// Every built-in specification.
pub fn all() -> Vec<ReportSpecification> {
    vec![
        balance_sheet::specification(),
        teller::specification(),
        employee::specification(),
    ]
}
