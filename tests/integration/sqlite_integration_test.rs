//! End-to-end generation of the built-in reports against a seeded SQLite database.

#[path = "../common/mod.rs"]
mod common;

use common::{bank, clock, identity, request_fields};
use reportgen::prelude::*;
use reportgen::report::Assembler;

fn generate(
    executor: &SqliteExecutor,
    category: &str,
    identifier: &str,
    request: &ReportRequest,
    page: u32,
    size: u32,
) -> ReportResult<ReportPage> {
    let identity = identity();
    let clock = clock();
    let ctx = ReportContext::new(executor, &identity, &clock);
    ReportRegistry::with_defaults()
        .lookup(category, identifier)?
        .generate_report(&ctx, request, page, size)
}

fn balance_sheet_request() -> ReportRequest {
    request_fields(&[
        "Id",
        "Identifier",
        "Ledger",
        "Account Identifier",
        "Account Name",
        "Account Balance",
    ])
}

#[test]
fn test_balance_sheet() {
    let db = bank();
    let page = generate(&db, "Accounting", "Balancesheet", &balance_sheet_request(), 0, 10).unwrap();

    assert_eq!(page.name, "Balance Sheet");
    // Sub-ledgers also sit on the root level; every ledger is a root row.
    assert_eq!(page.rows.len(), 5);
    assert!(!page.has_more);

    assert_eq!(
        page.rows[0].texts(),
        vec![
            vec!["1"],
            vec!["1000"],
            vec!["Assets"],
            vec!["3"],
            vec!["1100"],
            vec!["Cash"],
            vec!["1100-01"],
            vec!["Main Till"],
            vec!["1500.5"],
            vec!["1100-02"],
            vec!["Vault"],
            vec!["20000.0"],
            vec!["4"],
            vec!["1200"],
            vec!["Receivables"],
            vec!["1200-01"],
            vec!["Customer A"],
            vec!["300.0"],
            vec!["3 1100 Cash", "4 1200 Receivables"],
        ]
    );

    // Liabilities: one sub-ledger whose only account has no balance.
    assert_eq!(
        page.rows[3].texts(),
        vec![
            vec!["2"],
            vec!["2000"],
            vec!["Liabilities"],
            vec!["5"],
            vec!["2100"],
            vec!["Payables"],
            vec!["2100-01"],
            vec!["Supplier B"],
            vec![],
            vec!["5 2100 Payables"],
        ]
    );

    // Cash has no sub-ledgers of its own: no summary cell.
    assert_eq!(page.rows[1].texts(), vec![vec!["3"], vec!["1100"], vec!["Cash"]]);
}

#[test]
fn test_teller_transactions_with_status_filter() {
    let db = bank();
    let request = request_fields(&["Teller Id", "Teller", "Amount", "Status"]).parameter(
        QueryParameter::new("Status", FieldType::Text)
            .operator(Operator::In)
            .value("OPEN, CLOSED"),
    );

    let page = generate(&db, "Teller", "Transactions", &request, 0, 10).unwrap();

    let rows: Vec<Vec<Vec<&str>>> = page.rows.iter().map(|r| r.texts()).collect();
    assert_eq!(
        rows,
        vec![
            vec![
                vec!["1"],
                vec!["T-001"],
                vec!["100.0"],
                vec!["OPEN"],
                vec!["50.0"],
                vec!["CLOSED"],
            ],
            vec![vec!["2"], vec!["T-002"], vec!["10.0"], vec!["OPEN"]],
            vec![vec!["3"], vec!["T-003"]],
        ]
    );
    assert_eq!(page.generated_by, "operator");
    assert_eq!(page.generated_on, "2017-06-01T12:30:00.000Z");
}

#[test]
fn test_teller_transactions_date_range() {
    let db = bank();
    let request = request_fields(&["Teller Id", "Transaction Date", "Clerk"]).parameter(
        QueryParameter::new("Transaction Date", FieldType::Date)
            .operator(Operator::Between)
            .value("2017-06-02..2017-06-30"),
    );

    let page = generate(&db, "Teller", "Transactions", &request, 0, 10).unwrap();

    let rows: Vec<Vec<Vec<&str>>> = page.rows.iter().map(|r| r.texts()).collect();
    assert_eq!(
        rows,
        vec![
            vec![vec!["1"], vec!["2017-06-02"], vec!["alice"]],
            vec![vec!["2"], vec!["2017-06-03"], vec!["bob"]],
            vec![vec!["3"]],
        ]
    );
}

#[test]
fn test_fan_out_keys_on_leading_root_column() {
    let db = bank();
    // Without Teller Id the leading root column is the teller code, which
    // matches no transaction key.
    let request = request_fields(&["Teller", "Amount"]);

    let page = generate(&db, "Teller", "Transactions", &request, 0, 10).unwrap();

    assert!(page.rows.iter().all(|r| r.len() == 1));
}

#[test]
fn test_employee_listing() {
    let db = bank();
    let request = request_fields(&["Office Id", "Username", "Middle Name", "Office Name"]);

    let page = generate(&db, "Organization", "Employee", &request, 0, 10).unwrap();

    let rows: Vec<Vec<Vec<&str>>> = page.rows.iter().map(|r| r.texts()).collect();
    assert_eq!(
        rows,
        vec![
            vec![vec!["2"], vec!["asmith"], vec!["Maria"], vec!["Branch One"]],
            vec![vec![], vec!["bnew"], vec![]],
            vec![vec!["1"], vec!["jdoe"], vec![], vec!["Head Office"]],
        ]
    );
}

#[test]
fn test_pages_cover_every_root_row_once() {
    let db = bank();
    let request = request_fields(&["Teller"]);

    for size in 1..=4u32 {
        let mut seen = Vec::new();
        let mut page_index = 0;
        loop {
            let page = generate(&db, "Teller", "Transactions", &request, page_index, size).unwrap();
            assert!(page.rows.len() <= size as usize);
            seen.extend(page.rows.iter().map(|r| r.values[0].to_string()));
            if !page.has_more {
                break;
            }
            page_index += 1;
        }
        assert_eq!(seen, vec!["T-001", "T-002", "T-003"], "size {size}");
    }
}

#[test]
fn test_page_past_the_end_is_empty() {
    let db = bank();
    let page = generate(&db, "Teller", "Transactions", &request_fields(&["Teller"]), 5, 2).unwrap();
    assert!(page.rows.is_empty());
    assert!(!page.has_more);
}

#[test]
fn test_probe_matches_next_page() {
    let db = bank();
    let identity = identity();
    let clock = clock();
    let ctx = ReportContext::new(&db, &identity, &clock);
    let registry = ReportRegistry::with_defaults();
    let probing = registry.clone().with_lookahead(LookAhead::Probe);
    let request = request_fields(&["Teller Id"]);

    for page_index in 0..3 {
        let a = registry
            .lookup("Teller", "Transactions")
            .unwrap()
            .generate_report(&ctx, &request, page_index, 1)
            .unwrap();
        let b = probing
            .lookup("Teller", "Transactions")
            .unwrap()
            .generate_report(&ctx, &request, page_index, 1)
            .unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_empty_window_agrees_across_lookahead() {
    let db = bank();
    let spec = ReportRegistry::with_defaults()
        .lookup("Teller", "Transactions")
        .unwrap()
        .clone();
    let plan = spec.plan(&request_fields(&["Teller"])).unwrap();

    for page_index in 0..2 {
        let next = Assembler::new(&db, LookAhead::NextPage)
            .assemble(&plan, page_index, 0)
            .unwrap();
        let probe = Assembler::new(&db, LookAhead::Probe)
            .assemble(&plan, page_index, 0)
            .unwrap();
        assert!(next.rows.is_empty() && probe.rows.is_empty());
        assert!(!next.has_more);
        assert_eq!(next.has_more, probe.has_more);
    }

    let err = generate(&db, "Teller", "Transactions", &request_fields(&["Teller"]), 0, 0)
        .unwrap_err();
    assert!(matches!(err, ReportError::InvalidPageSize { size: 0, .. }));
}

#[test]
fn test_missing_table_is_execution_error() {
    let db = SqliteExecutor::open_in_memory().unwrap();
    let err = generate(&db, "Teller", "Transactions", &request_fields(&["Teller"]), 0, 5)
        .unwrap_err();
    assert!(matches!(err, ReportError::Execution(ExecutionError::Sqlite(_))));
}

#[test]
fn test_open_missing_file_fails() {
    let dir = std::env::temp_dir().join("reportgen-missing-dir-for-test");
    assert!(SqliteExecutor::open(dir.join("absent.sqlite")).is_err());
}
