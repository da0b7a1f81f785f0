//! The caller-facing service: lookup, page-size bounds and configuration.

#[path = "../common/mod.rs"]
mod common;

use common::{bank, clock, identity, request_fields};
use reportgen::config::{ReportSettings, Settings};
use reportgen::prelude::*;

fn service() -> ReportService {
    ReportService::new(
        ReportRegistry::with_defaults(),
        Box::new(bank()),
        Box::new(identity()),
        Box::new(clock()),
    )
}

#[test]
fn test_generate_uses_default_page_size() {
    let service = service().with_limits(ReportSettings {
        default_page_size: 2,
        max_page_size: 10,
        lookahead: LookAhead::NextPage,
    });

    let page = service
        .generate("Teller", "Transactions", &request_fields(&["Teller"]), 0, None)
        .unwrap();

    assert_eq!(page.rows.len(), 2);
    assert!(page.has_more);
    assert_eq!(page.generated_by, "operator");
}

#[test]
fn test_page_size_bounds() {
    let service = service();
    let request = request_fields(&["Teller"]);

    for size in [0, 501] {
        let err = service
            .generate("Teller", "Transactions", &request, 0, Some(size))
            .unwrap_err();
        assert!(matches!(err, ReportError::InvalidPageSize { max: 500, .. }));
        assert!(err.is_client_error());
    }
    assert!(service
        .generate("Teller", "Transactions", &request, 0, Some(500))
        .is_ok());
}

#[test]
fn test_unknown_report() {
    let err = service()
        .generate("Payroll", "Salaries", &request_fields(&["Name"]), 0, None)
        .unwrap_err();
    assert_eq!(err.to_string(), "report not found: Payroll/Salaries");
    assert!(service().definition("Payroll", "Salaries").is_err());
}

#[test]
fn test_definition_lookup() {
    let service = service();
    let definition = service.definition("Accounting", "Balancesheet").unwrap();
    assert_eq!(definition.name, "Balance Sheet");
    assert_eq!(service.registry().len(), 3);
}

#[test]
fn test_validation_failure_surfaces_unchanged() {
    let err = service()
        .generate("Teller", "Transactions", &request_fields(&["Teller", "Branch"]), 0, None)
        .unwrap_err();
    assert!(matches!(err, ReportError::Validation(ref v) if v.unknown == vec!["Branch"]));
}

#[test]
fn test_explain_matches_page_windows() {
    let explained = service()
        .explain(
            "Teller",
            "Transactions",
            &request_fields(&["Teller Id", "Amount"]),
            1,
            Some(5),
            Dialect::Postgres,
        )
        .unwrap();

    assert_eq!(explained.len(), 3);
    assert!(explained[0].statement.sql.ends_with("LIMIT 5 OFFSET 5"));
    assert!(explained[1].statement.sql.ends_with("LIMIT 5 OFFSET 10"));
    assert!(explained[2].statement.sql.contains("WHERE \"teller\".\"id\" = $1"));
}

#[test]
fn test_explain_checks_page_size() {
    let result = service().explain(
        "Teller",
        "Transactions",
        &request_fields(&["Teller Id"]),
        0,
        Some(0),
        Dialect::Sqlite,
    );
    assert!(matches!(result, Err(ReportError::InvalidPageSize { size: 0, .. })));
}

#[test]
fn test_from_settings() {
    let settings = Settings::from_toml(
        r#"
[reports]
default_page_size = 1
max_page_size = 2
lookahead = "probe"

[identity]
user = "auditor"
"#,
    )
    .unwrap();

    let service = ReportService::from_settings(&settings, Box::new(bank())).unwrap();
    assert!(service
        .registry()
        .iter()
        .all(|spec| spec.lookahead == LookAhead::Probe));

    let page = service
        .generate("Teller", "Transactions", &request_fields(&["Teller"]), 2, None)
        .unwrap();
    assert_eq!(page.rows[0].texts(), vec![vec!["T-003"]]);
    assert!(!page.has_more);
    assert_eq!(page.generated_by, "auditor");

    assert!(service
        .generate("Teller", "Transactions", &request_fields(&["Teller"]), 0, Some(3))
        .is_err());
}

#[test]
fn test_from_settings_rejects_inconsistent_limits() {
    let mut settings = Settings::default();
    settings.reports.default_page_size = 20;
    settings.reports.max_page_size = 10;

    assert!(ReportService::from_settings(&settings, Box::new(bank())).is_err());
}
