//! The built-in report catalog and its registry.

use reportgen::prelude::*;
use reportgen::report::catalog::{self, balance_sheet, employee, teller};

#[test]
fn test_registry_lists_builtin_reports() {
    let registry = ReportRegistry::with_defaults();

    assert_eq!(registry.len(), 3);
    assert_eq!(
        registry.categories(),
        vec![catalog::ACCOUNTING, catalog::ORGANIZATION, catalog::TELLER]
    );

    let teller_reports: Vec<&str> = registry
        .definitions(catalog::TELLER)
        .iter()
        .map(|d| d.identifier.as_str())
        .collect();
    assert_eq!(teller_reports, vec![teller::IDENTIFIER]);
    assert!(registry.definitions("Payroll").is_empty());
}

#[test]
fn test_lookup_unknown_report() {
    let registry = ReportRegistry::with_defaults();

    let err = registry.lookup("Teller", "Balancesheet").unwrap_err();
    assert!(matches!(err, ReportError::ReportNotFound { .. }));
    assert_eq!(err.to_string(), "report not found: Teller/Balancesheet");

    // Category and identifier are exact.
    assert!(registry.lookup("teller", "Transactions").is_err());
}

#[test]
fn test_register_replaces_same_key() {
    let mut registry = ReportRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.register(teller::specification()).is_none());

    let mut renamed = teller::specification();
    renamed.definition.name = "Cash Desk".into();
    let previous = registry.register(renamed).unwrap();

    assert_eq!(previous.definition.name, "Teller Transactions");
    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry
            .lookup(catalog::TELLER, teller::IDENTIFIER)
            .unwrap()
            .definition
            .name,
        "Cash Desk"
    );
}

#[test]
fn test_custom_report_registers_alongside_builtins() {
    let root = Level::root(
        "branch",
        TableRef::new("branches").with_alias("b"),
        ColumnMapping::new().with("Branch", ColumnRef::new("b", "name")),
        ColumnRef::new("b", "id"),
    );
    let definition = ReportDefinition {
        identifier: "Branches".into(),
        name: "Branch Listing".into(),
        description: "All branches.".into(),
        query_parameters: Vec::new(),
        displayable_fields: vec![DisplayableField::new("Branch", FieldType::Text).mandatory()],
    };

    let mut registry = ReportRegistry::with_defaults();
    registry.register(ReportSpecification::new(
        catalog::ORGANIZATION,
        definition,
        Hierarchy::flat(root),
    ));

    assert_eq!(registry.len(), 4);
    let identifiers: Vec<&str> = registry
        .definitions(catalog::ORGANIZATION)
        .iter()
        .map(|d| d.identifier.as_str())
        .collect();
    assert_eq!(identifiers, vec!["Branches", employee::IDENTIFIER]);
}

#[test]
fn test_with_lookahead_applies_to_every_report() {
    let registry = ReportRegistry::with_defaults().with_lookahead(LookAhead::Probe);
    assert!(registry.iter().all(|spec| spec.lookahead == LookAhead::Probe));
}

#[test]
fn test_balance_sheet_definition() {
    let spec = balance_sheet::specification();
    let definition = spec.report_definition();

    assert_eq!(spec.category, catalog::ACCOUNTING);
    assert_eq!(definition.name, "Balance Sheet");
    assert!(definition.query_parameters.is_empty());
    assert_eq!(definition.mandatory_fields().count(), 6);
    assert_eq!(spec.hierarchy.levels().len(), 3);
    assert_eq!(
        spec.hierarchy
            .child
            .as_ref()
            .and_then(|c| c.grandchild.as_ref())
            .map(|g| g.summary.positions.clone()),
        Some(vec![0, 1, 2])
    );
}

#[test]
fn test_teller_definition() {
    let spec = teller::specification();
    let definition = spec.report_definition();

    let parameters: Vec<(&str, FieldType, Operator)> = definition
        .query_parameters
        .iter()
        .map(|p| (p.name.as_str(), p.field_type, p.operator))
        .collect();
    assert_eq!(
        parameters,
        vec![
            (teller::TRANSACTION_DATE, FieldType::Date, Operator::Between),
            (teller::STATUS, FieldType::Text, Operator::In),
        ]
    );
    assert_eq!(definition.displayable_fields.len(), 10);
    assert_eq!(spec.hierarchy.levels().len(), 2);
}

#[test]
fn test_employee_definition() {
    let spec = employee::specification();
    let definition = spec.report_definition();

    assert_eq!(definition.name, "Employee Listing");
    assert_eq!(definition.displayable_fields.len(), 7);
    assert!(!definition.field(employee::MIDDLE_NAME).unwrap().mandatory);
    assert!(definition.field(employee::OFFICE_NAME).unwrap().mandatory);

    let office = &spec.hierarchy.child.as_ref().unwrap().level;
    assert!(office.distinct);
    assert_eq!(
        office.parent.as_ref().map(ParentLink::key_column),
        Some(&ColumnRef::new("ho", "id"))
    );
}

#[test]
fn test_every_report_has_a_root_field() {
    for spec in catalog::all() {
        let root = &spec.hierarchy.root.columns;
        assert!(
            spec.definition
                .displayable_fields
                .iter()
                .any(|f| root.contains(&f.name)),
            "{} has no root field",
            spec.identifier()
        );
    }
}
