//! Request validation against the union of a report's mappings.

use reportgen::prelude::*;
use reportgen::report::validate_request;

fn field(name: &str) -> DisplayableField {
    DisplayableField::new(name, FieldType::Text)
}

fn known() -> ColumnMapping {
    ColumnMapping::new()
        .with("Teller Id", ColumnRef::new("teller", "id"))
        .with("Amount", ColumnRef::new("trx", "amount"))
        .with("Status", ColumnRef::new("trx", "a_state"))
}

#[test]
fn test_known_names_pass() {
    let request = ReportRequest::new()
        .field(field("Amount"))
        .field(field("Teller Id"))
        .parameter(QueryParameter::new("Status", FieldType::Text).value("OPEN"));
    assert!(validate_request(&known(), &request).is_ok());
}

#[test]
fn test_every_unknown_name_is_reported() {
    let request = ReportRequest::new()
        .field(field("Amount"))
        .field(field("Branch"))
        .field(field("Cashier"))
        .parameter(QueryParameter::new("Region", FieldType::Text).value("North"));

    let err = validate_request(&known(), &request).unwrap_err();
    assert_eq!(err.unknown, vec!["Region", "Branch", "Cashier"]);
    assert_eq!(
        err.to_string(),
        "Unspecified fields requested: Region, Branch, Cashier"
    );
}

#[test]
fn test_unknown_names_listed_once() {
    let request = ReportRequest::new()
        .field(field("Branch"))
        .parameter(QueryParameter::new("Branch", FieldType::Text).value("x"))
        .parameter(QueryParameter::new("Branch", FieldType::Text).value("y"));

    let err = validate_request(&known(), &request).unwrap_err();
    assert_eq!(err.unknown, vec!["Branch"]);
}

#[test]
fn test_unknown_parameter_fails_even_without_value() {
    let request = ReportRequest::new()
        .field(field("Amount"))
        .parameter(QueryParameter::new("Region", FieldType::Text));
    assert!(validate_request(&known(), &request).is_err());
}

#[test]
fn test_names_are_case_sensitive() {
    let request = ReportRequest::new().field(field("amount"));
    let err = validate_request(&known(), &request).unwrap_err();
    assert_eq!(err.unknown, vec!["amount"]);
}

#[test]
fn test_omitted_mandatory_fields_are_not_enforced() {
    let spec = ReportRegistry::with_defaults()
        .lookup("Teller", "Transactions")
        .unwrap()
        .clone();
    assert!(spec.definition.mandatory_fields().count() > 1);

    let request = ReportRequest::new().field(field("Teller"));
    assert!(spec.validate(&request).is_ok());
}

#[test]
fn test_catalog_rejects_fields_of_other_reports() {
    let registry = ReportRegistry::with_defaults();
    let spec = registry.lookup("Organization", "Employee").unwrap();

    let request = ReportRequest::new()
        .field(field("Username"))
        .field(field("Amount"));
    let err = spec.validate(&request).unwrap_err();
    assert_eq!(err.unknown, vec!["Amount"]);
}

#[test]
fn test_validation_error_is_client_error() {
    let err: ReportError = ValidationError {
        unknown: vec!["Branch".into()],
    }
    .into();
    assert!(err.is_client_error());
    assert!(matches!(err, ReportError::Validation(_)));
}
