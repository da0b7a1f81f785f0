//! Organization / Employee: employees with the name of their office.

use crate::model::{DisplayableField, FieldType, ReportDefinition};
use crate::report::layout::{Hierarchy, Level, ParentLink};
use crate::report::mapping::{ColumnMapping, ColumnRef};
use crate::report::specification::ReportSpecification;
use crate::sql::TableRef;

use super::ORGANIZATION;

pub const IDENTIFIER: &str = "Employee";

pub const OFFICE_ID: &str = "Office Id";
pub const USERNAME: &str = "Username";
pub const FIRST_NAME: &str = "First Name";
pub const MIDDLE_NAME: &str = "Middle Name";
pub const LAST_NAME: &str = "Last Name";
pub const CREATED_BY: &str = "Created By";
pub const OFFICE_NAME: &str = "Office Name";

pub fn specification() -> ReportSpecification {
    // The office id leads so that it keys the office lookup.
    let root = Level::root(
        "employee",
        TableRef::new("horus_employees").with_alias("he"),
        ColumnMapping::new()
            .with(OFFICE_ID, ColumnRef::new("he", "assigned_office_id"))
            .with(USERNAME, ColumnRef::new("he", "identifier"))
            .with(FIRST_NAME, ColumnRef::new("he", "given_name"))
            .with(MIDDLE_NAME, ColumnRef::new("he", "middle_name"))
            .with(LAST_NAME, ColumnRef::new("he", "surname"))
            .with(CREATED_BY, ColumnRef::new("he", "created_by")),
        ColumnRef::new("he", "identifier"),
    );

    let office = Level::linked(
        "office",
        TableRef::new("horus_offices").with_alias("ho"),
        ColumnMapping::new().with(OFFICE_NAME, ColumnRef::new("ho", "a_name")),
        ColumnRef::new("ho", "id"),
        ParentLink::Key(ColumnRef::new("ho", "id")),
    )
    .distinct();

    let displayable_fields = [
        OFFICE_ID,
        USERNAME,
        FIRST_NAME,
        MIDDLE_NAME,
        LAST_NAME,
        CREATED_BY,
        OFFICE_NAME,
    ]
    .into_iter()
    .map(|name| {
        let field = DisplayableField::new(name, FieldType::Text);
        if name == MIDDLE_NAME {
            field
        } else {
            field.mandatory()
        }
    })
    .collect();

    let definition = ReportDefinition {
        identifier: IDENTIFIER.to_string(),
        name: "Employee Listing".to_string(),
        description: "List of all employees.".to_string(),
        query_parameters: Vec::new(),
        displayable_fields,
    };

    ReportSpecification::new(ORGANIZATION, definition, Hierarchy::with_child(root, office))
}
