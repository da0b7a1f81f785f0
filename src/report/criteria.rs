//! Criteria builder: one filter parameter to one WHERE predicate.
//!
//! Value syntax:
//!
//! | Operator | Value text      | Predicate                        |
//! |----------|-----------------|----------------------------------|
//! | EQUALS   | `v`             | `col = v`                        |
//! | IN       | `a, b, c`       | `col IN (a, b, c)`               |
//! | LIKE     | `v`             | `col LIKE '%v%'`                 |
//! | BETWEEN  | `low..high`     | `col BETWEEN low AND high`       |
//! | GREATER  | `v`             | `col > v`                        |
//! | LESSER   | `v`             | `col < v`                        |
//!
//! Values are always bound, never spliced into the SQL text.

use crate::error::{ReportError, ReportResult};
use crate::model::{FieldType, Operator, QueryParameter};
use crate::sql::{param, BoundValue, Expr, ExprExt};

use super::mapping::{ColumnMapping, ColumnRef};

/// Separator between the bounds of a BETWEEN value.
pub const RANGE_SEPARATOR: &str = "..";

/// Separator between the items of an IN value.
pub const LIST_SEPARATOR: char = ',';

/// Build the predicate for `parameter` against `column`.
///
/// Returns `Ok(None)` when the parameter carries no usable value: the filter
/// is simply not applied.
pub fn build_criteria(column: &ColumnRef, parameter: &QueryParameter) -> ReportResult<Option<Expr>> {
    let Some(raw) = parameter.effective_value() else {
        return Ok(None);
    };
    let target = column.to_expr();
    let ty = parameter.field_type;

    let expr = match parameter.operator {
        Operator::Equals => target.eq(param(bind(ty, raw))),
        Operator::Greater => target.gt(param(bind(ty, raw))),
        Operator::Lesser => target.lt(param(bind(ty, raw))),
        Operator::Like => target.like(param(BoundValue::Text(format!("%{}%", raw)))),
        Operator::In => {
            let items = split_list(raw);
            if items.is_empty() {
                return Ok(None);
            }
            target.in_list(items.into_iter().map(|v| bind(ty, v)).collect())
        }
        Operator::Between => {
            let (low, high) = split_range(&parameter.name, raw)?;
            target.between(bind(ty, low), bind(ty, high))
        }
    };

    Ok(Some(expr))
}

/// Predicates for every parameter `mapping` knows, in parameter order.
///
/// Parameters mapped at other levels are skipped.
pub fn build_level_criteria(
    mapping: &ColumnMapping,
    parameters: &[QueryParameter],
) -> ReportResult<Vec<Expr>> {
    let mut criteria = Vec::new();
    for parameter in parameters {
        if let Some(column) = mapping.get(&parameter.name) {
            if let Some(expr) = build_criteria(column, parameter)? {
                criteria.push(expr);
            }
        }
    }
    Ok(criteria)
}

/// Bind a raw value according to the declared type.
///
/// NUMBER values that parse are bound numerically; everything else is text.
pub fn bind(field_type: FieldType, raw: &str) -> BoundValue {
    if field_type == FieldType::Number {
        if let Ok(n) = raw.parse::<i64>() {
            return BoundValue::Int(n);
        }
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                return BoundValue::Float(f);
            }
        }
    }
    BoundValue::Text(raw.to_string())
}

/// Split an IN list: items trimmed, blanks dropped, duplicates dropped.
fn split_list(raw: &str) -> Vec<&str> {
    let mut items: Vec<&str> = Vec::new();
    for item in raw.split(LIST_SEPARATOR).map(str::trim) {
        if !item.is_empty() && !items.contains(&item) {
            items.push(item);
        }
    }
    items
}

fn split_range<'a>(name: &str, raw: &'a str) -> ReportResult<(&'a str, &'a str)> {
    let parts: Vec<&str> = raw.split(RANGE_SEPARATOR).map(str::trim).collect();
    match parts.as_slice() {
        [low, high] if !low.is_empty() && !high.is_empty() => Ok((low, high)),
        _ => Err(ReportError::malformed(
            name,
            format!(
                "BETWEEN expects exactly two values as 'low{}high', got '{}'",
                RANGE_SEPARATOR, raw
            ),
        )),
    }
}
