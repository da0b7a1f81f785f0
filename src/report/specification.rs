//! The per-report facade: metadata, validation and page generation.

use tracing::info;

use crate::context::{iso_timestamp, ReportContext};
use crate::error::{ReportError, ReportResult, ValidationError};
use crate::model::{Header, ReportDefinition, ReportPage, ReportRequest};
use crate::sql::{BoundValue, Dialect, Statement};

use super::assemble::{Assembler, LevelPlan, LookAhead, ReportPlan};
use super::compose::{PageWindow, Scope};
use super::criteria::build_level_criteria;
use super::layout::{Hierarchy, Level};
use super::mapping::validate_request;

/// Value shown in place of the parent key when explaining linked levels.
pub const PARENT_KEY_PLACEHOLDER: &str = ":parent";

/// A statement a report page would issue.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplainedQuery {
    pub level: String,
    pub statement: Statement,
}

/// One report type: its definition plus the hierarchy it walks.
///
/// Built once and read-only afterwards; safe to share across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSpecification {
    pub category: String,
    pub definition: ReportDefinition,
    pub hierarchy: Hierarchy,
    pub lookahead: LookAhead,
}

impl ReportSpecification {
    pub fn new(category: impl Into<String>, definition: ReportDefinition, hierarchy: Hierarchy) -> Self {
        Self {
            category: category.into(),
            definition,
            hierarchy,
            lookahead: LookAhead::default(),
        }
    }

    pub fn with_lookahead(mut self, lookahead: LookAhead) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.definition.identifier
    }

    pub fn report_definition(&self) -> &ReportDefinition {
        &self.definition
    }

    /// Reject requests naming fields or parameters no level maps.
    pub fn validate(&self, request: &ReportRequest) -> Result<(), ValidationError> {
        validate_request(&self.hierarchy.known_columns(), request)
    }

    /// Resolve `request` against every level.
    ///
    /// All request-dependent failures surface here, before any query runs.
    pub fn plan(&self, request: &ReportRequest) -> ReportResult<ReportPlan<'_>> {
        let root = resolve(&self.hierarchy.root, request)?;
        if root.columns.is_empty() {
            return Err(ReportError::NoRootColumns(self.identifier().to_string()));
        }

        let (child, grandchild) = match &self.hierarchy.child {
            None => (None, None),
            Some(tier) => {
                let grandchild = match &tier.grandchild {
                    Some(g) => Some((resolve(&g.level, request)?, &g.summary)),
                    None => None,
                };
                (Some(resolve(&tier.level, request)?), grandchild)
            }
        };

        Ok(ReportPlan {
            root,
            child,
            grandchild,
        })
    }

    /// Generate page `page_index` (zero-based) of at most `size` root rows.
    pub fn generate_report(
        &self,
        ctx: &ReportContext<'_>,
        request: &ReportRequest,
        page_index: u32,
        size: u32,
    ) -> ReportResult<ReportPage> {
        check_page_size(size)?;
        self.validate(request)?;
        let plan = self.plan(request)?;

        let header = Header {
            column_names: request.field_names().map(str::to_string).collect(),
        };

        let page = Assembler::new(ctx.executor, self.lookahead).assemble(&plan, page_index, size)?;

        info!(
            category = %self.category,
            report = %self.identifier(),
            page = page_index,
            size,
            rows = page.rows.len(),
            has_more = page.has_more,
            "generated report page"
        );

        Ok(ReportPage {
            name: self.definition.name.clone(),
            description: self.definition.description.clone(),
            header,
            rows: page.rows,
            has_more: page.has_more,
            generated_by: ctx.identity.current_user(),
            generated_on: iso_timestamp(ctx.clock.now()),
        })
    }

    /// The statements a page would issue, without running any.
    ///
    /// Linked levels appear once, keyed on [`PARENT_KEY_PLACEHOLDER`].
    pub fn explain(
        &self,
        request: &ReportRequest,
        page_index: u32,
        size: u32,
        dialect: Dialect,
    ) -> ReportResult<Vec<ExplainedQuery>> {
        check_page_size(size)?;
        self.validate(request)?;
        let plan = self.plan(request)?;

        let mut explained = Vec::new();
        let mut push = |level: &LevelPlan<'_>, scope: Scope<'_>| match level.query(scope) {
            Some(query) => {
                explained.push(ExplainedQuery {
                    level: level.level.name.clone(),
                    statement: query.to_statement(dialect),
                });
                true
            }
            None => false,
        };

        push(&plan.root, Scope::Root(PageWindow::page(page_index, size)));
        push(&plan.root, Scope::Root(self.lookahead.window(page_index, size)));

        // Grandchildren are only fetched under child records.
        let key = BoundValue::Text(PARENT_KEY_PLACEHOLDER.to_string());
        if let Some(child) = &plan.child {
            if push(child, Scope::Parent(&key)) {
                if let Some((grandchild, _)) = &plan.grandchild {
                    push(grandchild, Scope::Parent(&key));
                }
            }
        }

        Ok(explained)
    }
}

/// An empty page has no next page to look ahead to.
fn check_page_size(size: u32) -> ReportResult<()> {
    if size == 0 {
        return Err(ReportError::InvalidPageSize { size, max: u32::MAX });
    }
    Ok(())
}

fn resolve<'a>(level: &'a Level, request: &ReportRequest) -> ReportResult<LevelPlan<'a>> {
    let columns = level
        .columns
        .map_fields(request.field_names())
        .into_iter()
        .cloned()
        .collect();
    let criteria = build_level_criteria(&level.columns, &request.query_parameters)?;
    Ok(LevelPlan {
        level,
        columns,
        criteria,
    })
}
