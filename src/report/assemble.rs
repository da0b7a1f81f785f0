//! Row assembler: runs the root page, probes for more, then fans out.
//!
//! Queries for one page are strictly sequential:
//!
//! 1. the root page,
//! 2. the look-ahead,
//! 3. per root record, the child query, and per child record the grandchild
//!    query.
//!
//! Every record is flattened into the row of the root record it belongs to.
//! Row widths therefore differ when fan-out multiplicities differ.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ReportResult;
use crate::executor::{QueryExecutor, Record, Scalar};
use crate::model::{Row, Value};
use crate::sql::{BoundValue, Expr, Query};

use super::compose::{compose_query, PageWindow, Scope};
use super::layout::{Level, SummaryRule};
use super::mapping::ColumnRef;

/// How `hasMore` is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookAhead {
    /// Fetch the whole next page and test it for rows.
    #[default]
    NextPage,
    /// Fetch only the first row of the next page.
    Probe,
}

impl LookAhead {
    /// The root window whose non-emptiness means page `page_index` has a successor.
    pub fn window(self, page_index: u32, size: u32) -> PageWindow {
        match self {
            LookAhead::NextPage => PageWindow::page(page_index.saturating_add(1), size),
            LookAhead::Probe => PageWindow::probe_after(page_index, size),
        }
    }
}

/// One level with the request resolved against it.
#[derive(Debug, Clone)]
pub struct LevelPlan<'a> {
    pub level: &'a Level,
    /// Requested columns mapped at this level, in mapping order.
    pub columns: Vec<ColumnRef>,
    /// Filters mapped at this level, in parameter order.
    pub criteria: Vec<Expr>,
}

impl LevelPlan<'_> {
    pub fn query(&self, scope: Scope<'_>) -> Option<Query> {
        compose_query(self.level, &self.columns, &self.criteria, scope)
    }
}

/// Everything needed to run a report page, resolved up front.
#[derive(Debug, Clone)]
pub struct ReportPlan<'a> {
    pub root: LevelPlan<'a>,
    pub child: Option<LevelPlan<'a>>,
    pub grandchild: Option<(LevelPlan<'a>, &'a SummaryRule)>,
}

/// Rows of one page plus whether a next page exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPage {
    pub rows: Vec<Row>,
    pub has_more: bool,
}

pub struct Assembler<'a> {
    executor: &'a dyn QueryExecutor,
    lookahead: LookAhead,
}

impl<'a> Assembler<'a> {
    pub fn new(executor: &'a dyn QueryExecutor, lookahead: LookAhead) -> Self {
        Self {
            executor,
            lookahead,
        }
    }

    /// Assemble page `page_index` of `size` root rows.
    pub fn assemble(
        &self,
        plan: &ReportPlan<'_>,
        page_index: u32,
        size: u32,
    ) -> ReportResult<AssembledPage> {
        let roots = self.root_records(plan, PageWindow::page(page_index, size))?;
        let has_more = self.has_more(plan, page_index, size)?;

        let mut rows = Vec::with_capacity(roots.len());
        for record in &roots {
            rows.push(self.fan_out(plan, record)?);
        }

        Ok(AssembledPage { rows, has_more })
    }

    fn root_records(&self, plan: &ReportPlan<'_>, window: PageWindow) -> ReportResult<Vec<Record>> {
        match plan.root.query(Scope::Root(window)) {
            Some(query) => self.run(&plan.root.level.name, &query),
            None => Ok(Vec::new()),
        }
    }

    fn has_more(&self, plan: &ReportPlan<'_>, page_index: u32, size: u32) -> ReportResult<bool> {
        let window = self.lookahead.window(page_index, size);
        Ok(!self.root_records(plan, window)?.is_empty())
    }

    /// Build the row for one root record.
    fn fan_out(&self, plan: &ReportPlan<'_>, root: &[Scalar]) -> ReportResult<Row> {
        let mut row = Row::new();
        push_cells(&mut row, root);

        let Some(child) = &plan.child else {
            return Ok(row);
        };
        let Some(children) = self.linked_records(child, root)? else {
            return Ok(row);
        };

        let mut summaries = Vec::new();
        for record in &children {
            push_cells(&mut row, record);

            if let Some((grandchild, summary)) = &plan.grandchild {
                let text = summary.summarize(record);
                if !text.is_empty() {
                    summaries.push(text);
                }
                if let Some(grandchildren) = self.linked_records(grandchild, record)? {
                    for nested in &grandchildren {
                        push_cells(&mut row, nested);
                    }
                }
            }
        }

        if plan.grandchild.is_some() && !children.is_empty() {
            row.push(Value::many(summaries));
        }

        Ok(row)
    }

    /// Records of `plan`'s level belonging to `parent`.
    ///
    /// `None` when nothing can be fetched: no columns map at the level, or the
    /// parent has no usable key.
    fn linked_records(
        &self,
        plan: &LevelPlan<'_>,
        parent: &[Scalar],
    ) -> ReportResult<Option<Vec<Record>>> {
        let Some(key) = leading_key(parent) else {
            warn!(tier = %plan.level.name, "parent record has no key, skipping fan-out");
            return Ok(None);
        };
        match plan.query(Scope::Parent(&key)) {
            Some(query) => self.run(&plan.level.name, &query).map(Some),
            None => Ok(None),
        }
    }

    fn run(&self, tier: &str, query: &Query) -> ReportResult<Vec<Record>> {
        let dialect = self.executor.dialect();
        debug!(tier, sql = %query.to_sql(dialect), "executing report query");
        let records = self.executor.execute(&query.to_statement(dialect))?;
        Ok(records)
    }
}

/// The join key of a record is its leading column.
fn leading_key(record: &[Scalar]) -> Option<BoundValue> {
    record.first().and_then(Scalar::to_bound)
}

fn push_cells(row: &mut Row, record: &[Scalar]) {
    for scalar in record {
        row.push(Value::from(scalar.to_text()));
    }
}
