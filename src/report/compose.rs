//! Query composer: one SELECT per hierarchy level.

use crate::sql::{param, BoundValue, Expr, ExprExt, Query};

use super::layout::{Level, ParentLink};
use super::mapping::ColumnRef;

/// Rows a root query fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: u64,
    pub offset: u64,
}

impl PageWindow {
    /// Zero-based page `index` of `size` rows.
    pub fn page(index: u32, size: u32) -> Self {
        Self {
            limit: u64::from(size),
            offset: u64::from(size).saturating_mul(u64::from(index)),
        }
    }

    /// The first row of the page after `index`; empty when `size` is 0.
    pub fn probe_after(index: u32, size: u32) -> Self {
        Self {
            limit: u64::from(size.min(1)),
            offset: u64::from(size).saturating_mul(u64::from(index) + 1),
        }
    }
}

/// What a composed query is restricted to.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    /// A window over the root level.
    Root(PageWindow),
    /// The records of a linked level belonging to one parent key.
    Parent(&'a BoundValue),
}

/// Compose the query for `level`.
///
/// Returns `None` when `columns` is empty: there is nothing to select.
/// The WHERE clause is the parent key (if any) ANDed with `criteria` in order.
/// Results are ordered by the level's identifier, or for a DISTINCT level
/// that does not select it, by the first selected column. Only root queries
/// are paged, and `OFFSET` is left out for the first page.
pub fn compose_query(
    level: &Level,
    columns: &[ColumnRef],
    criteria: &[Expr],
    scope: Scope<'_>,
) -> Option<Query> {
    if columns.is_empty() {
        return None;
    }

    let mut query = Query::new()
        .select(columns.iter().map(ColumnRef::to_expr).collect::<Vec<_>>())
        .from(level.source.clone());

    if level.distinct {
        query = query.distinct();
    }

    if let Scope::Parent(key) = scope {
        if let Some(ParentLink::Join {
            table,
            child,
            parent,
        }) = &level.parent
        {
            query = query.left_join(table.clone(), child.to_expr().eq(parent.to_expr()));
        }
        if let Some(link) = &level.parent {
            query = query.filter(link.key_column().to_expr().eq(param(key.clone())));
        }
    }

    for criterion in criteria {
        query = query.filter(criterion.clone());
    }

    // DISTINCT may only order by selected columns.
    let sort_key = if !level.distinct || columns.contains(&level.order_by) {
        &level.order_by
    } else {
        &columns[0]
    };
    query = query.order_by(sort_key.to_expr());

    if let Scope::Root(window) = scope {
        query = query.limit(window.limit);
        if window.offset > 0 {
            query = query.offset(window.offset);
        }
    }

    Some(query)
}
