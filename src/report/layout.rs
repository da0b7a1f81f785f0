//! Hierarchy configuration: the levels a report walks and how they link.
//!
//! A report is one [`Hierarchy`]: a root level, an optional child tier and,
//! under the child tier only, an optional grandchild tier.

use crate::executor::Scalar;
use crate::sql::TableRef;

use super::mapping::{ColumnMapping, ColumnRef};

/// How a child or grandchild level is keyed to its parent record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentLink {
    /// `WHERE column = <key>` on the level's own source.
    Key(ColumnRef),
    /// `LEFT JOIN table ON child = parent WHERE parent = <key>`.
    Join {
        table: TableRef,
        child: ColumnRef,
        parent: ColumnRef,
    },
}

impl ParentLink {
    /// The column compared against the parent key.
    pub fn key_column(&self) -> &ColumnRef {
        match self {
            ParentLink::Key(column) => column,
            ParentLink::Join { parent, .. } => parent,
        }
    }
}

/// One hierarchy level: a source, its field mapping and its ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    /// Short name used in logs.
    pub name: String,
    pub source: TableRef,
    pub columns: ColumnMapping,
    /// Stable identifier column; the level is always ordered by it ascending.
    pub order_by: ColumnRef,
    /// `None` for the root level.
    pub parent: Option<ParentLink>,
    /// Emit `SELECT DISTINCT`.
    pub distinct: bool,
}

impl Level {
    pub fn root(
        name: impl Into<String>,
        source: TableRef,
        columns: ColumnMapping,
        order_by: ColumnRef,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            columns,
            order_by,
            parent: None,
            distinct: false,
        }
    }

    pub fn linked(
        name: impl Into<String>,
        source: TableRef,
        columns: ColumnMapping,
        order_by: ColumnRef,
        parent: ParentLink,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            columns,
            order_by,
            parent: Some(parent),
            distinct: false,
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

/// Builds the multi-valued child summary cell from child records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRule {
    /// Positions within a child record, joined with single spaces.
    pub positions: Vec<usize>,
}

impl SummaryRule {
    /// Summarize with the first `n` child columns.
    pub fn leading(n: usize) -> Self {
        Self {
            positions: (0..n).collect(),
        }
    }

    /// Summary text for one child record. NULL and missing positions are skipped.
    pub fn summarize(&self, record: &[Scalar]) -> String {
        self.positions
            .iter()
            .filter_map(|&i| record.get(i).and_then(Scalar::to_text))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrandchildTier {
    pub level: Level,
    pub summary: SummaryRule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildTier {
    pub level: Level,
    pub grandchild: Option<GrandchildTier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    pub root: Level,
    pub child: Option<ChildTier>,
}

impl Hierarchy {
    pub fn flat(root: Level) -> Self {
        Self { root, child: None }
    }

    pub fn with_child(root: Level, child: Level) -> Self {
        Self {
            root,
            child: Some(ChildTier {
                level: child,
                grandchild: None,
            }),
        }
    }

    pub fn with_grandchild(root: Level, child: Level, grandchild: Level, summary: SummaryRule) -> Self {
        Self {
            root,
            child: Some(ChildTier {
                level: child,
                grandchild: Some(GrandchildTier {
                    level: grandchild,
                    summary,
                }),
            }),
        }
    }

    /// All levels, root first.
    pub fn levels(&self) -> Vec<&Level> {
        let mut levels = vec![&self.root];
        if let Some(child) = &self.child {
            levels.push(&child.level);
            if let Some(grandchild) = &child.grandchild {
                levels.push(&grandchild.level);
            }
        }
        levels
    }

    /// Union of every level's mapping, used to validate requests.
    pub fn known_columns(&self) -> ColumnMapping {
        ColumnMapping::union(self.levels().into_iter().map(|l| &l.columns))
    }
}
