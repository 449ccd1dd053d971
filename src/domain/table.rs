// ============================================================
// TABLE TYPES
// ============================================================
// Value objects flowing between header resolution, role
// matching, aggregation, and serialization

use serde::{Deserialize, Serialize};

/// A single cell of a source table.
///
/// Missing is distinct from empty text: an absent spreadsheet cell or a
/// short delimited row yields `Missing`, a present-but-blank field yields
/// `Text("")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Text(String),
    Missing,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value),
            Cell::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Text form used for header candidates; missing renders empty.
    pub fn display_text(&self) -> &str {
        self.as_str().unwrap_or("")
    }
}

/// A parsed table with a chosen header row.
///
/// Rows hold only the data below the header, each padded or truncated to the
/// header width. Immutable once produced by the header resolver.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Missing);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Resolved semantic column roles within a RawTable.
///
/// Both indices are always bound; resolution fails as a whole otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoles {
    pub id_column: usize,
    pub category_column: usize,
}

/// One (identifier, category) pair extracted from a data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub identifier: String,
    pub category: String,
}

impl Record {
    pub fn new(identifier: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            category: category.into(),
        }
    }
}

/// The source table with the category column rewritten to normalized form.
/// All other columns keep their original values and order.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}
