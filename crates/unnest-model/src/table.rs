#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Column name to value record produced by the flatten engine.
pub type RowData = Map<String, Value>;

/// Cells of a row keyed by column, in the order the columns were written.
pub type RowCells = IndexMap<String, Cell>;

/// Identifies the top-level input item a row descends from.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(untagged)]
pub enum Group {
    Index(usize),
    Key(String),
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Key(key) => f.write_str(key),
        }
    }
}

impl From<usize> for Group {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for Group {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for Group {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Cell {
    pub data: Value,
    pub group: Group,
    /// Number of rows this value covers, itself included. `None` until spans
    /// are computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<usize>,
}

impl Cell {
    pub fn new(data: Value, group: Group) -> Self {
        Self {
            data,
            group,
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Row {
    pub group: Group,
    pub cells: RowCells,
}

impl Row {
    pub fn new(group: Group) -> Self {
        Self {
            group,
            cells: RowCells::new(),
        }
    }

    /// Wrap every value of `data` in a cell belonging to `group`.
    pub fn from_data(group: Group, data: RowData) -> Self {
        let cells = data
            .into_iter()
            .map(|(name, value)| (name, Cell::new(value, group.clone())))
            .collect();
        Self { group, cells }
    }

    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn has(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Project the cells back to plain values.
    pub fn data(&self) -> RowData {
        self.cells
            .iter()
            .map(|(name, cell)| (name.clone(), cell.data.clone()))
            .collect()
    }
}

/// The cell at a row index together with its nearest neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellInfo<'a> {
    pub current: Option<&'a Cell>,
    pub previous: Option<&'a Cell>,
    pub next: Option<&'a Cell>,
}

/// Nearest cells of a column before and after a row index.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Adjacent<'a> {
    pub previous: Option<&'a Cell>,
    pub next: Option<&'a Cell>,
}

/// Per-row column selection returned by a table filter callback.
///
/// Only columns explicitly set to `false` are removed; columns the filter
/// does not mention are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    columns: BTreeMap<String, bool>,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn keep(self, column: impl Into<String>) -> Self {
        self.set(column, true)
    }

    #[must_use]
    pub fn exclude(self, column: impl Into<String>) -> Self {
        self.set(column, false)
    }

    #[must_use]
    pub fn set(mut self, column: impl Into<String>, keep: bool) -> Self {
        self.columns.insert(column.into(), keep);
        self
    }

    pub fn keeps(&self, column: &str) -> bool {
        self.columns.get(column).copied().unwrap_or(true)
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for RowFilter {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(column, keep)| (column.into(), keep))
                .collect(),
        }
    }
}
