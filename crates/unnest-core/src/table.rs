//! Read-only view over flattened, span-annotated rows.

use std::cmp::Ordering;

use unnest_model::{Adjacent, Cell, CellInfo, Group, Row, RowData, RowFilter};

use crate::spans::update_spans;

/// Flattened rows with their spans computed, plus the column order in which
/// the columns were first encountered.
///
/// Every transformation returns a new table and recomputes spans.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table from rows, ordering columns as they first appear.
    pub fn new(rows: &[Row]) -> Self {
        Self::with_columns(&[], rows)
    }

    /// Build a table from rows, listing `columns` first (in the given order)
    /// when they occur in the rows.
    pub fn with_columns(columns: &[String], rows: &[Row]) -> Self {
        Self {
            columns: discover_columns(columns, rows),
            rows: update_spans(rows),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows belonging to `group`.
    pub fn group_rows(&self, group: &Group) -> Vec<&Row> {
        self.rows.iter().filter(|row| row.group == *group).collect()
    }

    /// Distinct groups in first-seen order.
    pub fn groups(&self) -> Vec<&Group> {
        let mut groups: Vec<&Group> = Vec::new();
        for row in &self.rows {
            if !groups.contains(&&row.group) {
                groups.push(&row.group);
            }
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Project every row back to plain column values.
    pub fn data(&self) -> Vec<RowData> {
        Self::data_of(&self.rows)
    }

    /// Project the given rows back to plain column values.
    pub fn data_of<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<RowData> {
        rows.into_iter().map(Row::data).collect()
    }

    /// The first row of each group, in first-seen order.
    pub fn roots(&self) -> Vec<&Row> {
        let mut groups: Vec<&Group> = Vec::new();
        let mut roots = Vec::new();
        for row in &self.rows {
            if !groups.contains(&&row.group) {
                groups.push(&row.group);
                roots.push(row);
            }
        }
        roots
    }

    /// Every cell of `column`, in row order.
    pub fn column(&self, column: &str) -> Vec<&Cell> {
        self.rows.iter().filter_map(|row| row.cell(column)).collect()
    }

    /// Every cell of `column` within `group`, in row order.
    pub fn column_in(&self, column: &str, group: &Group) -> Vec<&Cell> {
        self.rows
            .iter()
            .filter(|row| row.group == *group)
            .filter_map(|row| row.cell(column))
            .collect()
    }

    /// The cell of `column` at `row_index` with its nearest neighbours.
    ///
    /// `row_index` is clamped to `-1..=len`, so the positions just outside the
    /// table can be probed for their neighbours.
    pub fn cell(&self, column: &str, row_index: isize) -> CellInfo<'_> {
        let index = self.clamp(row_index);
        let adjacent = self.adjacent_at(column, index);
        CellInfo {
            current: self.row_at(index).and_then(|row| row.cell(column)),
            previous: adjacent.previous,
            next: adjacent.next,
        }
    }

    /// The nearest cells of `column` before and after `row_index`.
    ///
    /// Searches outward one row at a time in both directions until both
    /// neighbours are found or both directions leave the table.
    pub fn adjacent(&self, column: &str, row_index: isize) -> Adjacent<'_> {
        self.adjacent_at(column, self.clamp(row_index))
    }

    fn adjacent_at(&self, column: &str, index: isize) -> Adjacent<'_> {
        let mut adjacent = Adjacent::default();
        for distance in 1.. {
            let previous = self.row_at(index - distance);
            let next = self.row_at(index + distance);
            if adjacent.previous.is_none() {
                adjacent.previous = previous.and_then(|row| row.cell(column));
            }
            if adjacent.next.is_none() {
                adjacent.next = next.and_then(|row| row.cell(column));
            }
            let exhausted = previous.is_none() && next.is_none();
            if exhausted || (adjacent.previous.is_some() && adjacent.next.is_some()) {
                break;
            }
        }
        adjacent
    }

    fn clamp(&self, row_index: isize) -> isize {
        let len = isize::try_from(self.rows.len()).unwrap_or(isize::MAX);
        row_index.clamp(-1, len)
    }

    fn row_at(&self, index: isize) -> Option<&Row> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.rows.get(index))
    }

    /// Keep only the columns `predicate` selects for each row.
    ///
    /// Rows left without cells are dropped and spans are recomputed.
    #[must_use]
    pub fn filter<F>(&self, mut predicate: F) -> Table
    where
        F: FnMut(&Row, usize, &[Row]) -> RowFilter,
    {
        let rows: Vec<Row> = self
            .rows
            .iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let selection = predicate(row, index, &self.rows);
                let mut row = row.clone();
                row.cells.retain(|column, _| selection.keeps(column));
                (!row.is_empty()).then_some(row)
            })
            .collect();
        Table::with_columns(&self.columns, &rows)
    }

    /// Reorder whole groups by comparing their root rows.
    ///
    /// Rows inside a group keep their relative order; the sort is stable.
    #[must_use]
    pub fn sort<F>(&self, mut compare: F) -> Table
    where
        F: FnMut(&Row, &Row) -> Ordering,
    {
        let mut roots = self.roots();
        roots.sort_by(|a, b| compare(a, b));
        let rows: Vec<Row> = roots
            .iter()
            .flat_map(|root| {
                self.rows
                    .iter()
                    .filter(move |row| row.group == root.group)
                    .cloned()
            })
            .collect();
        Table::with_columns(&self.columns, &rows)
    }
}

fn discover_columns(preferred: &[String], rows: &[Row]) -> Vec<String> {
    let present = |column: &str| rows.iter().any(|row| row.has(column));
    let mut columns: Vec<String> = preferred
        .iter()
        .filter(|column| present(column))
        .cloned()
        .collect();
    for row in rows {
        for column in row.cells.keys() {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }
    columns
}
