//! Index-aligned row merging for sibling schema branches.

use std::collections::BTreeSet;

use unnest_model::RowData;

/// Merges the rows that sibling branches contribute at the same index.
///
/// Columns written by exactly one branch are folded into a single main row.
/// Columns claimed by several branches cannot share a row, so the values from
/// every branch after the first are set aside as conflict rows, to be emitted
/// after all main rows.
#[derive(Debug, Default)]
pub struct Merger {
    conflicts: Vec<RowData>,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `rows` into one main row, moving values of `conflict_columns`
    /// from every row after the first into the conflict list.
    ///
    /// Returns `None` when `rows` is empty.
    pub fn merge(
        &mut self,
        rows: Vec<RowData>,
        conflict_columns: &BTreeSet<&str>,
    ) -> Option<RowData> {
        let mut rows = rows.into_iter();
        let mut main = rows.next()?;
        for row in rows {
            let (conflicting, clean) = split_row(row, conflict_columns);
            main.extend(clean);
            if conflicting.is_empty() {
                continue;
            }
            // a conflict row may absorb the next one only while their columns are disjoint
            match self.conflicts.last_mut() {
                Some(last) if !conflicting.keys().any(|column| last.contains_key(column)) => {
                    last.extend(conflicting);
                }
                _ => self.conflicts.push(conflicting),
            }
        }
        Some(main)
    }

    /// Conflict rows in the order they were discovered.
    pub fn conflicts(&self) -> &[RowData] {
        &self.conflicts
    }

    pub fn into_conflicts(self) -> Vec<RowData> {
        self.conflicts
    }
}

/// Split the non-null values of `row` into (conflicting, clean) records.
fn split_row(row: RowData, conflict_columns: &BTreeSet<&str>) -> (RowData, RowData) {
    let mut conflicting = RowData::new();
    let mut clean = RowData::new();
    for (column, value) in row {
        if value.is_null() {
            continue;
        }
        if conflict_columns.contains(column.as_str()) {
            conflicting.insert(column, value);
        } else {
            clean.insert(column, value);
        }
    }
    (conflicting, clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn row(value: Value) -> RowData {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn empty_input_produces_no_row() {
        let mut merger = Merger::new();
        assert_eq!(merger.merge(Vec::new(), &BTreeSet::new()), None);
        assert!(merger.conflicts().is_empty());
    }

    #[test]
    fn clean_columns_merge_into_first_row() {
        let mut merger = Merger::new();
        let merged = merger
            .merge(
                vec![row(json!({ "a": 1 })), row(json!({ "b": 2, "c": null }))],
                &BTreeSet::new(),
            )
            .unwrap();
        assert_eq!(merged, row(json!({ "a": 1, "b": 2 })));
        assert!(merger.conflicts().is_empty());
    }

    #[test]
    fn conflicting_columns_become_conflict_rows() {
        let mut merger = Merger::new();
        let conflicts = BTreeSet::from(["x"]);
        let merged = merger
            .merge(
                vec![row(json!({ "x": 1, "a": 1 })), row(json!({ "x": 2, "b": 2 }))],
                &conflicts,
            )
            .unwrap();
        assert_eq!(merged, row(json!({ "x": 1, "a": 1, "b": 2 })));
        assert_eq!(merger.conflicts(), &[row(json!({ "x": 2 }))]);
    }

    #[test]
    fn disjoint_conflicts_coalesce_and_overlapping_start_new_row() {
        let mut merger = Merger::new();
        let conflicts = BTreeSet::from(["x", "y"]);
        merger.merge(vec![row(json!({ "x": 1 })), row(json!({ "x": 2 }))], &conflicts);
        merger.merge(vec![row(json!({ "y": 1 })), row(json!({ "y": 2 }))], &conflicts);
        merger.merge(vec![row(json!({ "x": 3 })), row(json!({ "x": 4 }))], &conflicts);
        assert_eq!(
            merger.into_conflicts(),
            vec![row(json!({ "x": 2, "y": 2 })), row(json!({ "x": 4 }))]
        );
    }
}
