//! Schema-driven flattening of nested values into row records.
//!
//! Each schema node flattens its children independently, then lines the
//! resulting row lists up by index. Rows at the same index are merged into one
//! row instead of being multiplied, so sibling arrays of equal length cost one
//! row per element rather than a cross product. Columns that more than one
//! branch writes at the same index are moved to conflict rows by the
//! [`Merger`] and appended after the merged rows.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::trace;
use unnest_model::{Property, RowData};

use crate::merger::Merger;
use crate::unwrap::unwrap;

/// Flatten `data` against `property` into row records.
///
/// Cells carry no group or span yet; see [`crate::Unnest`] and
/// [`crate::update_spans`].
pub fn flatten(data: &Value, property: &Property) -> Vec<RowData> {
    if property.is_leaf() {
        return unwrap(data)
            .into_iter()
            .map(|item| single_row(property.name(), item))
            .collect();
    }
    let branches = property
        .children()
        .map(|(key, child)| {
            Branch::assemble(flatten_branch(data, key, child), property.name(), data)
        })
        .collect();
    merge_branches(property.name(), branches)
}

/// Flatten every item found under `data[key]` against `child`.
fn flatten_branch(data: &Value, key: &str, child: &Property) -> Vec<RowData> {
    let value = data.get(key).unwrap_or(&Value::Null);
    unwrap(value)
        .into_iter()
        .flat_map(|item| flatten(item, child))
        .collect()
}

fn single_row(column: &str, value: &Value) -> RowData {
    let mut row = RowData::new();
    row.insert(column.to_string(), value.clone());
    row
}

/// The rows one child branch contributes, plus every column they mention.
struct Branch {
    rows: Vec<RowData>,
    columns: BTreeSet<String>,
}

impl Branch {
    /// Attach the parent's own value to the first row of the branch.
    ///
    /// An empty branch still contributes one row so the parent value is kept.
    /// The parent column is placed first and wins over a descendant writing
    /// the same column name.
    fn assemble(mut rows: Vec<RowData>, column: &str, value: &Value) -> Self {
        let first = if rows.is_empty() {
            RowData::new()
        } else {
            rows.remove(0)
        };
        let mut head = single_row(column, value);
        head.extend(first.into_iter().filter(|(name, _)| name != column));
        rows.insert(0, head);

        let columns = rows
            .iter()
            .flat_map(|row| row.keys().cloned())
            .collect();
        Self { rows, columns }
    }
}

fn merge_branches(column: &str, branches: Vec<Branch>) -> Vec<RowData> {
    let len = branches
        .iter()
        .map(|branch| branch.rows.len())
        .max()
        .unwrap_or(0);
    let (column_sets, mut sources): (Vec<_>, Vec<_>) = branches
        .into_iter()
        .map(|branch| (branch.columns, branch.rows.into_iter()))
        .unzip();

    let mut merger = Merger::new();
    let mut rows = Vec::with_capacity(len);
    for index in 0..len {
        let mut aligned = Vec::with_capacity(sources.len());
        let mut seen = BTreeSet::new();
        let mut conflicts = BTreeSet::new();
        for (columns, source) in column_sets.iter().zip(sources.iter_mut()) {
            // sources advance in lockstep, so `next` is the row at `index`
            let Some(row) = source.next() else {
                continue;
            };
            aligned.push(row);
            for name in columns {
                if name != column && !seen.insert(name.as_str()) {
                    conflicts.insert(name.as_str());
                }
            }
        }
        trace!(
            column,
            index,
            branches = aligned.len(),
            conflicts = conflicts.len(),
            "merge aligned rows"
        );
        if let Some(row) = merger.merge(aligned, &conflicts) {
            rows.push(row);
        }
    }

    let conflicts = merger.into_conflicts();
    if !conflicts.is_empty() {
        trace!(column, count = conflicts.len(), "append conflict rows");
    }
    rows.extend(conflicts);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> Property {
        Property::from_value(&value).unwrap()
    }

    fn keys(row: &RowData) -> Vec<&str> {
        row.keys().map(String::as_str).collect()
    }

    #[test]
    fn leaf_yields_one_row_per_item() {
        let rows = flatten(&json!([1, [2, null]]), &Property::new("v"));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("v"), Some(&json!(1)));
        assert_eq!(rows[1].get("v"), Some(&json!(2)));
    }

    #[test]
    fn leaf_with_null_yields_nothing() {
        assert!(flatten(&Value::Null, &Property::new("v")).is_empty());
    }

    #[test]
    fn object_without_arrays_yields_one_row() {
        let data = json!({ "a": 1, "b": { "c": 2 } });
        let rows = flatten(&data, &schema(json!({ "a": "a", "b": { "c": "c" } })));
        assert_eq!(rows.len(), 1);
        assert_eq!(keys(&rows[0]), vec!["root", "a", "b", "c"]);
        assert_eq!(rows[0].get("root"), Some(&data));
    }

    #[test]
    fn missing_children_still_yield_parent_row() {
        let data = json!({ "other": 1 });
        let rows = flatten(&data, &schema(json!({ "a": "a", "b": "b" })));
        assert_eq!(rows.len(), 1);
        assert_eq!(keys(&rows[0]), vec!["root"]);
    }

    #[test]
    fn parent_value_is_on_first_row_only() {
        let data = json!({ "b": [{ "x": 1 }, { "x": 2 }] });
        let rows = flatten(&data, &schema(json!({ "b": { "x": "x" } })));
        assert_eq!(rows.len(), 2);
        assert_eq!(keys(&rows[0]), vec!["root", "b", "x"]);
        assert_eq!(keys(&rows[1]), vec!["b", "x"]);
    }

    #[test]
    fn same_named_siblings_produce_conflict_rows() {
        let data = json!({ "a": [1, 2], "b": [3] });
        let rows = flatten(&data, &schema(json!({ "a": "v", "b": "v" })));
        let values: Vec<Option<&Value>> = rows.iter().map(|row| row.get("v")).collect();
        assert_eq!(values, vec![Some(&json!(1)), Some(&json!(2)), Some(&json!(3))]);
        assert_eq!(keys(&rows[2]), vec!["v"]);
    }

    #[test]
    fn ancestor_value_wins_over_reused_descendant_name() {
        let data = json!({ "a": { "root": "inner" } });
        let rows = flatten(&data, &schema(json!({ "a": { "root": true } })));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("root"), Some(&data));
    }
}
