use std::collections::BTreeMap;

use serde_json::Value;
use unnest_model::{Cell, Row};

/// Column name to display text for one row.
pub type RowLabels = BTreeMap<String, String>;

/// Display text for a cell: strings verbatim, other scalars via `Display`,
/// arrays and objects as compact JSON. `null` renders empty.
pub fn cell_label(cell: &Cell) -> String {
    match &cell.data {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// Labels for every cell the row defines.
pub fn cell_labels(row: &Row) -> RowLabels {
    row.cells
        .iter()
        .map(|(column, cell)| (column.clone(), cell_label(cell)))
        .collect()
}

/// Whether a label reads as a finite number.
pub fn is_numeric(label: &str) -> bool {
    label
        .trim()
        .parse::<f64>()
        .is_ok_and(f64::is_finite)
}
