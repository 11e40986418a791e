//! Group keys, sorting and column selection for the flatten command.

use std::cmp::Ordering;

use serde_json::Value;
use unnest_model::{Cell, Group, RowFilter};

/// Group for an item: the string or number in `field`, else the item index.
pub fn group_key(item: &Value, field: &str, index: usize) -> Group {
    match item.get(field) {
        Some(Value::String(key)) => Group::Key(key.clone()),
        Some(Value::Number(number)) => Group::Key(number.to_string()),
        Some(Value::Bool(flag)) => Group::Key(flag.to_string()),
        _ => Group::Index(index),
    }
}

/// Order two optional cells: numbers numerically, strings lexically, other
/// values by their JSON text. Missing cells sort last.
pub fn compare_cells(a: Option<&Cell>, b: Option<&Cell>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_values(&a.data, &b.data),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.total_cmp(&b)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (a, b) => a.to_string().cmp(&b.to_string()),
    }
}

/// Keep only `selected` among `columns`.
pub fn keep_only(columns: &[String], selected: &[String]) -> RowFilter {
    columns
        .iter()
        .map(|column| (column.as_str(), selected.contains(column)))
        .collect()
}

/// Drop every column in `excluded`.
pub fn exclude(excluded: &[String]) -> RowFilter {
    excluded
        .iter()
        .map(|column| (column.as_str(), false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cell(value: Value) -> Cell {
        Cell::new(value, Group::Index(0))
    }

    #[test]
    fn group_key_prefers_field_value() {
        assert_eq!(group_key(&json!({ "id": "a" }), "id", 3), Group::from("a"));
        assert_eq!(group_key(&json!({ "id": 7 }), "id", 3), Group::from("7"));
        assert_eq!(group_key(&json!({ "id": null }), "id", 3), Group::Index(3));
        assert_eq!(group_key(&json!(1), "id", 4), Group::Index(4));
    }

    #[test]
    fn numbers_compare_numerically() {
        let (nine, ten) = (cell(json!(9)), cell(json!(10)));
        assert_eq!(compare_cells(Some(&nine), Some(&ten)), Ordering::Less);
        let (a, b) = (cell(json!("9")), cell(json!("10")));
        assert_eq!(compare_cells(Some(&a), Some(&b)), Ordering::Greater);
    }

    #[test]
    fn missing_cells_sort_last() {
        let present = cell(json!(1));
        assert_eq!(compare_cells(Some(&present), None), Ordering::Less);
        assert_eq!(compare_cells(None, None), Ordering::Equal);
    }

    #[test]
    fn keep_only_excludes_unselected() {
        let columns = vec!["a".to_string(), "b".to_string()];
        let filter = keep_only(&columns, &["b".to_string()]);
        assert!(!filter.keeps("a"));
        assert!(filter.keeps("b"));
        assert!(!exclude(&["b".to_string()]).keeps("b"));
    }
}
