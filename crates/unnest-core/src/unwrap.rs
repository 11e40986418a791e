use serde_json::Value;

/// Collapse nested arrays into a flat list of non-null items.
///
/// `null` yields nothing, any other non-array value yields itself.
pub fn unwrap(value: &Value) -> Vec<&Value> {
    let mut items = Vec::new();
    unwrap_into(value, &mut items);
    items
}

fn unwrap_into<'a>(value: &'a Value, items: &mut Vec<&'a Value>) {
    match value {
        Value::Null => {}
        Value::Array(values) => {
            for value in values {
                unwrap_into(value, items);
            }
        }
        other => items.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_nested_arrays_and_drops_null() {
        let value = json!([[1, [2]], null, 3]);
        assert_eq!(unwrap(&value), vec![&json!(1), &json!(2), &json!(3)]);
    }

    #[test]
    fn null_is_empty() {
        assert!(unwrap(&Value::Null).is_empty());
        assert!(unwrap(&json!([[], [null]])).is_empty());
    }

    #[test]
    fn scalar_and_object_are_single_items() {
        assert_eq!(unwrap(&json!("a")), vec![&json!("a")]);
        assert_eq!(unwrap(&json!({ "x": [1] })), vec![&json!({ "x": [1] })]);
    }
}
