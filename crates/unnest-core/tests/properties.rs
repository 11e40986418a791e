//! Property tests for the flatten engine and span computation.

use proptest::prelude::*;
use serde_json::{Map, Value, json};
use unnest_core::{flatten, unnest};
use unnest_model::Property;

fn scalar_object() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-f]{1,3}", any::<i64>(), 0..6)
        .prop_map(|fields| fields.into_iter().map(|(key, value)| (key, json!(value))).collect())
}

proptest! {
    #[test]
    fn objects_without_arrays_flatten_to_one_row(
        outer in scalar_object(),
        inner in scalar_object(),
    ) {
        let mut data = outer.clone();
        data.insert("nested".to_string(), Value::Object(inner.clone()));

        let mut nested = Property::new("nested");
        for key in inner.keys() {
            nested = nested.with_child(key.clone(), Property::new(format!("nested_{key}")));
        }
        let mut property = Property::root().with_child("nested", nested);
        for key in outer.keys() {
            property = property.with_child(key.clone(), Property::new(key.clone()));
        }

        let rows = flatten(&Value::Object(data), &property);
        prop_assert_eq!(rows.len(), 1);
        for key in outer.keys() {
            prop_assert!(rows[0].contains_key(key));
        }
        for key in inner.keys() {
            let column = format!("nested_{key}");
            prop_assert!(rows[0].contains_key(&column));
        }
    }

    #[test]
    fn conflicting_siblings_lose_no_values(
        a in prop::collection::vec(any::<i64>(), 0..6),
        b in prop::collection::vec(any::<i64>(), 0..6),
    ) {
        let data = json!({ "a": a, "b": b });
        let property = Property::root()
            .with_child("a", Property::new("v"))
            .with_child("b", Property::new("v"));

        let rows = flatten(&data, &property);
        let mut found: Vec<i64> = rows
            .iter()
            .filter_map(|row| row.get("v").and_then(Value::as_i64))
            .collect();
        let mut expected: Vec<i64> = a.iter().chain(b.iter()).copied().collect();
        found.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn root_spans_its_whole_group(items in prop::collection::vec(any::<i64>(), 1..8)) {
        let data = json!({ "items": items });
        let table = unnest(&data, &Property::root().with_child("items", Property::new("item")));

        prop_assert_eq!(table.len(), items.len());
        let root = table.rows()[0].cell("root").and_then(|cell| cell.span);
        prop_assert_eq!(root, Some(items.len()));
        for row in table.rows() {
            let span = row.cell("item").and_then(|cell| cell.span);
            prop_assert_eq!(span, Some(1));
        }
    }

    #[test]
    fn flatten_is_deterministic(
        a in prop::collection::vec(any::<i64>(), 0..5),
        b in prop::collection::vec(prop::collection::vec(any::<i64>(), 0..3), 0..4),
    ) {
        let data = json!({
            "a": a,
            "b": b.iter().map(|xs| json!({ "x": xs })).collect::<Vec<_>>(),
        });
        let property = Property::from_value(&json!({
            "a": "a",
            "b": { "x": "a" },
        }))
        .expect("valid schema");

        prop_assert_eq!(unnest(&data, &property), unnest(&data, &property));
    }
}
