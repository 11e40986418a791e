//! Entry point: flatten a list of nested items into a [`Table`].

use serde_json::Value;
use tracing::{debug, info_span, warn};
use unnest_model::{Group, Property, Result, Row};

use crate::flatten::flatten;
use crate::table::Table;

type GroupKey<'a> = Box<dyn Fn(&Value, usize, &[Value]) -> Group + 'a>;

/// Flattens nested items into grouped table rows.
///
/// Each item is flattened on its own and tagged with a group, by default its
/// index in the input. Rows are concatenated in input order.
///
/// ```
/// use serde_json::json;
/// use unnest_core::Unnest;
///
/// let data = json!([{ "id": "a", "tags": ["x", "y"] }]);
/// let table = Unnest::from_value(&data)
///     .by_schema(&json!({ "tags": "tag" }))
///     .unwrap();
/// assert_eq!(table.len(), 2);
/// ```
pub struct Unnest<'a> {
    items: &'a [Value],
    key: Option<GroupKey<'a>>,
}

impl<'a> Unnest<'a> {
    pub fn new(items: &'a [Value]) -> Self {
        Self { items, key: None }
    }

    /// Flatten `item` on its own, even when it is an array.
    pub fn single(item: &'a Value) -> Self {
        Self::new(std::slice::from_ref(item))
    }

    /// Treat an array as the list of items and any other value as one item.
    pub fn from_value(data: &'a Value) -> Self {
        match data {
            Value::Array(items) => Self::new(items),
            other => Self::single(other),
        }
    }

    /// Derive each item's group from `(item, index, items)` instead of its index.
    #[must_use]
    pub fn with_key<F>(mut self, key: F) -> Self
    where
        F: Fn(&Value, usize, &[Value]) -> Group + 'a,
    {
        self.key = Some(Box::new(key));
        self
    }

    /// Flatten every item against `property`.
    pub fn by(&self, property: &Property) -> Table {
        let span = info_span!("unnest", items = self.items.len(), root = property.name());
        let _guard = span.enter();

        let reused = property.reused_ancestor_names();
        if !reused.is_empty() {
            warn!(
                columns = ?reused,
                "descendant reuses an ancestor column name; the ancestor value is kept on the first row of each branch"
            );
        }

        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            let group = self.group_of(item, index);
            let records = flatten(item, property);
            debug!(group = %group, rows = records.len(), "flattened item");
            for record in records {
                for column in record.keys() {
                    if !columns.contains(column) {
                        columns.push(column.clone());
                    }
                }
                rows.push(Row::from_data(group.clone(), record));
            }
        }
        debug!(rows = rows.len(), columns = columns.len(), "unnest complete");
        Table::with_columns(&columns, &rows)
    }

    /// Normalize a shorthand schema, then flatten every item against it.
    ///
    /// # Errors
    ///
    /// Returns [`unnest_model::UnnestError::InvalidSchema`] when the schema
    /// cannot be normalized.
    pub fn by_schema(&self, schema: &Value) -> Result<Table> {
        let property = Property::from_value(schema)?;
        Ok(self.by(&property))
    }

    fn group_of(&self, item: &Value, index: usize) -> Group {
        match &self.key {
            Some(key) => key(item, index, self.items),
            None => Group::Index(index),
        }
    }
}

/// Flatten `data` (one item or an array of items) against `property`.
pub fn unnest(data: &Value, property: &Property) -> Table {
    Unnest::from_value(data).by(property)
}
