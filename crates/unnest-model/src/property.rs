//! Canonical property tree driving the flatten engine.
//!
//! A [`Property`] names the output column for a value and lists the nested
//! fields to descend into. Trees are built once, either programmatically via
//! [`Property::with_child`] or from the shorthand configuration accepted by
//! [`Property::from_value`], and are read-only afterwards.
//!
//! # Shorthand
//!
//! | Form | Meaning |
//! |------|---------|
//! | `"col"` | leaf column named `col` |
//! | `true` | leaf column named after the field key |
//! | `false` | field excluded |
//! | `{ "name": "col", "field": ... }` | column `col` with children (name defaults to the field key, or `root`) |

use serde_json::{Map, Value};

use crate::error::{Result, UnnestError};

/// Column name used for the top-level node when the schema does not name it.
pub const ROOT_NAME: &str = "root";

/// Reserved shorthand slot holding a node's column name.
pub const NAME_KEY: &str = "name";

const ROOT_PATH: &str = "$";

/// A node of the property tree.
///
/// Children keep their declaration order, which decides the merge order of
/// sibling branches during flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    children: Vec<(String, Property)>,
}

impl Property {
    /// Create a leaf property writing to column `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Create a root property using the default [`ROOT_NAME`] column.
    pub fn root() -> Self {
        Self::new(ROOT_NAME)
    }

    /// Add a child descending into `key`. An existing child under the same key
    /// is replaced in place.
    #[must_use]
    pub fn with_child(mut self, key: impl Into<String>, child: Property) -> Self {
        let key = key.into();
        match self.children.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = child,
            None => self.children.push((key, child)),
        }
        self
    }

    /// Normalize a shorthand schema value into a property tree.
    ///
    /// # Errors
    ///
    /// Returns [`UnnestError::InvalidSchema`] when a node is neither a string,
    /// a boolean nor an object, when the root is `false`, or when a `name`
    /// slot is not a string.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => parse_object(map, ROOT_NAME, ROOT_PATH),
            Value::String(name) => Ok(Self::new(name.as_str())),
            Value::Bool(true) => Ok(Self::root()),
            Value::Bool(false) => Err(UnnestError::invalid_schema(
                ROOT_PATH,
                "the root property cannot be excluded",
            )),
            other => Err(UnnestError::invalid_schema(
                ROOT_PATH,
                format!("expected a string, boolean or object, found {}", kind(other)),
            )),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterate over `(field key, child)` pairs in declaration order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.children
            .iter()
            .map(|(key, child)| (key.as_str(), child))
    }

    pub fn child(&self, key: &str) -> Option<&Property> {
        self.children
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, child)| child)
    }

    /// A property without children is a leaf column.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// All column names in pre-order, without duplicates.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut Vec<String>) {
        if !names.contains(&self.name) {
            names.push(self.name.clone());
        }
        for (_, child) in &self.children {
            child.collect_names(names);
        }
    }

    /// Column names written by more than one node, in pre-order of their
    /// first use.
    ///
    /// Covers both sibling reuse, which produces conflict rows, and ancestor
    /// reuse (see [`Property::reused_ancestor_names`]).
    pub fn reused_names(&self) -> Vec<String> {
        let mut seen = Vec::new();
        let mut reused = Vec::new();
        self.collect_repeated(&mut seen, &mut reused);
        reused
    }

    fn collect_repeated<'a>(&'a self, seen: &mut Vec<&'a str>, reused: &mut Vec<String>) {
        if seen.contains(&self.name.as_str()) {
            if !reused.contains(&self.name) {
                reused.push(self.name.clone());
            }
        } else {
            seen.push(&self.name);
        }
        for (_, child) in &self.children {
            child.collect_repeated(seen, reused);
        }
    }

    /// Column names that a descendant reuses from one of its ancestors.
    ///
    /// Sibling reuse is resolved by the merger; ancestor reuse is not, so the
    /// ancestor value is written over the descendant value on the first row
    /// of each branch.
    pub fn reused_ancestor_names(&self) -> Vec<String> {
        let mut reused = Vec::new();
        let mut ancestors = Vec::new();
        self.collect_reused(&mut ancestors, &mut reused);
        reused
    }

    fn collect_reused<'a>(&'a self, ancestors: &mut Vec<&'a str>, reused: &mut Vec<String>) {
        if ancestors.contains(&self.name.as_str()) && !reused.contains(&self.name) {
            reused.push(self.name.clone());
        }
        ancestors.push(&self.name);
        for (_, child) in &self.children {
            child.collect_reused(ancestors, reused);
        }
        ancestors.pop();
    }
}

fn parse_object(map: &Map<String, Value>, default_name: &str, path: &str) -> Result<Property> {
    let name = match map.get(NAME_KEY) {
        None => default_name.to_string(),
        Some(Value::String(name)) => name.clone(),
        Some(other) => {
            return Err(UnnestError::invalid_schema(
                path,
                format!("`{NAME_KEY}` must be a string, found {}", kind(other)),
            ));
        }
    };
    let mut property = Property::new(name);
    for (key, value) in map {
        if key == NAME_KEY {
            continue;
        }
        let child_path = format!("{path}.{key}");
        if let Some(child) = parse_child(key, value, &child_path)? {
            property.children.push((key.clone(), child));
        }
    }
    Ok(property)
}

fn parse_child(key: &str, value: &Value, path: &str) -> Result<Option<Property>> {
    match value {
        Value::String(name) => Ok(Some(Property::new(name.as_str()))),
        Value::Bool(true) => Ok(Some(Property::new(key))),
        Value::Bool(false) => Ok(None),
        Value::Object(map) => parse_object(map, key, path).map(Some),
        other => Err(UnnestError::invalid_schema(
            path,
            format!("expected a string, boolean or object, found {}", kind(other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
