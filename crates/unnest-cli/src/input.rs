//! Loading data documents and schema files.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;
use unnest_model::Property;

/// Path that reads from standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Schema file syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Toml,
}

impl SchemaFormat {
    /// Pick the syntax from the file extension; anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Read a JSON document from `path` (or stdin for `-`).
pub fn load_data(path: &Path) -> Result<Value> {
    let text = read_source(path)?;
    let value = serde_json::from_str(&text)
        .with_context(|| format!("parse JSON data {}", path.display()))?;
    debug!(path = %path.display(), "loaded data");
    Ok(value)
}

/// Read and normalize a schema file.
pub fn load_schema(path: &Path) -> Result<Property> {
    let text = read_source(path)?;
    parse_schema(&text, SchemaFormat::from_path(path))
        .with_context(|| format!("load schema {}", path.display()))
}

/// Parse schema text in the given syntax and normalize it.
pub fn parse_schema(text: &str, format: SchemaFormat) -> Result<Property> {
    let value: Value = match format {
        SchemaFormat::Json => serde_json::from_str(text).context("parse JSON schema")?,
        SchemaFormat::Toml => {
            let table: toml::Table = toml::from_str(text).context("parse TOML schema")?;
            serde_json::to_value(table).context("convert TOML schema")?
        }
    };
    Ok(Property::from_value(&value)?)
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read standard input")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
