//! Rendering a flattened table in the selected output format.

use anyhow::{Context, Result};
use unnest_core::Table;
use unnest_report::{cell_labels, render_markdown, render_terminal};

/// Output formats of the flatten command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pipe-delimited Markdown table.
    Markdown,
    /// Boxed terminal table.
    Table,
    /// Columns and rows with cell groups and spans.
    Json,
    /// Plain column to value records.
    Data,
}

/// Render `table`, restricted to `columns` (in that order) when given.
pub fn render_output(
    table: &Table,
    format: OutputFormat,
    columns: Option<&[String]>,
) -> Result<String> {
    match format {
        OutputFormat::Markdown => {
            let columns = columns.unwrap_or(table.columns());
            Ok(render_markdown(table.rows(), Some(columns), cell_labels))
        }
        OutputFormat::Table => Ok(render_terminal(table).to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(table).context("serialize table"),
        OutputFormat::Data => serde_json::to_string_pretty(&table.data()).context("serialize rows"),
    }
}
