//! Pipe-delimited Markdown tables.

use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::{Cell, CellAlignment, Table};
use unnest_core::Table as RowTable;
use unnest_model::Row;

use crate::label::{RowLabels, cell_labels, is_numeric};

/// Render `rows` as a Markdown table.
///
/// `label` returns the text for each column of a row; columns it leaves out
/// render empty. Headers are `columns` when given, otherwise every column in
/// the order the rows first mention it. Every column is as wide as its widest
/// header or label, numeric labels are right-aligned and all other text is
/// left-aligned.
pub fn render_markdown<F>(rows: &[Row], columns: Option<&[String]>, mut label: F) -> String
where
    F: FnMut(&Row) -> RowLabels,
{
    let headers = match columns {
        Some(columns) => columns.to_vec(),
        None => first_seen_columns(rows),
    };

    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN);
    table.set_header(headers.iter().map(Cell::new).collect::<Vec<_>>());
    for row in rows {
        let labels = label(row);
        let cells: Vec<Cell> = headers
            .iter()
            .map(|header| {
                let text = labels.get(header).map(String::as_str).unwrap_or_default();
                let alignment = if is_numeric(text) {
                    CellAlignment::Right
                } else {
                    CellAlignment::Left
                };
                Cell::new(text).set_alignment(alignment)
            })
            .collect();
        table.add_row(cells);
    }
    table.to_string()
}

/// Render a flattened table with its own column order and default labels.
pub fn render_table_markdown(table: &RowTable) -> String {
    render_markdown(table.rows(), Some(table.columns()), cell_labels)
}

fn first_seen_columns(rows: &[Row]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for column in row.cells.keys() {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }
    columns
}
