//! Boxed tables for interactive terminal output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use unnest_core::Table as RowTable;

use crate::label::{cell_label, is_numeric};

/// Build a boxed table with a leading group column.
///
/// A value is printed on the row that defines it; the rows its span covers
/// stay blank.
pub fn render_terminal(rows: &RowTable) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(rows.columns().iter().map(|column| header_cell(column)));
    table.set_header(header);
    apply_table_style(&mut table);

    let mut previous_group = None;
    for row in rows.rows() {
        let group = if previous_group == Some(&row.group) {
            Cell::new("")
        } else {
            group_cell(&row.group.to_string())
        };
        previous_group = Some(&row.group);

        let mut cells = vec![group];
        for column in rows.columns() {
            let cell = match row.cell(column) {
                Some(cell) => value_cell(&cell_label(cell)),
                None => Cell::new(""),
            };
            cells.push(cell);
        }
        table.add_row(cells);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn group_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn value_cell(label: &str) -> Cell {
    if is_numeric(label) {
        Cell::new(label).set_alignment(CellAlignment::Right)
    } else {
        Cell::new(label)
    }
}
