//! Integration tests for table rendering.

use serde_json::json;
use unnest_core::{Table, unnest};
use unnest_model::{Property, RowFilter};
use unnest_report::{
    RowLabels, cell_labels, render_markdown, render_table_markdown, render_terminal,
};

fn sample() -> Table {
    let data = json!([
        { "id": 1, "tags": ["x", "y"] },
        { "id": 22, "tags": ["zed"] },
    ]);
    let property =
        Property::from_value(&json!({ "id": "id", "tags": "tag" })).expect("valid schema");
    unnest(&data, &property)
}

#[test]
fn markdown_with_explicit_columns() {
    let table = sample();
    let columns = vec!["id".to_string(), "tag".to_string()];

    let markdown = render_markdown(table.rows(), Some(&columns), cell_labels);

    insta::assert_snapshot!(markdown, @r"
    | id | tag |
    |----|-----|
    |  1 | x   |
    |    | y   |
    | 22 | zed |
    ");
}

#[test]
fn markdown_headers_default_to_first_seen_columns() {
    let table = sample().filter(|_, _, _| RowFilter::new().exclude("root"));

    let markdown = render_markdown(table.rows(), None, |row| {
        let mut labels = RowLabels::new();
        if let Some(tag) = row.cell("tag").and_then(|cell| cell.data.as_str()) {
            labels.insert("tag".to_string(), tag.to_uppercase());
        }
        labels
    });

    let lines: Vec<&str> = markdown.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "| id | tag |");
    assert_eq!(lines[4], "|    | ZED |");
}

#[test]
fn table_markdown_uses_table_columns() {
    let table = sample().filter(|_, _, _| RowFilter::new().exclude("root"));
    let markdown = render_table_markdown(&table);
    assert!(markdown.starts_with("| id | tag |"));
}

#[test]
fn terminal_table_lists_every_row() {
    let rendered = render_terminal(&sample()).to_string();
    assert!(rendered.contains("zed"));
    assert!(rendered.contains("tag"));
    assert!(rendered.lines().count() >= 5);
}

#[test]
fn markdown_headers_follow_write_order_not_alphabet() {
    let data = json!({ "zeta": 1, "alpha": 2 });
    let property = Property::from_value(&json!({ "zeta": "zeta", "alpha": "alpha" }))
        .expect("valid schema");
    let table = unnest(&data, &property).filter(|_, _, _| RowFilter::new().exclude("root"));

    let markdown = render_markdown(table.rows(), None, cell_labels);

    insta::assert_snapshot!(markdown, @r"
    | zeta | alpha |
    |------|-------|
    |    1 |     2 |
    ");
}
