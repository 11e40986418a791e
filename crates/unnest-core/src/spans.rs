use std::collections::BTreeMap;

use unnest_model::Row;

/// Return a copy of `rows` with every cell's `span` computed.
///
/// A cell spans itself plus each following row of the same group that has no
/// cell in that column. The run ends at the first row redefining the column
/// or at the group boundary, so a lone cell has a span of 1.
pub fn update_spans(rows: &[Row]) -> Vec<Row> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let spans = spans_from(rows, index);
            let mut row = row.clone();
            for (column, cell) in &mut row.cells {
                cell.span = Some(spans.get(column.as_str()).copied().unwrap_or(1));
            }
            row
        })
        .collect()
}

fn spans_from(rows: &[Row], index: usize) -> BTreeMap<&str, usize> {
    let parent = &rows[index];
    let mut spans: BTreeMap<&str, usize> = parent
        .cells
        .keys()
        .map(|column| (column.as_str(), 1))
        .collect();
    let mut open: Vec<&str> = spans.keys().copied().collect();
    for child in &rows[index + 1..] {
        if open.is_empty() || child.group != parent.group {
            break;
        }
        open.retain(|column| {
            if child.has(column) {
                return false;
            }
            if let Some(span) = spans.get_mut(column) {
                *span += 1;
            }
            true
        });
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use unnest_model::{Cell, Group};

    fn row(group: usize, columns: &[&str]) -> Row {
        let mut row = Row::new(Group::Index(group));
        for column in columns {
            row.cells
                .insert((*column).to_string(), Cell::new(json!(column), Group::Index(group)));
        }
        row
    }

    fn spans(rows: &[Row], column: &str) -> Vec<Option<usize>> {
        rows.iter()
            .map(|row| row.cell(column).and_then(|cell| cell.span))
            .collect()
    }

    #[test]
    fn single_row_spans_one() {
        let rows = update_spans(&[row(0, &["a", "b"])]);
        assert_eq!(spans(&rows, "a"), vec![Some(1)]);
        assert_eq!(spans(&rows, "b"), vec![Some(1)]);
    }

    #[test]
    fn span_stops_at_redefinition() {
        let rows = update_spans(&[
            row(0, &["a", "b"]),
            row(0, &["b"]),
            row(0, &["a", "b"]),
            row(0, &["b"]),
        ]);
        assert_eq!(spans(&rows, "a"), vec![Some(2), None, Some(2), None]);
        assert_eq!(spans(&rows, "b"), vec![Some(1), Some(1), Some(1), Some(1)]);
    }

    #[test]
    fn span_stops_at_group_boundary() {
        let rows = update_spans(&[row(0, &["a"]), row(0, &["b"]), row(1, &["b"])]);
        assert_eq!(spans(&rows, "a"), vec![Some(2), None, None]);
        assert_eq!(spans(&rows, "b"), vec![None, Some(1), Some(1)]);
    }

    #[test]
    fn input_is_not_mutated() {
        let input = vec![row(0, &["a"]), row(0, &["b"])];
        let _ = update_spans(&input);
        assert_eq!(input[0].cell("a").and_then(|cell| cell.span), None);
    }
}
