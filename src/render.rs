//! Plain-text rendering of a grid, used by the command-line front end.

use std::cmp;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::grid::Grid;
use crate::row::{DisplayRow, Row};
use crate::schema::Column;

/// Terminal display width of a string
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `width` columns, marking the cut with `…`
pub fn truncate(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn pad(s: &str, width: usize) -> String {
    let cell = truncate(s, width);
    let fill = width.saturating_sub(display_width(&cell));
    format!("{}{}", cell, " ".repeat(fill))
}

fn column_width(column: &Column, rows: &[DisplayRow], max_col_width: usize) -> usize {
    if let Some(width) = column.width {
        return width;
    }
    let widest = rows
        .iter()
        .map(|r| display_width(&column.display(&r.value(column))))
        .fold(display_width(&column.label), cmp::max);
    cmp::min(widest, max_col_width)
}

/// Header plus the first `limit` display rows (placeholders included), one line each.
/// Selected rows are marked with `*`.
pub fn render_table(grid: &Grid, rows: &[Row], limit: usize) -> String {
    let display: Vec<DisplayRow> = grid.display_rows(rows).into_iter().take(limit).collect();
    let columns: Vec<&Column> = grid.columns().iter().collect();
    let widths: Vec<usize> = columns
        .iter()
        .map(|c| column_width(c, &display, grid.config().max_col_width))
        .collect();

    let mut out = String::new();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| pad(&c.label, *w))
        .collect();
    out.push_str("  ");
    out.push_str(header.join(" | ").trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str("  ");
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for row in &display {
        let marker = if grid.selection().is_selected(&row.key()) { "* " } else { "  " };
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(&c.display(&row.value(c)), *w))
            .collect();
        out.push_str(marker);
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::row::RowKey;
    use crate::schema::{ColumnKind, ColumnSet};
    use crate::value::Value;

    fn grid() -> Grid {
        let columns = ColumnSet::new(vec![
            Column::new("name", "Name", ColumnKind::Text),
            Column::new("charge", "Charge", ColumnKind::Currency).with_width(10),
        ])
        .unwrap();
        Grid::new(
            columns,
            GridConfig {
                min_rows: 3,
                max_col_width: 6,
                ..GridConfig::default()
            },
        )
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_render_pads_and_marks_selection() {
        let rows = vec![Row::new("r1")
            .with("name", Value::Text("Washington".to_string()))
            .with("charge", Value::Currency(1234.5))];
        let mut grid = grid();
        grid.toggle_selected(&RowKey::Real("r1".to_string()));

        let text = render_table(&grid, &rows, 10);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "  Name   | Charge");
        assert_eq!(lines[1], "  -------+-----------");
        assert_eq!(lines[2], "* Washi… | $1,234.50");
        assert_eq!(lines[3], "         | $0.00");
    }

    #[test]
    fn test_render_limit() {
        let text = render_table(&grid(), &[], 1);
        assert_eq!(text.lines().count(), 3);
    }
}
