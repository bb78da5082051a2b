use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const MIN_COLUMN_WIDTH: usize = 6;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(100);
    cmp::max(from_env, 40)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders an aligned table. Cells in over-budget columns are truncated
/// with an ellipsis rather than wrapped; ledger values are short enough
/// that wrapping would only hurt scanability.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>], max_width: usize) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = fitted_widths(columns, rows, max_width);

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];

    for row in rows {
        let cells = row
            .iter()
            .enumerate()
            .map(|(index, value)| truncate(value, widths.get(index).copied().unwrap_or(0)))
            .collect::<Vec<String>>();
        output.push(format_row(columns, &cells, &widths));
    }

    output
}

pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_signed_pct(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

fn fitted_widths(columns: &[Column<'_>], rows: &[Vec<String>], max_width: usize) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| column.name.len())
        .collect::<Vec<usize>>();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    let budget = max_width
        .saturating_sub(INDENT)
        .saturating_sub(COLUMN_GAP * columns.len().saturating_sub(1));
    let mut total: usize = widths.iter().sum();

    // Shave the widest column first until the table fits or nothing can
    // shrink further.
    while total > budget {
        let Some((widest, _)) = widths
            .iter()
            .enumerate()
            .filter(|(_, width)| **width > MIN_COLUMN_WIDTH)
            .max_by_key(|(_, width)| **width)
        else {
            break;
        };
        widths[widest] -= 1;
        total -= 1;
    }

    widths
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let mut pieces = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let width = widths.get(index).copied().unwrap_or(MIN_COLUMN_WIDTH);
        let value = cells.get(index).cloned().unwrap_or_default();

        let piece = match column.align {
            Align::Left => format!("{value:<width$}"),
            Align::Right => format!("{value:>width$}"),
        };
        pieces.push(piece);
    }

    let line = format!("{}{}", " ".repeat(INDENT), pieces.join("  "));
    line.trim_end().to_string()
}

fn truncate(value: &str, width: usize) -> String {
    if width == 0 || value.chars().count() <= width {
        return value.to_string();
    }
    let kept = value
        .chars()
        .take(width.saturating_sub(1))
        .collect::<String>();
    format!("{kept}\u{2026}")
}

#[cfg(test)]
mod tests {
    use super::{Align, Column, format_signed_pct, key_value_rows, render_table};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Income:", "2500.00".to_string()),
                ("Balance:", "1500.00".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Income:   2500.00");
        assert_eq!(rows[1], "  Balance:  1500.00");
    }

    #[test]
    fn table_aligns_headers_and_cells() {
        let columns = [
            Column {
                name: "Category",
                align: Align::Left,
            },
            Column {
                name: "Total",
                align: Align::Right,
            },
        ];
        let rows = vec![vec!["Food & Dining".to_string(), "600.00".to_string()]];

        let rendered = render_table(&columns, &rows, 80);
        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].contains("Category"));
        assert!(rendered[0].contains("Total"));
        assert!(rendered[1].contains("Food & Dining"));
        assert!(rendered[1].ends_with("600.00"));
    }

    #[test]
    fn over_budget_cells_are_truncated_with_ellipsis() {
        let columns = [
            Column {
                name: "Name",
                align: Align::Left,
            },
            Column {
                name: "Amount",
                align: Align::Right,
            },
        ];
        let rows = vec![vec![
            "a very long transaction label that cannot fit".to_string(),
            "12.00".to_string(),
        ]];

        let rendered = render_table(&columns, &rows, 30);
        assert!(rendered[1].contains('\u{2026}'));
        for line in &rendered {
            assert!(line.chars().count() <= 30);
        }
    }

    #[test]
    fn signed_percent_keeps_explicit_plus() {
        assert_eq!(format_signed_pct(12.34), "+12.3%".to_string());
        assert_eq!(format_signed_pct(-4.0), "-4.0%".to_string());
        assert_eq!(format_signed_pct(0.0), "0.0%".to_string());
    }
}
