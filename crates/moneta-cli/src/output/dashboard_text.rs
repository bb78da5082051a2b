use std::io;

use serde_json::Value;

use super::format::{self, Align, Column, format_amount};

pub fn render_dashboard(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("dashboard output requires a summary"))?;
    let window = data.get("window").cloned().unwrap_or(Value::Null);

    let mut lines = vec![
        format!(
            "Dashboard — {} ({} to {})",
            filter_label(data.get("filter").and_then(Value::as_str).unwrap_or("month")),
            value_str(&window, "start"),
            value_str(&window, "end"),
        ),
        String::new(),
        "Totals:".to_string(),
    ];

    lines.extend(format::key_value_rows(
        &[
            ("Income:", amount_field(summary, "total_income")),
            ("Expense:", amount_field(summary, "total_expense")),
            ("Balance:", amount_field(summary, "total_balance")),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push("Spending by category:".to_string());
    let breakdown = data
        .get("breakdown")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if breakdown.is_empty() {
        lines.push("  No expenses in this window.".to_string());
    } else {
        let columns = [
            Column {
                name: "Category",
                align: Align::Left,
            },
            Column {
                name: "Total",
                align: Align::Right,
            },
            Column {
                name: "Share",
                align: Align::Right,
            },
            Column {
                name: "Entries",
                align: Align::Right,
            },
        ];
        let rows = breakdown
            .iter()
            .map(|row| {
                vec![
                    value_str(row, "category_name").to_string(),
                    amount_field(row, "total"),
                    format!(
                        "{:.1}%",
                        row.get("percentage").and_then(Value::as_f64).unwrap_or(0.0)
                    ),
                    row.get("count").and_then(Value::as_i64).unwrap_or(0).to_string(),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table(&columns, &rows, format::terminal_width()));
    }

    lines.push(String::new());
    lines.push("Recent transactions:".to_string());
    let recent = data
        .get("recent")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if recent.is_empty() {
        lines.push("  No transactions recorded yet.".to_string());
    } else {
        lines.extend(transaction_table(&recent));
    }

    Ok(lines.join("\n"))
}

pub fn transaction_table(rows: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Kind",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "Id",
            align: Align::Left,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                value_str(row, "date").to_string(),
                value_str(row, "kind").to_string(),
                value_str(row, "category_name").to_string(),
                value_str(row, "name").to_string(),
                amount_field(row, "amount"),
                value_str(row, "txn_id").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &table_rows, format::terminal_width())
}

fn filter_label(filter: &str) -> &'static str {
    match filter {
        "day" => "today",
        "week" => "this week",
        "year" => "this year",
        _ => "this month",
    }
}

fn amount_field(row: &Value, key: &str) -> String {
    format_amount(row.get(key).and_then(Value::as_f64).unwrap_or(0.0))
}

fn value_str<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_dashboard;

    #[test]
    fn renders_totals_breakdown_and_recent_sections() {
        let data = json!({
            "filter": "month",
            "window": { "start": "2026-08-01", "end": "2026-08-06" },
            "summary": { "total_income": 2500.0, "total_expense": 1000.0, "total_balance": 1500.0 },
            "breakdown": [
                { "category_name": "Food & Dining", "total": 600.0, "percentage": 60.0, "count": 2 }
            ],
            "recent": [
                {
                    "date": "2026-08-02", "kind": "expense", "category_name": "Food & Dining",
                    "name": "Groceries", "amount": 600.0, "txn_id": "txn_1"
                }
            ]
        });

        let rendered = render_dashboard(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Dashboard — this month (2026-08-01 to 2026-08-06)"));
            assert!(text.contains("Income:   2500.00"));
            assert!(text.contains("Food & Dining"));
            assert!(text.contains("60.0%"));
            assert!(text.contains("Groceries"));
        }
    }

    #[test]
    fn empty_sections_use_plain_no_data_messages() {
        let data = json!({
            "filter": "day",
            "window": { "start": "2026-08-06", "end": "2026-08-06" },
            "summary": { "total_income": 0.0, "total_expense": 0.0, "total_balance": 0.0 },
            "breakdown": [],
            "recent": []
        });

        let rendered = render_dashboard(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("No expenses in this window."));
            assert!(text.contains("No transactions recorded yet."));
        }
    }
}
