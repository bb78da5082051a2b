use std::io;

use serde_json::Value;

use super::format::{self, Align, Column, format_amount, format_signed_pct};

pub fn render_trends(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("trends output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            "No transactions in this range.",
            "",
            "Record entries with `moneta txn add` and the monthly trend",
            "report will build itself from your ledger.",
        ]
        .join("\n"));
    }

    let mut lines = vec![
        format!(
            "Monthly totals from {} to {}.",
            value_str(data, "from"),
            value_str(data, "to")
        ),
        String::new(),
    ];

    let columns = [
        Column {
            name: "Month",
            align: Align::Left,
        },
        Column {
            name: "Year",
            align: Align::Right,
        },
        Column {
            name: "Income",
            align: Align::Right,
        },
        Column {
            name: "Expense",
            align: Align::Right,
        },
        Column {
            name: "Net",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                value_str(row, "month").to_string(),
                row.get("year").and_then(Value::as_i64).unwrap_or(0).to_string(),
                amount_field(row, "total_income"),
                amount_field(row, "total_expense"),
                amount_field(row, "net_balance"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table(&columns, &table_rows, format::terminal_width()));

    Ok(lines.join("\n"))
}

pub fn render_analysis(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("analysis output requires rows"))?;

    let window = data.get("window").cloned().unwrap_or(Value::Null);
    let previous = data.get("previous_window").cloned().unwrap_or(Value::Null);

    if rows.is_empty() {
        return Ok([
            "No expenses in this window.",
            "",
            "Once the window contains expense transactions, each category",
            "is compared against the adjacent previous period.",
        ]
        .join("\n"));
    }

    let mut lines = vec![
        format!(
            "Spending analysis {} to {} (previous period {} to {}).",
            value_str(&window, "start"),
            value_str(&window, "end"),
            value_str(&previous, "start"),
            value_str(&previous, "end"),
        ),
        String::new(),
    ];

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
        Column {
            name: "Trend",
            align: Align::Left,
        },
        Column {
            name: "Change",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                value_str(row, "category_name").to_string(),
                amount_field(row, "total"),
                format!(
                    "{:.1}%",
                    row.get("percentage").and_then(Value::as_f64).unwrap_or(0.0)
                ),
                row.get("transaction_count")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
                value_str(row, "trend").to_string(),
                format!(
                    "{:.1}%",
                    row.get("trend_percentage")
                        .and_then(Value::as_f64)
                        .unwrap_or(0.0)
                ),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table(&columns, &table_rows, format::terminal_width()));

    Ok(lines.join("\n"))
}

pub fn render_forecast(data: &Value) -> io::Result<String> {
    let as_of = value_str(data, "as_of").to_string();
    let Some(forecast) = data.get("forecast").filter(|value| !value.is_null()) else {
        return Ok([
            "No forecast yet.",
            "",
            "Forecasting needs at least 3 elapsed days in the current month",
            "to compute a meaningful daily average. Check back in a day or two.",
        ]
        .join("\n"));
    };

    let days_passed = forecast.get("days_passed").and_then(Value::as_u64).unwrap_or(0);
    let days_in_month = forecast
        .get("days_in_month")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let mut lines = vec![format!("Spending forecast as of {as_of}:"), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Spent so far:", amount_field(forecast, "current_month_spent")),
            ("Days elapsed:", format!("{days_passed} of {days_in_month}")),
            ("Daily average:", amount_field(forecast, "daily_average")),
            (
                "Projected month-end:",
                amount_field(forecast, "projected_end_of_month"),
            ),
            (
                "Projected balance:",
                amount_field(forecast, "projected_balance"),
            ),
            (
                "Confidence:",
                value_str(forecast, "confidence").to_string(),
            ),
        ],
        2,
    ));

    if forecast
        .get("warning")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        lines.push(String::new());
        lines.push("Warning: projected spending exceeds this month's income.".to_string());
    }

    Ok(lines.join("\n"))
}

pub fn render_compare(data: &Value) -> io::Result<String> {
    let comparison = data
        .get("comparison")
        .ok_or_else(|| io::Error::other("compare output requires a comparison"))?;
    let window = data.get("window").cloned().unwrap_or(Value::Null);
    let previous = data.get("previous_window").cloned().unwrap_or(Value::Null);

    let mut lines = vec![
        format!(
            "Period comparison {} to {} vs {} to {}.",
            value_str(&window, "start"),
            value_str(&window, "end"),
            value_str(&previous, "start"),
            value_str(&previous, "end"),
        ),
        String::new(),
    ];

    lines.extend(format::key_value_rows(
        &[
            (
                "Income:",
                comparison_line(comparison, "current_income", "previous_income", "income_change"),
            ),
            (
                "Expense:",
                comparison_line(
                    comparison,
                    "current_expense",
                    "previous_expense",
                    "expense_change",
                ),
            ),
            (
                "Balance:",
                comparison_line(
                    comparison,
                    "current_balance",
                    "previous_balance",
                    "balance_change",
                ),
            ),
        ],
        2,
    ));

    Ok(lines.join("\n"))
}

fn comparison_line(comparison: &Value, current_key: &str, previous_key: &str, change_key: &str) -> String {
    let change = comparison
        .get(change_key)
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    format!(
        "{} (previous {}, {})",
        amount_field(comparison, current_key),
        amount_field(comparison, previous_key),
        format_signed_pct(change),
    )
}

fn amount_field(row: &Value, key: &str) -> String {
    format_amount(row.get(key).and_then(Value::as_f64).unwrap_or(0.0))
}

fn value_str<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}
