use std::io;

use serde_json::Value;

use super::dashboard_text::transaction_table;
use super::format::{self, Align, Column, format_amount};

pub fn render_txn_added(data: &Value) -> io::Result<String> {
    let transaction = data
        .get("transaction")
        .ok_or_else(|| io::Error::other("txn add output requires a transaction"))?;

    let mut lines = vec![
        format!("Recorded {}.", value_str(data, "txn_id")),
        String::new(),
    ];
    let mut entries = vec![
        ("Date:", value_str(transaction, "date").to_string()),
        ("Kind:", value_str(transaction, "kind").to_string()),
        (
            "Category:",
            value_str(transaction, "category_name").to_string(),
        ),
        (
            "Amount:",
            format_amount(
                transaction
                    .get("amount")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
            ),
        ),
        ("Name:", value_str(transaction, "name").to_string()),
    ];
    if let Some(note) = transaction.get("note").and_then(Value::as_str) {
        entries.push(("Note:", note.to_string()));
    }
    lines.extend(format::key_value_rows(&entries, 2));

    Ok(lines.join("\n"))
}

pub fn render_txn_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("txn list output requires rows"))?;

    let total_count = data.get("total_count").and_then(Value::as_i64).unwrap_or(0);
    if rows.is_empty() {
        return Ok([
            "No transactions match.",
            "",
            "Loosen the filters, or record entries with `moneta txn add`.",
        ]
        .join("\n"));
    }

    let page = data.get("page").and_then(Value::as_i64).unwrap_or(1);
    let mut lines = vec![
        format!(
            "{total_count} matching transactions (page {page}, showing {}).",
            rows.len()
        ),
        String::new(),
    ];
    lines.extend(transaction_table(rows));

    if data
        .get("has_more")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        lines.push(String::new());
        lines.push(format!("More available: rerun with `--page {}`.", page + 1));
    }

    Ok(lines.join("\n"))
}

pub fn render_txn_removed(data: &Value) -> io::Result<String> {
    Ok(format!("Removed {}.", value_str(data, "txn_id")))
}

pub fn render_category_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("category list output requires rows"))?;

    if rows.is_empty() {
        return Ok("No categories found.".to_string());
    }

    let columns = [
        Column {
            name: "Id",
            align: Align::Left,
        },
        Column {
            name: "Kind",
            align: Align::Left,
        },
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Icon",
            align: Align::Left,
        },
        Column {
            name: "Source",
            align: Align::Left,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            let source = if row
                .get("is_system")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                "system"
            } else {
                "yours"
            };
            vec![
                value_str(row, "category_id").to_string(),
                value_str(row, "kind").to_string(),
                value_str(row, "name").to_string(),
                value_str(row, "icon").to_string(),
                source.to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("{} categories.", rows.len()), String::new()];
    lines.extend(format::render_table(&columns, &table_rows, format::terminal_width()));
    Ok(lines.join("\n"))
}

pub fn render_category_added(data: &Value) -> io::Result<String> {
    let category = data.get("category").cloned().unwrap_or(Value::Null);
    Ok(format!(
        "Created {} ({} category `{}`).",
        value_str(data, "category_id"),
        value_str(&category, "kind"),
        value_str(&category, "name"),
    ))
}

pub fn render_category_removed(data: &Value) -> io::Result<String> {
    let reassigned = data
        .get("reassigned_transactions")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let mut text = format!("Removed {}.", value_str(data, "category_id"));
    if reassigned > 0 {
        text.push_str(&format!(
            " Reassigned {reassigned} transactions to the system \"Other\" category."
        ));
    }
    Ok(text)
}

pub fn render_export(data: &Value) -> io::Result<String> {
    let rows_written = data
        .get("rows_written")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    Ok(format!(
        "Exported {rows_written} transactions to `{}`.",
        value_str(data, "path")
    ))
}

fn value_str<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}
