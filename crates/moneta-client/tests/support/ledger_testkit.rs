#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use moneta_client::SuccessEnvelope;
use moneta_client::commands::transactions::{self, AddTransactionOptions};
use moneta_client::store::rows::TxnKind;
use serde_json::Value;
use tempfile::{Builder, TempDir};

pub fn temp_home(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("ledger-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn record_txn(
    home: &Path,
    kind: TxnKind,
    category_id: &str,
    amount: f64,
    date: &str,
    name: &str,
) {
    let result = transactions::add_with_options(AddTransactionOptions {
        amount,
        kind,
        category_id: category_id.to_string(),
        date: date.to_string(),
        name: name.to_string(),
        note: None,
        owner: None,
        home_override: Some(home),
    });
    assert!(result.is_ok(), "failed to record `{name}` on {date}");
}

pub fn expense(home: &Path, category_id: &str, amount: f64, date: &str) {
    record_txn(home, TxnKind::Expense, category_id, amount, date, "expense fixture");
}

pub fn income(home: &Path, category_id: &str, amount: f64, date: &str) {
    record_txn(home, TxnKind::Income, category_id, amount, date, "income fixture");
}

/// The `data` payload of a success envelope as a JSON value.
pub fn envelope_data(envelope: &SuccessEnvelope) -> Value {
    serde_json::to_value(envelope)
        .map(|value| value["data"].clone())
        .unwrap_or(Value::Null)
}

pub fn rows_of(data: &Value) -> Vec<Value> {
    data.get("rows")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

pub fn field_f64(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(f64::NAN)
}

pub fn field_str<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

pub fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() < 0.001
}
