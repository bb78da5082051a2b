use std::path::Path;

use crate::ClientResult;
use crate::analytics::range::format_iso_date;
use crate::commands::open_ledger;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ExportData;
use crate::error::ClientError;
use crate::state::resolve_owner;
use crate::store::transactions::{LedgerFilter, load_ledger_rows};

const EXPORT_HEADERS: [&str; 7] = [
    "txn_id",
    "date",
    "kind",
    "category",
    "amount",
    "name",
    "note",
];

#[derive(Debug)]
pub struct ExportRunOptions<'a> {
    pub path: String,
    pub owner: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(path: &str) -> ClientResult<SuccessEnvelope> {
    run_with_options(ExportRunOptions {
        path: path.to_string(),
        owner: None,
        home_override: None,
    })
}

/// Writes the owner's full ledger to a CSV file, oldest transaction first.
pub fn run_with_options(options: ExportRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let (db_path, connection) = open_ledger(options.home_override)?;
    let owner = resolve_owner(options.owner.as_deref());

    let rows = load_ledger_rows(&connection, &db_path, &owner, &LedgerFilter::default())?;

    let mut writer = csv::Writer::from_path(&options.path)
        .map_err(|error| ClientError::export_failed(&options.path, &error.to_string()))?;
    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|error| ClientError::export_failed(&options.path, &error.to_string()))?;

    let mut rows_written = 0_i64;
    for row in &rows {
        let occurred_on = format_iso_date(&row.occurred_on);
        let amount = format!("{:.2}", row.amount);
        writer
            .write_record([
                row.txn_id.as_str(),
                occurred_on.as_str(),
                row.kind.as_str(),
                row.category_name.as_str(),
                amount.as_str(),
                row.name.as_str(),
                row.note.as_deref().unwrap_or(""),
            ])
            .map_err(|error| ClientError::export_failed(&options.path, &error.to_string()))?;
        rows_written += 1;
    }

    writer
        .flush()
        .map_err(|error| ClientError::export_failed(&options.path, &error.to_string()))?;

    let data = ExportData {
        path: options.path,
        rows_written,
    };
    success("export", data)
}
