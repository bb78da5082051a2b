use std::path::Path;

use crate::ClientResult;
use crate::analytics::range::{build_window, parse_iso_date_strict};
use crate::commands::open_ledger;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    TransactionAddedData, TransactionListData, TransactionRemovedData, TransactionView,
};
use crate::error::ClientError;
use crate::state::resolve_owner;
use crate::store::categories::find_category;
use crate::store::rows::{LedgerRow, TxnKind};
use crate::store::transactions::{
    LedgerFilter, NewTransaction, delete_transaction, insert_transaction, list_transactions,
};

pub const DEFAULT_PAGE_LIMIT: i64 = 20;
const MAX_PAGE_LIMIT: i64 = 100;
const MAX_TRANSACTION_AMOUNT: f64 = 10_000_000_000.0;
const MAX_NAME_CHARS: usize = 255;
const MAX_NOTE_CHARS: usize = 200;

#[derive(Debug)]
pub struct AddTransactionOptions<'a> {
    pub amount: f64,
    pub kind: TxnKind,
    pub category_id: String,
    pub date: String,
    pub name: String,
    pub note: Option<String>,
    pub owner: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn add_with_options(options: AddTransactionOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if !options.amount.is_finite() || options.amount <= 0.0 {
        return Err(ClientError::invalid_argument_for_command(
            "`--amount` must be a positive number.",
            Some("txn add"),
        ));
    }
    if options.amount > MAX_TRANSACTION_AMOUNT {
        return Err(ClientError::invalid_argument_for_command(
            "`--amount` exceeds the maximum supported value.",
            Some("txn add"),
        ));
    }

    let occurred_on = parse_iso_date_strict(&options.date, "date", "txn add")?;

    let name = options.name.trim().to_string();
    if name.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "`--name` must not be empty.",
            Some("txn add"),
        ));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`--name` must be at most {MAX_NAME_CHARS} characters."),
            Some("txn add"),
        ));
    }

    let note = options
        .note
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    if let Some(text) = &note
        && text.chars().count() > MAX_NOTE_CHARS
    {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`--note` must be at most {MAX_NOTE_CHARS} characters."),
            Some("txn add"),
        ));
    }

    let (db_path, connection) = open_ledger(options.home_override)?;
    let owner = resolve_owner(options.owner.as_deref());

    let category = find_category(&connection, &db_path, &owner, &options.category_id)?
        .ok_or_else(|| ClientError::category_not_found(&options.category_id))?;
    if category.kind != options.kind {
        return Err(ClientError::category_kind_mismatch(
            &options.category_id,
            category.kind.as_str(),
            options.kind.as_str(),
        ));
    }

    let input = NewTransaction {
        category_id: options.category_id,
        amount: options.amount,
        kind: options.kind,
        occurred_on,
        name,
        note,
    };
    let txn_id = insert_transaction(&connection, &db_path, &owner, &input)?;

    let view = TransactionView::from_row(&LedgerRow {
        txn_id: txn_id.clone(),
        owner_id: owner,
        category_id: input.category_id,
        category_name: category.name,
        category_icon: category.icon,
        category_color: category.color,
        amount: input.amount,
        kind: input.kind,
        occurred_on: input.occurred_on,
        name: input.name,
        note: input.note,
    });

    let data = TransactionAddedData {
        txn_id,
        transaction: view,
    };
    success("txn add", data)
}

#[derive(Debug, Default)]
pub struct ListTransactionsOptions<'a> {
    pub from: Option<String>,
    pub to: Option<String>,
    pub kind: Option<TxnKind>,
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub owner: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn list_with_options(options: ListTransactionsOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let page = options.page.unwrap_or(1);
    let limit = options.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    if page < 1 {
        return Err(ClientError::invalid_argument_for_command(
            "`--page` must be at least 1.",
            Some("txn list"),
        ));
    }
    if limit < 1 || limit > MAX_PAGE_LIMIT {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`--limit` must be between 1 and {MAX_PAGE_LIMIT}."),
            Some("txn list"),
        ));
    }

    let filter = build_list_filter(&options)?;

    let (db_path, connection) = open_ledger(options.home_override)?;
    let owner = resolve_owner(options.owner.as_deref());

    let result = list_transactions(&connection, &db_path, &owner, &filter, page, limit)?;

    let data = TransactionListData {
        rows: result.rows.iter().map(TransactionView::from_row).collect(),
        total_count: result.total_count,
        page: result.page,
        limit: result.limit,
        has_more: result.has_more,
    };
    success("txn list", data)
}

#[derive(Debug)]
pub struct RemoveTransactionOptions<'a> {
    pub txn_id: String,
    pub owner: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn remove_with_options(options: RemoveTransactionOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let (db_path, connection) = open_ledger(options.home_override)?;
    let owner = resolve_owner(options.owner.as_deref());

    delete_transaction(&connection, &db_path, &owner, &options.txn_id)?;

    let data = TransactionRemovedData {
        txn_id: options.txn_id,
    };
    success("txn remove", data)
}

fn build_list_filter(options: &ListTransactionsOptions<'_>) -> ClientResult<LedgerFilter> {
    // Both bounds present: validate ordering through the shared window
    // builder. A single bound is an open-ended range.
    let (from, to) = match (options.from.as_deref(), options.to.as_deref()) {
        (Some(from), Some(to)) => {
            let window = build_window(from, to, "txn list")?;
            (Some(window.start), Some(window.end))
        }
        (Some(from), None) => (
            Some(parse_iso_date_strict(from, "from", "txn list")?),
            None,
        ),
        (None, Some(to)) => (None, Some(parse_iso_date_strict(to, "to", "txn list")?)),
        (None, None) => (None, None),
    };

    let search = options
        .search
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    Ok(LedgerFilter {
        from,
        to,
        kind: options.kind,
        category_id: options.category_id.clone(),
        search,
    })
}
