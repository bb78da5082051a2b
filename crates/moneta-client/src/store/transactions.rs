use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};
use ulid::Ulid;

use crate::analytics::range::{format_iso_date, parse_stored_date};
use crate::analytics::types::DateWindow;
use crate::state::map_sqlite_error;
use crate::store::now_timestamp;
use crate::store::rows::{LedgerRow, TxnKind};
use crate::{ClientError, ClientResult};

/// Read-side filter for ledger rows. Absent fields impose no constraint;
/// date bounds are inclusive on both ends.
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub kind: Option<TxnKind>,
    pub category_id: Option<String>,
    pub search: Option<String>,
}

impl LedgerFilter {
    pub fn window(window: DateWindow) -> Self {
        Self {
            from: Some(window.start),
            to: Some(window.end),
            ..Self::default()
        }
    }

    pub fn expenses_in(window: DateWindow) -> Self {
        Self {
            from: Some(window.start),
            to: Some(window.end),
            kind: Some(TxnKind::Expense),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionPage {
    pub rows: Vec<LedgerRow>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

const LEDGER_SELECT: &str = "SELECT
        t.txn_id,
        t.owner_id,
        t.category_id,
        c.name,
        c.icon,
        c.color,
        t.amount,
        t.kind,
        t.occurred_on,
        t.name,
        t.note
     FROM internal_transactions t
     JOIN internal_categories c ON c.category_id = t.category_id
     WHERE t.owner_id = ?1
       AND (?2 IS NULL OR t.occurred_on >= ?2)
       AND (?3 IS NULL OR t.occurred_on <= ?3)
       AND (?4 IS NULL OR t.kind = ?4)
       AND (?5 IS NULL OR t.category_id = ?5)
       AND (?6 IS NULL
            OR instr(lower(t.name), lower(?6)) > 0
            OR instr(lower(coalesce(t.note, '')), lower(?6)) > 0)";

/// Loads every ledger row matching the filter, oldest first. The untyped
/// SQLite row is mapped into `LedgerRow` here; a row that cannot be mapped
/// means the ledger file itself is damaged.
pub fn load_ledger_rows(
    connection: &Connection,
    db_path: &Path,
    owner: &str,
    filter: &LedgerFilter,
) -> ClientResult<Vec<LedgerRow>> {
    let sql = format!("{LEDGER_SELECT} ORDER BY t.occurred_on ASC, t.txn_id ASC");
    let mut statement = connection
        .prepare(&sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let from_bound = filter.from.as_ref().map(format_iso_date);
    let to_bound = filter.to.as_ref().map(format_iso_date);
    let kind_bound = filter.kind.map(TxnKind::as_str);

    let rows_iter = statement
        .query_map(
            params![
                owner,
                from_bound,
                to_bound,
                kind_bound,
                filter.category_id,
                filter.search,
            ],
            raw_ledger_row,
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut rows: Vec<LedgerRow> = Vec::new();
    for row in rows_iter {
        let raw = row.map_err(|error| map_sqlite_error(db_path, &error))?;
        rows.push(typed_ledger_row(raw, db_path)?);
    }

    Ok(rows)
}

/// Paginated newest-first listing for the transaction browser. Uses the
/// same bound-parameter filter as `load_ledger_rows`; the search term is
/// matched literally, so `%` and `_` carry no special meaning.
pub fn list_transactions(
    connection: &Connection,
    db_path: &Path,
    owner: &str,
    filter: &LedgerFilter,
    page: i64,
    limit: i64,
) -> ClientResult<TransactionPage> {
    let offset = (page - 1) * limit;
    let sql = format!(
        "{LEDGER_SELECT}
         ORDER BY t.occurred_on DESC, t.created_at DESC, t.txn_id DESC
         LIMIT ?7 OFFSET ?8"
    );
    let mut statement = connection
        .prepare(&sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let from_bound = filter.from.as_ref().map(format_iso_date);
    let to_bound = filter.to.as_ref().map(format_iso_date);
    let kind_bound = filter.kind.map(TxnKind::as_str);

    let rows_iter = statement
        .query_map(
            params![
                owner,
                from_bound,
                to_bound,
                kind_bound,
                filter.category_id,
                filter.search,
                limit,
                offset,
            ],
            raw_ledger_row,
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut rows: Vec<LedgerRow> = Vec::new();
    for row in rows_iter {
        let raw = row.map_err(|error| map_sqlite_error(db_path, &error))?;
        rows.push(typed_ledger_row(raw, db_path)?);
    }

    let count_sql = format!("SELECT COUNT(*) FROM ({LEDGER_SELECT})");
    let total_count = connection
        .query_row(
            &count_sql,
            params![
                owner,
                from_bound,
                to_bound,
                kind_bound,
                filter.category_id,
                filter.search,
            ],
            |row| row.get::<_, i64>(0),
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(TransactionPage {
        rows,
        total_count,
        page,
        limit,
        has_more: total_count > offset + limit,
    })
}

/// The most recent entries for the dashboard, newest first.
pub fn recent_transactions(
    connection: &Connection,
    db_path: &Path,
    owner: &str,
    limit: i64,
) -> ClientResult<Vec<LedgerRow>> {
    let page = list_transactions(connection, db_path, owner, &LedgerFilter::default(), 1, limit)?;
    Ok(page.rows)
}

/// A transaction already validated at the command boundary; this layer
/// only persists it.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub category_id: String,
    pub amount: f64,
    pub kind: TxnKind,
    pub occurred_on: NaiveDate,
    pub name: String,
    pub note: Option<String>,
}

pub fn insert_transaction(
    connection: &Connection,
    db_path: &Path,
    owner: &str,
    input: &NewTransaction,
) -> ClientResult<String> {
    let txn_id = format!("txn_{}", Ulid::new());
    let timestamp = now_timestamp();
    connection
        .execute(
            "INSERT INTO internal_transactions (
                txn_id,
                owner_id,
                category_id,
                amount,
                kind,
                occurred_on,
                name,
                note,
                created_at,
                updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                txn_id,
                owner,
                input.category_id,
                input.amount,
                input.kind.as_str(),
                format_iso_date(&input.occurred_on),
                input.name,
                input.note,
                timestamp,
                timestamp,
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(txn_id)
}

pub fn delete_transaction(
    connection: &Connection,
    db_path: &Path,
    owner: &str,
    txn_id: &str,
) -> ClientResult<()> {
    let deleted = connection
        .execute(
            "DELETE FROM internal_transactions WHERE txn_id = ?1 AND owner_id = ?2",
            params![txn_id, owner],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    if deleted == 0 {
        return Err(ClientError::transaction_not_found(txn_id));
    }
    Ok(())
}

type RawLedgerRow = (
    String,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    f64,
    String,
    String,
    String,
    Option<String>,
);

fn raw_ledger_row(row: &Row<'_>) -> rusqlite::Result<RawLedgerRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
        row.get(10)?,
    ))
}

fn typed_ledger_row(raw: RawLedgerRow, db_path: &Path) -> ClientResult<LedgerRow> {
    let (
        txn_id,
        owner_id,
        category_id,
        category_name,
        category_icon,
        category_color,
        amount,
        kind_text,
        occurred_on_text,
        name,
        note,
    ) = raw;

    let Some(kind) = TxnKind::parse(&kind_text) else {
        return Err(ClientError::ledger_corrupt(db_path));
    };
    let Some(occurred_on) = parse_stored_date(&occurred_on_text) else {
        return Err(ClientError::ledger_corrupt(db_path));
    };

    Ok(LedgerRow {
        txn_id,
        owner_id,
        category_id,
        category_name,
        category_icon,
        category_color,
        amount,
        kind,
        occurred_on,
        name,
        note,
    })
}
