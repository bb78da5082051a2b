use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use ulid::Ulid;

use crate::state::map_sqlite_error;
use crate::store::now_timestamp;
use crate::store::rows::{CategoryRecord, TxnKind};
use crate::{ClientError, ClientResult};

/// System "Other" categories, one per kind. Deletion reassigns orphaned
/// transactions here, so setup must guarantee both exist.
pub const FALLBACK_EXPENSE_CATEGORY_ID: &str = "cat_system_expense_other";
pub const FALLBACK_INCOME_CATEGORY_ID: &str = "cat_system_income_other";

const CATEGORY_SELECT: &str = "SELECT
        category_id,
        owner_id,
        name,
        icon,
        color,
        kind,
        is_system,
        display_order
     FROM internal_categories";

/// Categories visible to an owner: their own plus the shared system set.
pub fn query_categories(
    connection: &Connection,
    db_path: &Path,
    owner: &str,
) -> ClientResult<Vec<CategoryRecord>> {
    let sql = format!(
        "{CATEGORY_SELECT}
         WHERE owner_id = ?1 OR owner_id IS NULL
         ORDER BY kind ASC, display_order ASC, name ASC"
    );
    let mut statement = connection
        .prepare(&sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows_iter = statement
        .query_map(params![owner], raw_category_row)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut records: Vec<CategoryRecord> = Vec::new();
    for row in rows_iter {
        let raw = row.map_err(|error| map_sqlite_error(db_path, &error))?;
        records.push(typed_category_row(raw, db_path)?);
    }

    Ok(records)
}

pub fn find_category(
    connection: &Connection,
    db_path: &Path,
    owner: &str,
    category_id: &str,
) -> ClientResult<Option<CategoryRecord>> {
    let sql = format!(
        "{CATEGORY_SELECT}
         WHERE category_id = ?1 AND (owner_id = ?2 OR owner_id IS NULL)
         LIMIT 1"
    );
    let raw = connection
        .query_row(&sql, params![category_id, owner], raw_category_row)
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    match raw {
        Some(raw) => Ok(Some(typed_category_row(raw, db_path)?)),
        None => Ok(None),
    }
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub kind: TxnKind,
}

/// Creates an owner category. Name uniqueness is enforced per owner and
/// kind against both the owner's categories and the system set, so a user
/// cannot shadow a shared category.
pub fn insert_category(
    connection: &Connection,
    db_path: &Path,
    owner: &str,
    input: &NewCategory,
) -> ClientResult<String> {
    let duplicate = connection
        .query_row(
            "SELECT 1 FROM internal_categories
             WHERE (owner_id = ?1 OR owner_id IS NULL)
               AND name = ?2
               AND kind = ?3
             LIMIT 1",
            params![owner, input.name, input.kind.as_str()],
            |_row| Ok(true),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?
        .unwrap_or(false);

    if duplicate {
        return Err(ClientError::category_exists(
            &input.name,
            input.kind.as_str(),
        ));
    }

    let category_id = format!("cat_{}", Ulid::new());
    let display_order = next_display_order(connection, db_path, owner, input.kind)?;
    connection
        .execute(
            "INSERT INTO internal_categories (
                category_id,
                owner_id,
                name,
                icon,
                color,
                kind,
                is_system,
                display_order,
                created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8)",
            params![
                category_id,
                owner,
                input.name,
                input.icon,
                input.color,
                input.kind.as_str(),
                display_order,
                now_timestamp(),
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(category_id)
}

/// Deletes an owner category after reassigning its transactions to the
/// same-kind system "Other". System categories and categories belonging to
/// another owner cannot be deleted.
pub fn delete_category(
    connection: &mut Connection,
    db_path: &Path,
    owner: &str,
    category_id: &str,
) -> ClientResult<i64> {
    let category = find_category(connection, db_path, owner, category_id)?
        .ok_or_else(|| ClientError::category_not_found(category_id))?;

    if category.is_system || category.owner_id.as_deref() != Some(owner) {
        return Err(ClientError::category_protected(category_id));
    }

    let fallback_id = match category.kind {
        TxnKind::Expense => FALLBACK_EXPENSE_CATEGORY_ID,
        TxnKind::Income => FALLBACK_INCOME_CATEGORY_ID,
    };
    let fallback_exists = connection
        .query_row(
            "SELECT 1 FROM internal_categories WHERE category_id = ?1 LIMIT 1",
            params![fallback_id],
            |_row| Ok(true),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?
        .unwrap_or(false);
    if !fallback_exists {
        return Err(ClientError::ledger_corrupt(db_path));
    }

    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let reassigned = transaction
        .execute(
            "UPDATE internal_transactions
             SET category_id = ?1, updated_at = ?2
             WHERE category_id = ?3 AND owner_id = ?4",
            params![fallback_id, now_timestamp(), category_id, owner],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    transaction
        .execute(
            "DELETE FROM internal_categories WHERE category_id = ?1 AND owner_id = ?2",
            params![category_id, owner],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    transaction
        .commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(i64::try_from(reassigned).unwrap_or(0))
}

fn next_display_order(
    connection: &Connection,
    db_path: &Path,
    owner: &str,
    kind: TxnKind,
) -> ClientResult<i64> {
    let highest = connection
        .query_row(
            "SELECT MAX(display_order) FROM internal_categories
             WHERE owner_id = ?1 AND kind = ?2",
            params![owner, kind.as_str()],
            |row| row.get::<_, Option<i64>>(0),
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(highest.unwrap_or(0) + 1)
}

type RawCategoryRow = (
    String,
    Option<String>,
    String,
    Option<String>,
    Option<String>,
    String,
    i64,
    i64,
);

fn raw_category_row(row: &Row<'_>) -> rusqlite::Result<RawCategoryRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn typed_category_row(raw: RawCategoryRow, db_path: &Path) -> ClientResult<CategoryRecord> {
    let (category_id, owner_id, name, icon, color, kind_text, is_system, display_order) = raw;

    let Some(kind) = TxnKind::parse(&kind_text) else {
        return Err(ClientError::ledger_corrupt(db_path));
    };

    Ok(CategoryRecord {
        category_id,
        owner_id,
        name,
        icon,
        color,
        kind,
        is_system: is_system != 0,
        display_order,
    })
}
