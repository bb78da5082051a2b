use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use crate::migrations::{EXPECTED_USER_VERSION, REQUIRED_INDEX_NAMES, REQUIRED_META_KEYS, run_pending};
use crate::state::{
    ensure_ledger_directory, ledger_db_path, map_sqlite_error, open_connection, resolve_ledger_home,
};
use crate::store::now_timestamp;
use crate::{ClientError, ClientResult};

const INTERNAL_META_COLUMNS: [&str; 2] = ["key", "value"];
const INTERNAL_CATEGORIES_COLUMNS: [&str; 9] = [
    "category_id",
    "owner_id",
    "name",
    "icon",
    "color",
    "kind",
    "is_system",
    "display_order",
    "created_at",
];
const INTERNAL_TRANSACTIONS_COLUMNS: [&str; 10] = [
    "txn_id",
    "owner_id",
    "category_id",
    "amount",
    "kind",
    "occurred_on",
    "name",
    "note",
    "created_at",
    "updated_at",
];

const REQUIRED_CORE_TABLES: [(&str, &[&str]); 3] = [
    ("internal_meta", &INTERNAL_META_COLUMNS),
    ("internal_categories", &INTERNAL_CATEGORIES_COLUMNS),
    ("internal_transactions", &INTERNAL_TRANSACTIONS_COLUMNS),
];

/// Shared default categories seeded into every ledger with a NULL owner.
/// Seeding is insert-or-ignore, so reruns and concurrent setups are safe
/// and user edits to their own categories are never touched.
const SYSTEM_EXPENSE_CATEGORIES: [(&str, &str, &str, &str, i64); 9] = [
    ("cat_system_food", "Food & Dining", "\u{1F35C}", "#ef4444", 1),
    ("cat_system_transport", "Transport", "\u{1F697}", "#3b82f6", 2),
    ("cat_system_shopping", "Shopping", "\u{1F6CD}\u{FE0F}", "#ec4899", 3),
    ("cat_system_entertainment", "Entertainment", "\u{1F3AE}", "#8b5cf6", 4),
    ("cat_system_health", "Health", "\u{1F48A}", "#10b981", 5),
    ("cat_system_education", "Education", "\u{1F4DA}", "#f59e0b", 6),
    ("cat_system_housing", "Housing", "\u{1F3E0}", "#6366f1", 7),
    ("cat_system_bills", "Bills & Utilities", "\u{1F4C4}", "#14b8a6", 8),
    ("cat_system_expense_other", "Other", "\u{1F4E6}", "#6b7280", 99),
];
const SYSTEM_INCOME_CATEGORIES: [(&str, &str, &str, &str, i64); 5] = [
    ("cat_system_salary", "Salary", "\u{1F4B0}", "#10b981", 1),
    ("cat_system_bonus", "Bonus", "\u{1F381}", "#f59e0b", 2),
    ("cat_system_investment", "Investment", "\u{1F4C8}", "#3b82f6", 3),
    ("cat_system_sales", "Sales", "\u{1F3EA}", "#8b5cf6", 4),
    ("cat_system_income_other", "Other", "\u{1F4B5}", "#6b7280", 99),
];

#[derive(Debug, Clone)]
pub struct DataRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SetupContext {
    pub db_path: String,
    pub schema_version: String,
    pub data_range: DataRange,
}

pub fn ensure_initialized() -> ClientResult<SetupContext> {
    ensure_initialized_with_home_override(None)
}

pub fn ensure_initialized_at(home_override: &Path) -> ClientResult<SetupContext> {
    ensure_initialized_with_home_override(Some(home_override))
}

fn ensure_initialized_with_home_override(
    home_override: Option<&Path>,
) -> ClientResult<SetupContext> {
    let ledger_home = resolve_ledger_home(home_override)?;
    ensure_ledger_directory(&ledger_home)?;

    let db_path = ledger_db_path(&ledger_home);
    let mut connection = open_connection(&db_path)?;

    run_pending(&mut connection).map_err(|error| map_migration_error(&db_path, &error))?;

    verify_core_tables(&connection, &db_path)?;
    seed_system_categories(&connection, &db_path)?;
    verify_post_setup_objects(&connection, &db_path)?;

    let schema_version = read_schema_version(&connection, &db_path)?;
    let data_range = read_data_range(&connection, &db_path)?;

    Ok(SetupContext {
        db_path: db_path.display().to_string(),
        schema_version,
        data_range,
    })
}

fn map_migration_error(db_path: &Path, error: &rusqlite_migration::Error) -> ClientError {
    match error {
        rusqlite_migration::Error::RusqliteError { query: _, err } => {
            let mapped = map_sqlite_error(db_path, err);
            if mapped.code == "ledger_locked"
                || mapped.code == "ledger_corrupt"
                || mapped.code == "ledger_init_permission_denied"
            {
                mapped
            } else {
                ClientError::migration_failed(db_path, &error.to_string())
            }
        }
        _ => ClientError::migration_failed(db_path, &error.to_string()),
    }
}

fn verify_core_tables(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    for (table_name, required_columns) in REQUIRED_CORE_TABLES {
        if !sqlite_object_exists(connection, "table", table_name, db_path)? {
            return Err(ClientError::ledger_corrupt(db_path));
        }

        let columns = table_columns(connection, table_name, db_path)?;
        for required_column in required_columns {
            if !columns.iter().any(|column| column == required_column) {
                return Err(ClientError::ledger_corrupt(db_path));
            }
        }
    }

    Ok(())
}

fn seed_system_categories(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    let timestamp = now_timestamp();
    let expense_rows = SYSTEM_EXPENSE_CATEGORIES
        .iter()
        .map(|row| (*row, "expense"));
    let income_rows = SYSTEM_INCOME_CATEGORIES.iter().map(|row| (*row, "income"));

    for ((category_id, name, icon, color, display_order), kind) in expense_rows.chain(income_rows) {
        connection
            .execute(
                "INSERT OR IGNORE INTO internal_categories (
                    category_id,
                    owner_id,
                    name,
                    icon,
                    color,
                    kind,
                    is_system,
                    display_order,
                    created_at
                 ) VALUES (?1, NULL, ?2, ?3, ?4, ?5, 1, ?6, ?7)",
                params![category_id, name, icon, color, kind, display_order, timestamp],
            )
            .map_err(|error| map_sqlite_error(db_path, &error))?;
    }

    Ok(())
}

fn verify_post_setup_objects(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    let user_version = connection
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    if user_version != EXPECTED_USER_VERSION {
        return Err(ClientError::ledger_corrupt(db_path));
    }

    for (meta_key, expected_value) in REQUIRED_META_KEYS {
        let value = connection
            .query_row(
                "SELECT value FROM internal_meta WHERE key = ?1 LIMIT 1",
                [meta_key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        let Some(actual) = value else {
            return Err(ClientError::ledger_corrupt(db_path));
        };
        if actual != expected_value {
            return Err(ClientError::ledger_corrupt(db_path));
        }
    }

    for index_name in REQUIRED_INDEX_NAMES {
        if !sqlite_object_exists(connection, "index", index_name, db_path)? {
            return Err(ClientError::ledger_corrupt(db_path));
        }
    }

    Ok(())
}

fn sqlite_object_exists(
    connection: &Connection,
    object_type: &str,
    object_name: &str,
    db_path: &Path,
) -> ClientResult<bool> {
    let exists = connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2 LIMIT 1",
            params![object_type, object_name],
            |_row| Ok(true),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?
        .unwrap_or(false);

    Ok(exists)
}

fn table_columns(
    connection: &Connection,
    table_name: &str,
    db_path: &Path,
) -> ClientResult<Vec<String>> {
    if !is_required_core_table(table_name) {
        return Err(ClientError::ledger_init_failed(
            db_path,
            "Refused PRAGMA table inspection for non-core table.",
        ));
    }

    // SAFETY: `table_name` is restricted to the compile-time allowlist from
    // REQUIRED_CORE_TABLES above and never originates from user input.
    let sql = format!("PRAGMA table_info({table_name})");
    let mut statement = connection
        .prepare(&sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let column_iter = statement
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut columns: Vec<String> = Vec::new();
    for row in column_iter {
        let column = row.map_err(|error| map_sqlite_error(db_path, &error))?;
        columns.push(column);
    }

    Ok(columns)
}

fn is_required_core_table(table_name: &str) -> bool {
    REQUIRED_CORE_TABLES
        .iter()
        .any(|(required_name, _)| required_name == &table_name)
}

fn read_schema_version(connection: &Connection, db_path: &Path) -> ClientResult<String> {
    let value = connection
        .query_row(
            "SELECT value FROM internal_meta WHERE key = 'schema_version' LIMIT 1",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(value.unwrap_or_else(|| "v1".to_string()))
}

fn read_data_range(connection: &Connection, db_path: &Path) -> ClientResult<DataRange> {
    let mut statement = connection
        .prepare("SELECT MIN(occurred_on), MAX(occurred_on) FROM internal_transactions")
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let row = statement
        .query_row([], |result_row| {
            let earliest = result_row.get::<_, Option<String>>(0)?;
            let latest = result_row.get::<_, Option<String>>(1)?;
            Ok(DataRange { earliest, latest })
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(row)
}
