use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

const BOOTSTRAP_SQL: &str = include_str!("migrations/0001_bootstrap.sql");

pub const EXPECTED_USER_VERSION: i64 = 1;

pub const REQUIRED_INDEX_NAMES: [&str; 5] = [
    "idx_internal_categories_owner_name_kind",
    "idx_internal_categories_owner_kind",
    "idx_internal_transactions_owner_occurred_on",
    "idx_internal_transactions_owner_kind",
    "idx_internal_transactions_category_id",
];

pub const REQUIRED_META_KEYS: [(&str, &str); 1] = [("schema_version", "v1")];

pub fn run_pending(conn: &mut Connection) -> rusqlite_migration::Result<()> {
    let migrations = Migrations::new(vec![M::up(BOOTSTRAP_SQL)]);
    migrations.to_latest(conn)
}

#[cfg(test)]
mod tests {
    use super::{BOOTSTRAP_SQL, REQUIRED_INDEX_NAMES};

    #[test]
    fn bootstrap_sql_creates_every_required_index() {
        for index_name in REQUIRED_INDEX_NAMES {
            assert!(
                BOOTSTRAP_SQL.contains(index_name),
                "bootstrap SQL is missing index {index_name}"
            );
        }
    }
}
