pub mod analysis;
pub mod categories;
pub mod compare;
pub mod dashboard;
pub mod export;
pub mod forecast;
pub mod transactions;
pub mod trends;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::ClientResult;
use crate::setup::{ensure_initialized, ensure_initialized_at};
use crate::state::open_connection;

/// Every command starts the same way: make sure the ledger exists and is
/// healthy, then hand back an open connection alongside its path.
pub(crate) fn open_ledger(home_override: Option<&Path>) -> ClientResult<(PathBuf, Connection)> {
    let setup = if let Some(home) = home_override {
        ensure_initialized_at(home)?
    } else {
        ensure_initialized()?
    };
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;
    Ok((db_path, connection))
}
