use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `moneta {cmd} --help` for usage."),
            None => "Run `moneta --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn category_not_found(category_id: &str) -> Self {
        Self::new(
            "category_not_found",
            &format!("Category `{category_id}` was not found."),
            vec![
                "Run `moneta category list` to see available category ids.".to_string(),
                "Retry with a category id from that list.".to_string(),
            ],
        )
        .with_data(json!({
            "category_id": category_id,
        }))
    }

    pub fn category_kind_mismatch(category_id: &str, category_kind: &str, txn_kind: &str) -> Self {
        Self::new(
            "category_kind_mismatch",
            &format!(
                "Category `{category_id}` is a {category_kind} category and cannot hold a {txn_kind} transaction."
            ),
            vec![format!(
                "Run `moneta category list` and pick a {txn_kind} category."
            )],
        )
        .with_data(json!({
            "category_id": category_id,
            "category_kind": category_kind,
            "transaction_kind": txn_kind,
        }))
    }

    pub fn category_protected(category_id: &str) -> Self {
        Self::new(
            "category_protected",
            &format!("Category `{category_id}` is a shared system category and cannot be changed."),
            vec![
                "System categories are available to every ledger owner and are read-only."
                    .to_string(),
                "Create your own category with `moneta category add` instead.".to_string(),
            ],
        )
        .with_data(json!({
            "category_id": category_id,
        }))
    }

    pub fn category_exists(name: &str, kind: &str) -> Self {
        Self::new(
            "category_exists",
            &format!("A {kind} category named `{name}` already exists."),
            vec!["Pick a different name, or reuse the existing category.".to_string()],
        )
        .with_data(json!({
            "name": name,
            "kind": kind,
        }))
    }

    pub fn transaction_not_found(txn_id: &str) -> Self {
        Self::new(
            "transaction_not_found",
            &format!("Transaction `{txn_id}` was not found."),
            vec![
                "Run `moneta txn list` to find a valid transaction id.".to_string(),
                "Retry with a transaction id from that list.".to_string(),
            ],
        )
        .with_data(json!({
            "txn_id": txn_id,
        }))
    }

    pub fn export_failed(path: &str, detail: &str) -> Self {
        Self::new(
            "export_failed",
            &format!("Could not write export file `{path}`: {detail}"),
            vec!["Pick a destination path in a writable directory and retry.".to_string()],
        )
        .with_data(json!({
            "path": path,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn ledger_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_permission_denied",
            &format!("Cannot initialize ledger at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `MONETA_HOME` to a writable directory."
            )],
        )
    }

    pub fn ledger_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_locked",
            &format!("Ledger database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn ledger_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_corrupt",
            &format!("Ledger database appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid SQLite ledger file or restore from backup."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        Self::new(
            "migration_failed",
            &format!("Ledger migration failed at `{}`: {detail}", path.display()),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn ledger_init_failed(path: &Path, detail: &str) -> Self {
        Self::new(
            "ledger_init_failed",
            &format!(
                "Ledger initialization failed at `{}`: {detail}",
                path.display()
            ),
            Vec::new(),
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
