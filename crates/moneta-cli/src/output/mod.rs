mod dashboard_text;
mod error_text;
mod format;
mod json;
mod ledger_text;
mod mode;
mod reports_text;

use std::io;

use moneta_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_text;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_text(&format!("{body}\n"))
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_text(&format!("{body}\n"))
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "dashboard" => dashboard_text::render_dashboard(&success.data),
        "report trends" => reports_text::render_trends(&success.data),
        "report analysis" => reports_text::render_analysis(&success.data),
        "report forecast" => reports_text::render_forecast(&success.data),
        "report compare" => reports_text::render_compare(&success.data),
        "txn add" => ledger_text::render_txn_added(&success.data),
        "txn list" => ledger_text::render_txn_list(&success.data),
        "txn remove" => ledger_text::render_txn_removed(&success.data),
        "category list" => ledger_text::render_category_list(&success.data),
        "category add" => ledger_text::render_category_added(&success.data),
        "category remove" => ledger_text::render_category_removed(&success.data),
        "export" => ledger_text::render_export(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
