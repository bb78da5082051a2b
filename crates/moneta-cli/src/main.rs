mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use moneta_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "Moneta - personal finance ledger and analytics

Usage:
  moneta <command>

Start here:
  moneta category list
  moneta txn add --help
  moneta dashboard
";

const TOP_LEVEL_HELP: &str = "Moneta — personal finance ledger and analytics

USAGE: moneta <command>

Record your money flow:
  moneta category list                                    See category ids (system set is preloaded)
  moneta txn add --amount 42.50 --kind expense \\
      --category cat_system_food --date 2026-08-02 \\
      --name Groceries                                    Record a transaction
  moneta txn list --search coffee                         Browse and filter the ledger

See where it goes:
  moneta dashboard                                        Totals, category breakdown, recent entries
  moneta dashboard --filter week                          Same, for the current week
  moneta report trends --months 6                         Month-by-month income and expense
  moneta report analysis --from 2026-07-01 --to 2026-07-31
                                                          Per-category spending with trend direction
  moneta report forecast                                  Project this month's spending to month end
  moneta report compare --from 2026-07-01 --to 2026-07-31
                                                          Compare a window to the previous period

Other commands:
  moneta category add --name Pets --kind expense          Create your own category
  moneta txn remove <txn-id>                              Remove a transaction
  moneta export ledger.csv                                Export everything to CSV

Every command accepts --json for machine-readable output.
Run `moneta <command> --help` for command usage.
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let body = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&body).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }

            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);
    let today = chrono::Local::now().date_naive();

    let dispatched = dispatch::dispatch(&cli, today);
    match dispatched {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information"
/// hint) so the recovery steps are the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// Builds the subcommand path from raw CLI args for use in help hints.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let non_flags: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();
    if non_flags.is_empty() {
        return None;
    }

    let hint = match non_flags.as_slice() {
        ["dashboard", ..] => Some("dashboard"),
        ["report", "trends", ..] => Some("report trends"),
        ["report", "analysis", ..] => Some("report analysis"),
        ["report", "forecast", ..] => Some("report forecast"),
        ["report", "compare", ..] => Some("report compare"),
        ["report", ..] => Some("report"),
        ["txn", "add", ..] => Some("txn add"),
        ["txn", "list", ..] => Some("txn list"),
        ["txn", "remove", ..] => Some("txn remove"),
        ["txn", ..] => Some("txn"),
        ["category", "list", ..] => Some("category list"),
        ["category", "add", ..] => Some("category add"),
        ["category", "remove", ..] => Some("category remove"),
        ["category", ..] => Some("category"),
        ["export", ..] => Some("export"),
        _ => None,
    };
    hint.map(std::string::ToString::to_string)
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
        || matches!(
            error.code.as_str(),
            "ledger_init_permission_denied"
                | "ledger_locked"
                | "ledger_corrupt"
                | "migration_failed"
                | "ledger_init_failed"
        )
}
