use std::path::Path;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::analytics::aggregate::{breakdown_by_category, summarize};
use crate::analytics::range::resolve_window;
use crate::analytics::types::TimeFilter;
use crate::commands::open_ledger;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{DashboardData, TransactionView, WindowSpan};
use crate::error::ClientError;
use crate::state::resolve_owner;
use crate::store::transactions::{LedgerFilter, load_ledger_rows, recent_transactions};

pub const DEFAULT_RECENT_LIMIT: i64 = 10;
const MAX_RECENT_LIMIT: i64 = 100;

#[derive(Debug)]
pub struct DashboardRunOptions<'a> {
    pub filter: TimeFilter,
    pub today: NaiveDate,
    pub recent_limit: i64,
    pub owner: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(filter: TimeFilter, today: NaiveDate) -> ClientResult<SuccessEnvelope> {
    run_with_options(DashboardRunOptions {
        filter,
        today,
        recent_limit: DEFAULT_RECENT_LIMIT,
        owner: None,
        home_override: None,
    })
}

pub fn run_with_options(options: DashboardRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if options.recent_limit < 1 || options.recent_limit > MAX_RECENT_LIMIT {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`--recent` must be between 1 and {MAX_RECENT_LIMIT}."),
            Some("dashboard"),
        ));
    }

    let (db_path, connection) = open_ledger(options.home_override)?;
    let owner = resolve_owner(options.owner.as_deref());

    let window = resolve_window(options.filter, options.today);
    let rows = load_ledger_rows(&connection, &db_path, &owner, &LedgerFilter::window(window))?;
    let summary = summarize(&rows);
    let breakdown = breakdown_by_category(&rows);

    let recent = recent_transactions(&connection, &db_path, &owner, options.recent_limit)?
        .iter()
        .map(TransactionView::from_row)
        .collect();

    let data = DashboardData {
        filter: options.filter.as_str().to_string(),
        window: WindowSpan::from_window(&window),
        summary,
        breakdown,
        recent,
    };
    success("dashboard", data)
}
