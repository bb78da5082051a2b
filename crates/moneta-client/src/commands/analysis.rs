use std::path::Path;

use crate::ClientResult;
use crate::analytics::policy::{ANALYTICS_POLICY_V1, ANALYTICS_POLICY_VERSION};
use crate::analytics::range::{build_window, previous_window};
use crate::analytics::trends::analyze_category_trends;
use crate::commands::open_ledger;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{AnalysisData, WindowSpan};
use crate::state::resolve_owner;
use crate::store::transactions::{LedgerFilter, load_ledger_rows};

#[derive(Debug)]
pub struct AnalysisRunOptions<'a> {
    pub from: String,
    pub to: String,
    pub owner: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(from: &str, to: &str) -> ClientResult<SuccessEnvelope> {
    run_with_options(AnalysisRunOptions {
        from: from.to_string(),
        to: to.to_string(),
        owner: None,
        home_override: None,
    })
}

pub fn run_with_options(options: AnalysisRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let window = build_window(&options.from, &options.to, "report analysis")?;
    let previous = previous_window(&window);

    let (db_path, connection) = open_ledger(options.home_override)?;
    let owner = resolve_owner(options.owner.as_deref());

    let current_rows =
        load_ledger_rows(&connection, &db_path, &owner, &LedgerFilter::expenses_in(window))?;
    let previous_rows =
        load_ledger_rows(&connection, &db_path, &owner, &LedgerFilter::expenses_in(previous))?;

    let data = AnalysisData {
        window: WindowSpan::from_window(&window),
        previous_window: WindowSpan::from_window(&previous),
        policy_version: ANALYTICS_POLICY_VERSION.to_string(),
        rows: analyze_category_trends(&current_rows, &previous_rows, ANALYTICS_POLICY_V1),
    };
    success("report analysis", data)
}
