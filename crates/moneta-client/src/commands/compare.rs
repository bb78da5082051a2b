use std::path::Path;

use crate::ClientResult;
use crate::analytics::aggregate::summarize;
use crate::analytics::compare::{PeriodTotals, compare_periods};
use crate::analytics::range::{build_window, previous_window};
use crate::commands::open_ledger;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ComparisonData, WindowSpan};
use crate::state::resolve_owner;
use crate::store::transactions::{LedgerFilter, load_ledger_rows};

#[derive(Debug)]
pub struct CompareRunOptions<'a> {
    pub from: String,
    pub to: String,
    pub owner: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(from: &str, to: &str) -> ClientResult<SuccessEnvelope> {
    run_with_options(CompareRunOptions {
        from: from.to_string(),
        to: to.to_string(),
        owner: None,
        home_override: None,
    })
}

pub fn run_with_options(options: CompareRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let window = build_window(&options.from, &options.to, "report compare")?;
    let previous = previous_window(&window);

    let (db_path, connection) = open_ledger(options.home_override)?;
    let owner = resolve_owner(options.owner.as_deref());

    let current_rows =
        load_ledger_rows(&connection, &db_path, &owner, &LedgerFilter::window(window))?;
    let previous_rows =
        load_ledger_rows(&connection, &db_path, &owner, &LedgerFilter::window(previous))?;

    let current = summarize(&current_rows);
    let prior = summarize(&previous_rows);

    let comparison = compare_periods(
        PeriodTotals {
            income: current.total_income,
            expense: current.total_expense,
        },
        PeriodTotals {
            income: prior.total_income,
            expense: prior.total_expense,
        },
    );

    let data = ComparisonData {
        window: WindowSpan::from_window(&window),
        previous_window: WindowSpan::from_window(&previous),
        comparison,
    };
    success("report compare", data)
}
