use std::path::Path;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::analytics::aggregate::summarize;
use crate::analytics::forecast::spending_forecast;
use crate::analytics::policy::ANALYTICS_POLICY_V1;
use crate::analytics::range::{format_iso_date, month_to_date};
use crate::commands::open_ledger;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ForecastData;
use crate::state::resolve_owner;
use crate::store::transactions::{LedgerFilter, load_ledger_rows};

#[derive(Debug)]
pub struct ForecastRunOptions<'a> {
    pub today: NaiveDate,
    pub owner: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(today: NaiveDate) -> ClientResult<SuccessEnvelope> {
    run_with_options(ForecastRunOptions {
        today,
        owner: None,
        home_override: None,
    })
}

pub fn run_with_options(options: ForecastRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let (db_path, connection) = open_ledger(options.home_override)?;
    let owner = resolve_owner(options.owner.as_deref());

    let window = month_to_date(options.today);
    let rows = load_ledger_rows(&connection, &db_path, &owner, &LedgerFilter::window(window))?;
    let summary = summarize(&rows);

    // Too few elapsed days is a valid "no forecast yet", not a failure.
    let forecast = spending_forecast(
        summary.total_income,
        summary.total_expense,
        options.today,
        ANALYTICS_POLICY_V1,
    );

    let data = ForecastData {
        as_of: format_iso_date(&options.today),
        forecast,
    };
    success("report forecast", data)
}
