use std::path::Path;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::analytics::aggregate::monthly_trends;
use crate::analytics::range::{add_months_clamped, format_iso_date};
use crate::analytics::types::DateWindow;
use crate::commands::open_ledger;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::TrendsData;
use crate::error::ClientError;
use crate::state::resolve_owner;
use crate::store::transactions::{LedgerFilter, load_ledger_rows};

const MAX_MONTHS_BACK: u32 = 120;

#[derive(Debug)]
pub struct TrendsRunOptions<'a> {
    pub months_back: u32,
    pub today: NaiveDate,
    pub owner: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(months_back: u32, today: NaiveDate) -> ClientResult<SuccessEnvelope> {
    run_with_options(TrendsRunOptions {
        months_back,
        today,
        owner: None,
        home_override: None,
    })
}

pub fn run_with_options(options: TrendsRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if options.months_back < 1 || options.months_back > MAX_MONTHS_BACK {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`--months` must be between 1 and {MAX_MONTHS_BACK}."),
            Some("report trends"),
        ));
    }

    let (db_path, connection) = open_ledger(options.home_override)?;
    let owner = resolve_owner(options.owner.as_deref());

    let months = i32::try_from(options.months_back).unwrap_or(1);
    let window = DateWindow {
        start: add_months_clamped(options.today, -months),
        end: options.today,
    };
    let rows = load_ledger_rows(&connection, &db_path, &owner, &LedgerFilter::window(window))?;

    let data = TrendsData {
        months_back: options.months_back,
        from: format_iso_date(&window.start),
        to: format_iso_date(&window.end),
        rows: monthly_trends(&rows),
    };
    success("report trends", data)
}
