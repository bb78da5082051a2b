use chrono::NaiveDate;
use moneta_client::analytics::types::TimeFilter;
use moneta_client::commands;
use moneta_client::commands::dashboard::DashboardRunOptions;
use moneta_client::commands::transactions::{
    AddTransactionOptions, ListTransactionsOptions, RemoveTransactionOptions,
};
use moneta_client::commands::categories::{AddCategoryOptions, RemoveCategoryOptions};
use moneta_client::store::rows::TxnKind;
use moneta_client::{ClientError, ClientResult, SuccessEnvelope};

use crate::cli::{CategoryCommand, Cli, Commands, IsoDate, ReportCommand, TxnCommand};

pub fn dispatch(cli: &Cli, today: NaiveDate) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Dashboard { filter, recent, .. } => {
            let filter = parse_filter(filter)?;
            commands::dashboard::run_with_options(DashboardRunOptions {
                filter,
                today,
                recent_limit: *recent,
                owner: None,
                home_override: None,
            })
        }
        Commands::Report { command } => match command {
            ReportCommand::Trends { months, .. } => commands::trends::run(*months, today),
            ReportCommand::Analysis { from, to, .. } => {
                commands::analysis::run(from.as_str(), to.as_str())
            }
            ReportCommand::Forecast { .. } => commands::forecast::run(today),
            ReportCommand::Compare { from, to, .. } => {
                commands::compare::run(from.as_str(), to.as_str())
            }
        },
        Commands::Txn { command } => match command {
            TxnCommand::Add {
                amount,
                kind,
                category,
                date,
                name,
                note,
                ..
            } => commands::transactions::add_with_options(AddTransactionOptions {
                amount: *amount,
                kind: parse_kind(kind)?,
                category_id: category.clone(),
                date: date.as_str().to_string(),
                name: name.clone(),
                note: note.clone(),
                owner: None,
                home_override: None,
            }),
            TxnCommand::List {
                from,
                to,
                kind,
                category,
                search,
                page,
                limit,
                ..
            } => {
                let kind = match kind {
                    Some(value) => Some(parse_kind(value)?),
                    None => None,
                };
                commands::transactions::list_with_options(ListTransactionsOptions {
                    from: from.as_ref().map(iso_date_string),
                    to: to.as_ref().map(iso_date_string),
                    kind,
                    category_id: category.clone(),
                    search: search.clone(),
                    page: *page,
                    limit: *limit,
                    owner: None,
                    home_override: None,
                })
            }
            TxnCommand::Remove { txn_id, .. } => {
                commands::transactions::remove_with_options(RemoveTransactionOptions {
                    txn_id: txn_id.clone(),
                    owner: None,
                    home_override: None,
                })
            }
        },
        Commands::Category { command } => match command {
            CategoryCommand::List { .. } => commands::categories::list(),
            CategoryCommand::Add {
                name,
                kind,
                icon,
                color,
                ..
            } => commands::categories::add_with_options(AddCategoryOptions {
                name: name.clone(),
                kind: parse_kind(kind)?,
                icon: icon.clone(),
                color: color.clone(),
                owner: None,
                home_override: None,
            }),
            CategoryCommand::Remove { category_id, .. } => {
                commands::categories::remove_with_options(RemoveCategoryOptions {
                    category_id: category_id.clone(),
                    owner: None,
                    home_override: None,
                })
            }
        },
        Commands::Export { path, .. } => commands::export::run(path),
    }
}

fn parse_filter(value: &str) -> ClientResult<TimeFilter> {
    TimeFilter::parse(value).ok_or_else(|| {
        ClientError::invalid_argument("`--filter` must be one of: day, week, month, year.")
    })
}

fn parse_kind(value: &str) -> ClientResult<TxnKind> {
    TxnKind::parse(value)
        .ok_or_else(|| ClientError::invalid_argument("`--kind` must be one of: income, expense."))
}

fn iso_date_string(value: &IsoDate) -> String {
    value.as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::{parse_filter, parse_kind};
    use moneta_client::analytics::types::TimeFilter;
    use moneta_client::store::rows::TxnKind;

    #[test]
    fn filter_and_kind_parsers_cover_the_cli_vocabulary() {
        let filter = parse_filter("week");
        assert!(filter.is_ok());
        if let Ok(value) = filter {
            assert_eq!(value, TimeFilter::Week);
        }

        let kind = parse_kind("expense");
        assert!(kind.is_ok());
        if let Ok(value) = kind {
            assert_eq!(value, TxnKind::Expense);
        }

        assert!(parse_filter("quarter").is_err());
        assert!(parse_kind("transfer").is_err());
    }
}
