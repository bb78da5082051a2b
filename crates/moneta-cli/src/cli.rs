use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_time_filter(value: &str) -> Result<String, String> {
    match value {
        "day" | "week" | "month" | "year" => Ok(value.to_string()),
        _ => Err("filter must be one of: day, week, month, year".to_string()),
    }
}

pub fn parse_txn_kind(value: &str) -> Result<String, String> {
    match value {
        "income" | "expense" => Ok(value.to_string()),
        _ => Err("kind must be one of: income, expense".to_string()),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "moneta",
    version,
    about = "personal finance ledger and analytics",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show totals, category breakdown, and recent entries for a time window
    Dashboard {
        /// Time window: day, week, month, or year
        #[arg(long, value_parser = parse_time_filter, default_value = "month")]
        filter: String,
        /// How many recent transactions to include
        #[arg(long, default_value_t = 10)]
        recent: i64,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Ledger reports: trends, category analysis, forecast, comparison
    #[command(arg_required_else_help = true)]
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// Record, browse, and remove ledger transactions
    #[command(arg_required_else_help = true)]
    Txn {
        #[command(subcommand)]
        command: TxnCommand,
    },
    /// Manage spending and income categories
    #[command(arg_required_else_help = true)]
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    /// Export the full ledger to a CSV file
    Export {
        /// Destination file path
        path: String,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReportCommand {
    /// Month-by-month income and expense totals
    Trends {
        /// How many months back to include
        #[arg(long, default_value_t = 6)]
        months: u32,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Per-category spending with trend direction against the prior period
    Analysis {
        /// Window start (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: IsoDate,
        /// Window end (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: IsoDate,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Project this month's spending to month end
    Forecast {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Compare a window against the adjacent previous window
    Compare {
        /// Window start (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: IsoDate,
        /// Window end (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: IsoDate,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum TxnCommand {
    /// Record one transaction
    Add {
        /// Amount in your ledger's currency unit (positive number)
        #[arg(long)]
        amount: f64,
        /// Transaction kind: income or expense
        #[arg(long, value_parser = parse_txn_kind)]
        kind: String,
        /// Category id (see `moneta category list`)
        #[arg(long)]
        category: String,
        /// Calendar date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        date: IsoDate,
        /// Short transaction label
        #[arg(long)]
        name: String,
        /// Optional free-form note
        #[arg(long)]
        note: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Browse transactions, newest first
    List {
        /// Start date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// End date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// Kind filter: income or expense
        #[arg(long, value_parser = parse_txn_kind)]
        kind: Option<String>,
        /// Category id filter
        #[arg(long)]
        category: Option<String>,
        /// Literal text to match in name or note
        #[arg(long)]
        search: Option<String>,
        /// Page number, starting at 1
        #[arg(long)]
        page: Option<i64>,
        /// Rows per page
        #[arg(long)]
        limit: Option<i64>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Remove one transaction by id
    Remove {
        /// The transaction id to remove (e.g. txn_abc123)
        txn_id: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CategoryCommand {
    /// List your categories plus the shared system set
    List {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Create a category
    Add {
        /// Category name
        #[arg(long)]
        name: String,
        /// Category kind: income or expense
        #[arg(long, value_parser = parse_txn_kind)]
        kind: String,
        /// Optional icon (emoji or short text)
        #[arg(long)]
        icon: Option<String>,
        /// Optional hex color like #4f46e5
        #[arg(long)]
        color: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Remove an owned category, reassigning its transactions to "Other"
    Remove {
        /// The category id to remove (e.g. cat_abc123)
        category_id: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
