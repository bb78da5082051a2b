use chrono::NaiveDate;
use serde::Serialize;

/// Coarse dashboard time filter. A closed set: every variant resolves to a
/// concrete window, so window resolution is a total function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    Day,
    Week,
    Month,
    Year,
}

impl TimeFilter {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

/// Inclusive calendar-date window used for every aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Number of calendar days covered, counting both endpoints.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DashboardSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub total_balance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub category_id: String,
    pub category_name: String,
    pub category_icon: Option<String>,
    pub category_color: Option<String>,
    pub total: f64,
    pub percentage: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub year: i32,
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

/// Per-category spending analysis for one window, with direction of change
/// against the comparable previous window. `trend_percentage` is the
/// absolute percent change; direction carries the sign.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryAnalysis {
    pub category_id: String,
    pub category_name: String,
    pub category_icon: Option<String>,
    pub category_color: Option<String>,
    pub total: f64,
    pub percentage: f64,
    pub transaction_count: i64,
    pub trend: TrendDirection,
    pub trend_percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SpendingForecast {
    pub current_month_spent: f64,
    pub days_in_month: u32,
    pub days_passed: u32,
    pub daily_average: f64,
    pub projected_end_of_month: f64,
    pub projected_balance: f64,
    pub confidence: ConfidenceTier,
    pub warning: bool,
}

/// Whole-ledger comparison of two adjacent equal-length windows. Change
/// fields are signed percent deltas; interpretation (a falling expense is
/// good news) is left to the caller.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PeriodComparison {
    pub current_income: f64,
    pub current_expense: f64,
    pub current_balance: f64,
    pub previous_income: f64,
    pub previous_expense: f64,
    pub previous_balance: f64,
    pub income_change: f64,
    pub expense_change: f64,
    pub balance_change: f64,
}
