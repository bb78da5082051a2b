use serde::Serialize;

use crate::analytics::range::format_iso_date;
use crate::analytics::types::{
    CategoryAnalysis, CategoryBreakdown, DashboardSummary, DateWindow, MonthlyTrend,
    PeriodComparison, SpendingForecast,
};
use crate::store::rows::{CategoryRecord, LedgerRow, TxnKind};

#[derive(Debug, Clone, Serialize)]
pub struct WindowSpan {
    pub start: String,
    pub end: String,
}

impl WindowSpan {
    pub fn from_window(window: &DateWindow) -> Self {
        Self {
            start: format_iso_date(&window.start),
            end: format_iso_date(&window.end),
        }
    }
}

/// Wire view of one ledger transaction, dates rendered as ISO strings.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    pub txn_id: String,
    pub category_id: String,
    pub category_name: String,
    pub category_icon: Option<String>,
    pub category_color: Option<String>,
    pub amount: f64,
    pub kind: TxnKind,
    pub date: String,
    pub name: String,
    pub note: Option<String>,
}

impl TransactionView {
    pub fn from_row(row: &LedgerRow) -> Self {
        Self {
            txn_id: row.txn_id.clone(),
            category_id: row.category_id.clone(),
            category_name: row.category_name.clone(),
            category_icon: row.category_icon.clone(),
            category_color: row.category_color.clone(),
            amount: row.amount,
            kind: row.kind,
            date: format_iso_date(&row.occurred_on),
            name: row.name.clone(),
            note: row.note.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub filter: String,
    pub window: WindowSpan,
    pub summary: DashboardSummary,
    pub breakdown: Vec<CategoryBreakdown>,
    pub recent: Vec<TransactionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendsData {
    pub months_back: u32,
    pub from: String,
    pub to: String,
    pub rows: Vec<MonthlyTrend>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisData {
    pub window: WindowSpan,
    pub previous_window: WindowSpan,
    pub policy_version: String,
    pub rows: Vec<CategoryAnalysis>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastData {
    pub as_of: String,
    pub forecast: Option<SpendingForecast>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonData {
    pub window: WindowSpan,
    pub previous_window: WindowSpan,
    pub comparison: PeriodComparison,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionAddedData {
    pub txn_id: String,
    pub transaction: TransactionView,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionListData {
    pub rows: Vec<TransactionView>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRemovedData {
    pub txn_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryListData {
    pub rows: Vec<CategoryRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryAddedData {
    pub category_id: String,
    pub category: CategoryRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRemovedData {
    pub category_id: String,
    pub reassigned_transactions: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportData {
    pub path: String,
    pub rows_written: i64,
}
