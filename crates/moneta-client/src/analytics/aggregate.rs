use std::collections::BTreeMap;

use crate::analytics::types::{CategoryBreakdown, DashboardSummary, MonthlyTrend};
use crate::store::rows::{LedgerRow, TxnKind};

/// Sums a window's rows into the dashboard totals. Empty input is a valid
/// all-zero summary, never an error.
pub fn summarize(rows: &[LedgerRow]) -> DashboardSummary {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;

    for row in rows {
        match row.kind {
            TxnKind::Income => total_income += row.amount,
            TxnKind::Expense => total_expense += row.amount,
        }
    }

    DashboardSummary {
        total_income,
        total_expense,
        total_balance: total_income - total_expense,
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CategoryTotal {
    pub category_id: String,
    pub category_name: String,
    pub category_icon: Option<String>,
    pub category_color: Option<String>,
    pub total: f64,
    pub count: i64,
}

/// Groups expense rows by category. Categories with no rows in the window
/// are omitted entirely rather than zero-filled.
pub(crate) fn expense_totals_by_category(rows: &[LedgerRow]) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<String, CategoryTotal> = BTreeMap::new();

    for row in rows {
        if row.kind != TxnKind::Expense {
            continue;
        }

        let entry = groups
            .entry(row.category_id.clone())
            .or_insert_with(|| CategoryTotal {
                category_id: row.category_id.clone(),
                category_name: row.category_name.clone(),
                category_icon: row.category_icon.clone(),
                category_color: row.category_color.clone(),
                total: 0.0,
                count: 0,
            });
        entry.total += row.amount;
        entry.count += 1;
    }

    groups.into_values().collect()
}

/// Expense composition of a window: one row per spending category, with its
/// share of the window's total expense. Shares sum to 100 whenever the
/// window has any expense at all; an expense-free window yields an empty
/// list.
pub fn breakdown_by_category(rows: &[LedgerRow]) -> Vec<CategoryBreakdown> {
    let totals = expense_totals_by_category(rows);
    let window_expense: f64 = totals.iter().map(|group| group.total).sum();

    let mut breakdown = totals
        .into_iter()
        .map(|group| CategoryBreakdown {
            percentage: if window_expense > 0.0 {
                (group.total / window_expense) * 100.0
            } else {
                0.0
            },
            category_id: group.category_id,
            category_name: group.category_name,
            category_icon: group.category_icon,
            category_color: group.category_color,
            total: group.total,
            count: group.count,
        })
        .collect::<Vec<CategoryBreakdown>>();

    breakdown.sort_by(|left, right| {
        right
            .total
            .total_cmp(&left.total)
            .then_with(|| left.category_name.cmp(&right.category_name))
    });
    breakdown
}

/// Buckets rows by calendar month, chronologically ascending. Sparse:
/// months with no transactions produce no row, so chart callers that need a
/// dense series must fill gaps themselves.
pub fn monthly_trends(rows: &[LedgerRow]) -> Vec<MonthlyTrend> {
    use chrono::Datelike;

    let mut buckets: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();

    for row in rows {
        let key = (row.occurred_on.year(), row.occurred_on.month());
        let bucket = buckets.entry(key).or_insert((0.0, 0.0));
        match row.kind {
            TxnKind::Income => bucket.0 += row.amount,
            TxnKind::Expense => bucket.1 += row.amount,
        }
    }

    buckets
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlyTrend {
            month: month_abbreviation(month).to_string(),
            year,
            total_income: income,
            total_expense: expense,
            net_balance: income - expense,
        })
        .collect()
}

fn month_abbreviation(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{breakdown_by_category, monthly_trends, summarize};
    use crate::store::rows::{LedgerRow, TxnKind};

    fn row(category_id: &str, kind: TxnKind, amount: f64, occurred_on: &str) -> LedgerRow {
        let parsed = NaiveDate::parse_from_str(occurred_on, "%Y-%m-%d")
            .ok()
            .unwrap_or(NaiveDate::MIN);
        LedgerRow {
            txn_id: format!("txn_{category_id}_{occurred_on}_{amount}"),
            owner_id: "local".to_string(),
            category_id: category_id.to_string(),
            category_name: category_id.to_uppercase(),
            category_icon: None,
            category_color: None,
            amount,
            kind,
            occurred_on: parsed,
            name: "fixture".to_string(),
            note: None,
        }
    }

    #[test]
    fn summary_balance_is_income_minus_expense() {
        let rows = vec![
            row("cat_salary", TxnKind::Income, 2_500.0, "2026-08-01"),
            row("cat_food", TxnKind::Expense, 600.0, "2026-08-02"),
            row("cat_bills", TxnKind::Expense, 400.0, "2026-08-03"),
        ];

        let summary = summarize(&rows);
        assert!((summary.total_income - 2_500.0).abs() < f64::EPSILON);
        assert!((summary.total_expense - 1_000.0).abs() < f64::EPSILON);
        assert!((summary.total_balance - 1_500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_of_empty_window_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expense, 0.0);
        assert_eq!(summary.total_balance, 0.0);
    }

    #[test]
    fn breakdown_splits_600_400_into_60_40() {
        let rows = vec![
            row("cat_food", TxnKind::Expense, 600.0, "2026-08-02"),
            row("cat_transport", TxnKind::Expense, 400.0, "2026-08-03"),
        ];

        let breakdown = breakdown_by_category(&rows);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category_id, "cat_food".to_string());
        assert!((breakdown[0].percentage - 60.0).abs() < 0.001);
        assert!((breakdown[1].percentage - 40.0).abs() < 0.001);

        let percentage_sum: f64 = breakdown.iter().map(|entry| entry.percentage).sum();
        assert!((percentage_sum - 100.0).abs() < 0.1);
    }

    #[test]
    fn breakdown_ignores_income_rows_and_handles_empty_window() {
        let rows = vec![row("cat_salary", TxnKind::Income, 2_500.0, "2026-08-01")];
        assert!(breakdown_by_category(&rows).is_empty());
        assert!(breakdown_by_category(&[]).is_empty());
    }

    #[test]
    fn breakdown_sorts_descending_by_total() {
        let rows = vec![
            row("cat_small", TxnKind::Expense, 10.0, "2026-08-01"),
            row("cat_large", TxnKind::Expense, 900.0, "2026-08-01"),
            row("cat_mid", TxnKind::Expense, 90.0, "2026-08-01"),
        ];

        let breakdown = breakdown_by_category(&rows);
        let ids = breakdown
            .iter()
            .map(|entry| entry.category_id.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(ids, vec!["cat_large", "cat_mid", "cat_small"]);
    }

    #[test]
    fn monthly_trends_are_sparse_and_chronological() {
        let rows = vec![
            row("cat_food", TxnKind::Expense, 100.0, "2026-08-02"),
            row("cat_salary", TxnKind::Income, 900.0, "2026-06-15"),
            row("cat_food", TxnKind::Expense, 50.0, "2026-06-20"),
            row("cat_food", TxnKind::Expense, 75.0, "2025-12-31"),
        ];

        let trends = monthly_trends(&rows);
        assert_eq!(trends.len(), 3);

        assert_eq!(trends[0].month, "Dec".to_string());
        assert_eq!(trends[0].year, 2025);

        assert_eq!(trends[1].month, "Jun".to_string());
        assert_eq!(trends[1].year, 2026);
        assert!((trends[1].net_balance - 850.0).abs() < f64::EPSILON);

        assert_eq!(trends[2].month, "Aug".to_string());
        assert_eq!(trends[2].year, 2026);
    }
}
