use std::collections::BTreeMap;

use crate::analytics::aggregate::expense_totals_by_category;
use crate::analytics::policy::{AnalyticsPolicy, percent_change};
use crate::analytics::types::CategoryAnalysis;
use crate::store::rows::LedgerRow;

/// Per-category trend analysis: how current-window spending per category
/// compares against the adjacent previous window.
///
/// A category with no prior spend is reported as `stable` with a zero trend
/// percentage rather than as unbounded growth, and a category that only
/// appears in the previous window is absent from the result: the analysis
/// answers "how is my current spending trending", not "what disappeared".
pub fn analyze_category_trends(
    current_rows: &[LedgerRow],
    previous_rows: &[LedgerRow],
    policy: AnalyticsPolicy,
) -> Vec<CategoryAnalysis> {
    let current_totals = expense_totals_by_category(current_rows);
    let window_expense: f64 = current_totals.iter().map(|group| group.total).sum();

    let previous_totals: BTreeMap<String, f64> = expense_totals_by_category(previous_rows)
        .into_iter()
        .map(|group| (group.category_id, group.total))
        .collect();

    let mut analyses = current_totals
        .into_iter()
        .map(|group| {
            let previous_total = previous_totals.get(&group.category_id).copied().unwrap_or(0.0);
            let change_pct = percent_change(group.total, previous_total);

            CategoryAnalysis {
                percentage: if window_expense > 0.0 {
                    (group.total / window_expense) * 100.0
                } else {
                    0.0
                },
                trend: policy.classify_trend(change_pct),
                trend_percentage: change_pct.abs(),
                category_id: group.category_id,
                category_name: group.category_name,
                category_icon: group.category_icon,
                category_color: group.category_color,
                total: group.total,
                transaction_count: group.count,
            }
        })
        .collect::<Vec<CategoryAnalysis>>();

    analyses.sort_by(|left, right| {
        right
            .total
            .total_cmp(&left.total)
            .then_with(|| left.category_name.cmp(&right.category_name))
    });
    analyses
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::analyze_category_trends;
    use crate::analytics::policy::ANALYTICS_POLICY_V1;
    use crate::analytics::types::TrendDirection;
    use crate::store::rows::{LedgerRow, TxnKind};

    fn expense(category_id: &str, amount: f64, occurred_on: &str) -> LedgerRow {
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
            kind: TxnKind::Expense,
            occurred_on: parsed,
            name: "fixture".to_string(),
            note: None,
        }
    }

    #[test]
    fn rising_spend_beyond_threshold_classifies_up() {
        let current = vec![expense("cat_food", 150.0, "2026-08-02")];
        let previous = vec![expense("cat_food", 100.0, "2026-07-02")];

        let analyses = analyze_category_trends(&current, &previous, ANALYTICS_POLICY_V1);
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].trend, TrendDirection::Up);
        assert!((analyses[0].trend_percentage - 50.0).abs() < 0.001);
    }

    #[test]
    fn exact_threshold_change_stays_stable() {
        let current = vec![expense("cat_food", 105.0, "2026-08-02")];
        let previous = vec![expense("cat_food", 100.0, "2026-07-02")];

        let analyses = analyze_category_trends(&current, &previous, ANALYTICS_POLICY_V1);
        assert_eq!(analyses[0].trend, TrendDirection::Stable);
        assert!((analyses[0].trend_percentage - 5.0).abs() < 0.001);
    }

    #[test]
    fn falling_spend_beyond_threshold_classifies_down() {
        let current = vec![expense("cat_food", 94.99, "2026-08-02")];
        let previous = vec![expense("cat_food", 100.0, "2026-07-02")];

        let analyses = analyze_category_trends(&current, &previous, ANALYTICS_POLICY_V1);
        assert_eq!(analyses[0].trend, TrendDirection::Down);
        assert!((analyses[0].trend_percentage - 5.01).abs() < 0.001);
    }

    #[test]
    fn category_without_prior_spend_is_stable_not_infinite() {
        let current = vec![expense("cat_new", 500.0, "2026-08-02")];
        let previous: Vec<LedgerRow> = Vec::new();

        let analyses = analyze_category_trends(&current, &previous, ANALYTICS_POLICY_V1);
        assert_eq!(analyses[0].trend, TrendDirection::Stable);
        assert_eq!(analyses[0].trend_percentage, 0.0);
    }

    #[test]
    fn category_present_only_in_previous_window_is_absent() {
        let current = vec![expense("cat_food", 100.0, "2026-08-02")];
        let previous = vec![
            expense("cat_food", 100.0, "2026-07-02"),
            expense("cat_gone", 400.0, "2026-07-03"),
        ];

        let analyses = analyze_category_trends(&current, &previous, ANALYTICS_POLICY_V1);
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].category_id, "cat_food".to_string());
    }

    #[test]
    fn result_is_sorted_descending_by_current_total() {
        let current = vec![
            expense("cat_small", 10.0, "2026-08-01"),
            expense("cat_large", 800.0, "2026-08-01"),
            expense("cat_mid", 90.0, "2026-08-01"),
        ];

        let analyses = analyze_category_trends(&current, &[], ANALYTICS_POLICY_V1);
        let ids = analyses
            .iter()
            .map(|entry| entry.category_id.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(ids, vec!["cat_large", "cat_mid", "cat_small"]);
    }
}
