use chrono::{Datelike, NaiveDate};

use crate::analytics::policy::AnalyticsPolicy;
use crate::analytics::range::days_in_month;
use crate::analytics::types::SpendingForecast;

/// Month-end spending forecast: straight-line extrapolation of the month's
/// daily average, no seasonality and no day-of-week weighting.
///
/// Returns `None` until enough of the month has elapsed to carry any
/// signal; an absent forecast is a valid outcome, not an error.
pub fn spending_forecast(
    month_income: f64,
    month_expense: f64,
    today: NaiveDate,
    policy: AnalyticsPolicy,
) -> Option<SpendingForecast> {
    let days_passed = today.day();
    if !policy.has_forecast_signal(days_passed) {
        return None;
    }

    let month_length = days_in_month(today.year(), today.month());
    let daily_average = month_expense / f64::from(days_passed);
    let projected_end_of_month = daily_average * f64::from(month_length);
    let projected_balance = month_income - projected_end_of_month;

    Some(SpendingForecast {
        current_month_spent: month_expense,
        days_in_month: month_length,
        days_passed,
        daily_average,
        projected_end_of_month,
        projected_balance,
        confidence: policy.confidence_for(days_passed),
        warning: projected_balance < 0.0,
    })
}
