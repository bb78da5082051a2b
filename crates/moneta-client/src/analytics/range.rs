use chrono::{Datelike, Duration, NaiveDate};

use crate::analytics::types::{DateWindow, TimeFilter};
use crate::{ClientError, ClientResult};

/// Resolves a coarse time filter to a concrete inclusive window ending at
/// `today`. The window never extends into the future: `end` is always the
/// injected "today", not the end of the calendar period.
pub fn resolve_window(filter: TimeFilter, today: NaiveDate) -> DateWindow {
    let start = match filter {
        TimeFilter::Day => today,
        TimeFilter::Week => {
            // ISO week, Monday first. Sunday resolves six days back.
            let days_from_monday = i64::from(today.weekday().num_days_from_monday());
            today - Duration::days(days_from_monday)
        }
        TimeFilter::Month => today.with_day(1).unwrap_or(today),
        TimeFilter::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
    };

    DateWindow { start, end: today }
}

/// The comparable previous window: identical day-count, ending exactly one
/// day before the current window starts. Shared by trend analysis and
/// period comparison so the two can never drift apart.
pub fn previous_window(current: &DateWindow) -> DateWindow {
    let length_days = (current.end - current.start).num_days();
    let prev_end = current.start - Duration::days(1);
    let prev_start = prev_end - Duration::days(length_days);
    DateWindow {
        start: prev_start,
        end: prev_end,
    }
}

/// Current calendar month up to and including `today`.
pub fn month_to_date(today: NaiveDate) -> DateWindow {
    DateWindow {
        start: today.with_day(1).unwrap_or(today),
        end: today,
    }
}

pub fn build_window(from: &str, to: &str, command: &str) -> ClientResult<DateWindow> {
    let start = parse_iso_date_strict(from, "from", command)?;
    let end = parse_iso_date_strict(to, "to", command)?;

    if start > end {
        return Err(ClientError::invalid_argument_for_command(
            "Invalid date range: `from` must be on or before `to`.",
            Some(command),
        ));
    }

    Ok(DateWindow { start, end })
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    if !looks_like_iso_date(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn add_months_clamped(date: NaiveDate, months: i32) -> NaiveDate {
    let current_month = i32::try_from(date.month()).unwrap_or(1);
    let mut raw_month = current_month + months;
    let mut year = date.year();

    while raw_month > 12 {
        raw_month -= 12;
        year += 1;
    }
    while raw_month < 1 {
        raw_month += 12;
        year -= 1;
    }

    let month_u32 = u32::try_from(raw_month).unwrap_or(1);
    let day = date.day().min(days_in_month(year, month_u32));
    if let Some(result) = NaiveDate::from_ymd_opt(year, month_u32, day) {
        return result;
    }
    date
}

pub fn parse_iso_date_strict(value: &str, field_name: &str, command: &str) -> ClientResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            Some(command),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with valid calendar values."),
            Some(command),
        )
    })
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
