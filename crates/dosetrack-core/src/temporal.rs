//! Temporal utilities for the dosing-state engine.
//!
//! Everything here is a pure function of its arguments: callers inject the
//! current time rather than having the engine read the clock, so the same
//! snapshot always produces the same answer.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

/// True iff both timestamps fall on the same calendar date.
pub fn is_same_day<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Non-negative fractional hours elapsed between `then` and `now`.
///
/// A `then` in the future of `now` clamps to `0.0` rather than going
/// negative (clock skew between the backend and the host).
pub fn hours_since<Tz: TimeZone>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> f64 {
    let seconds = now.clone().signed_duration_since(then.clone()).num_seconds();
    if seconds <= 0 {
        0.0
    } else {
        seconds as f64 / 3600.0
    }
}

/// True iff `date` is strictly later than `now`'s calendar date.
pub fn is_future_date<Tz: TimeZone>(date: NaiveDate, now: &DateTime<Tz>) -> bool {
    date > now.date_naive()
}

/// Check if a year is a leap year (Gregorian 4/100/400 rule).
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in a given month and year.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// True iff `text` parses as a month number 1-12.
pub fn is_month_valid(text: &str) -> bool {
    matches!(text.trim().parse::<u32>(), Ok(m) if (1..=12).contains(&m))
}

/// True iff `day` is a real day-of-month for the given month and year.
///
/// Day validity depends on the month (and, for February, the year), so a
/// partial date cannot be judged valid in isolation.
pub fn is_day_valid(day: &str, month: &str, year: &str) -> bool {
    let (day, month, year) = match (
        day.trim().parse::<u32>(),
        month.trim().parse::<u32>(),
        year.trim().parse::<i32>(),
    ) {
        (Ok(d), Ok(m), Ok(y)) => (d, m, y),
        _ => return false,
    };
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(month, year)
}

/// True iff `text` parses as a plausible four-digit year.
///
/// With `allow_future` false the year must not be later than `now`'s year.
pub fn is_year_valid<Tz: TimeZone>(text: &str, allow_future: bool, now: &DateTime<Tz>) -> bool {
    match text.trim().parse::<i32>() {
        Ok(year) => year >= 1900 && (allow_future || year <= now.date_naive().year()),
        Err(_) => false,
    }
}

/// Outcome of interpreting a three-field split date (year/month/day strings).
#[derive(Debug, Clone, PartialEq)]
pub enum SplitDate {
    /// All three fields blank.
    Empty,
    /// Some but not all fields populated.
    Partial,
    /// All fields populated but not a real calendar date.
    Invalid,
    /// A real calendar date.
    Valid(NaiveDate),
}

/// Interpret three split-date fields as a single logical date.
///
/// Whitespace-only fields count as blank. Validity follows the Gregorian
/// calendar: 29 February parses only on leap years.
pub fn split_date(year: &str, month: &str, day: &str) -> SplitDate {
    let fields = [year.trim(), month.trim(), day.trim()];
    let populated = fields.iter().filter(|f| !f.is_empty()).count();
    match populated {
        0 => SplitDate::Empty,
        3 => {
            let parsed = (
                fields[0].parse::<i32>(),
                fields[1].parse::<u32>(),
                fields[2].parse::<u32>(),
            );
            match parsed {
                (Ok(y), Ok(m), Ok(d)) => match NaiveDate::from_ymd_opt(y, m, d) {
                    Some(date) => SplitDate::Valid(date),
                    None => SplitDate::Invalid,
                },
                _ => SplitDate::Invalid,
            }
        }
        _ => SplitDate::Partial,
    }
}
