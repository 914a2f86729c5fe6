//! Calendar helpers for validation: ISO date parsing, integer ages and
//! year offsets.

use chrono::{Datelike, NaiveDate, Utc};

/// Parse an ISO `YYYY-MM-DD` date. Leading and trailing whitespace is
/// tolerated since the values come straight from form fields.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Whole years between `birth` and `today`, decremented by one when the
/// anniversary has not yet occurred this year. Exactly N years ago today
/// counts as N.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// The date `years` calendar years after (or before, when negative) the
/// given date. Feb 29 lands on Feb 28 in non-leap years.
pub fn years_from(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}
