//! Day-level calendar arithmetic
//!
//! All dates are `chrono::NaiveDate` (no timezone). Periods are half-open
//! `[start, end)` so that day counts are a plain subtraction.

use chrono::{Months, NaiveDate};

/// Wire format for dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string; anything else is treated as absent
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// Add whole calendar months, clamping the day to the end of short months
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Calendar period covered by lease month `index` (0-based), as `[start, end)`
pub fn month_period(commencement: NaiveDate, index: usize) -> Option<(NaiveDate, NaiveDate)> {
    let index = u32::try_from(index).ok()?;
    let start = add_months(commencement, index)?;
    let end = add_months(commencement, index.checked_add(1)?)?;
    Some((start, end))
}

/// Number of days in `[start, end)`; zero when the range is empty
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(0)
}

/// Days shared by two half-open ranges
pub fn overlap_days(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> i64 {
    days_between(a_start.max(b_start), a_end.min(b_end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-01-01"), Some(d(2026, 1, 1)));
        assert_eq!(parse_date(" 2026-02-28 "), Some(d(2026, 2, 28)));
        assert_eq!(parse_date("2026-02-30"), None);
        assert_eq!(parse_date("01/02/2026"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_month_period_handles_month_ends() {
        let (start, end) = month_period(d(2026, 1, 31), 1).unwrap();
        assert_eq!(start, d(2026, 2, 28));
        assert_eq!(end, d(2026, 3, 31));

        let (start, end) = month_period(d(2026, 1, 1), 0).unwrap();
        assert_eq!(days_between(start, end), 31);
    }

    #[test]
    fn test_overlap_days() {
        let days = overlap_days(d(2026, 1, 1), d(2026, 2, 1), d(2026, 1, 16), d(2026, 6, 1));
        assert_eq!(days, 16);

        let none = overlap_days(d(2026, 1, 1), d(2026, 2, 1), d(2026, 3, 1), d(2026, 4, 1));
        assert_eq!(none, 0);
    }
}
