//! Comparison window resolution and day-fraction clipping

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::lease::calendar::{add_months, days_between, month_period, overlap_days, parse_date};
use crate::projection::EngineResult;

/// Days per year used to annualize windowed totals
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Caller-supplied window, dates as `YYYY-MM-DD` (end inclusive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomWindow {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSource {
    /// Intersection of every scenario's term
    Natural,
    /// Explicit override from the caller
    Custom,
}

/// Resolved comparison window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonWindow {
    pub start: NaiveDate,
    /// Inclusive last day
    pub end: NaiveDate,
    pub days: i64,
    /// Sum of fractional calendar months spanned by the window
    pub months: f64,
    pub source: WindowSource,
}

impl ComparisonWindow {
    /// Build a window from inclusive bounds; `None` when empty
    pub fn new(start: NaiveDate, end: NaiveDate, source: WindowSource) -> Option<Self> {
        if start > end {
            return None;
        }
        let end_exclusive = end.succ_opt()?;
        Some(Self {
            start,
            end,
            days: days_between(start, end_exclusive),
            months: fractional_months(start, end_exclusive),
            source,
        })
    }

    pub fn from_custom(custom: &CustomWindow) -> Option<Self> {
        let start = parse_date(&custom.start)?;
        let end = parse_date(&custom.end)?;
        Self::new(start, end, WindowSource::Custom)
    }

    pub fn end_exclusive(&self) -> NaiveDate {
        self.end.succ_opt().unwrap_or(self.end)
    }

    /// Window length in years on a 365-day basis
    pub fn years(&self) -> f64 {
        self.days as f64 / DAYS_PER_YEAR
    }
}

/// Number of calendar months in `[start, end)`, counting partial months by day fraction
pub fn fractional_months(start: NaiveDate, end: NaiveDate) -> f64 {
    let mut months = 0.0;
    let mut k = 0u32;
    while let (Some(period_start), Some(period_end)) = (add_months(start, k), add_months(start, k + 1)) {
        if period_start >= end {
            break;
        }
        let period_days = days_between(period_start, period_end);
        if period_days > 0 {
            months += overlap_days(period_start, period_end, start, end) as f64 / period_days as f64;
        }
        k += 1;
    }
    months
}

/// `[max(commencement), min(expiration)]` across all results
///
/// `None` when there are no results, any date is missing or unparsable, or
/// the terms do not intersect.
pub fn natural_window(results: &[EngineResult]) -> Option<ComparisonWindow> {
    if results.is_empty() {
        return None;
    }

    let mut start: Option<NaiveDate> = None;
    let mut end: Option<NaiveDate> = None;
    for result in results {
        let (Some(commencement), Some(expiration)) = (result.commencement_date(), result.expiration_date()) else {
            log::warn!(
                "Scenario '{}' has no usable commencement/expiration dates; natural window unavailable",
                result.scenario_id
            );
            return None;
        };
        start = Some(start.map_or(commencement, |s| s.max(commencement)));
        end = Some(end.map_or(expiration, |e| e.min(expiration)));
    }

    ComparisonWindow::new(start?, end?, WindowSource::Natural)
}

/// One lease month restricted to the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClippedMonth {
    pub month: usize,
    pub period_days: i64,
    pub overlap_days: i64,
    /// `overlap_days / period_days`
    pub fraction: f64,
    pub occupied_area: f64,
    pub base_rent: f64,
    pub total: f64,
    /// Running sum of clipped totals from the window start
    pub cumulative: f64,
}

/// Clip every lease month of `result` to `window`
///
/// Months outside the window carry a zero fraction and zero amounts.
/// Returns `None` when the result has no usable commencement date.
pub fn clip_to_window(result: &EngineResult, window: &ComparisonWindow) -> Option<Vec<ClippedMonth>> {
    let commencement = result.commencement_date()?;
    let window_end = window.end_exclusive();
    let mut cumulative = 0.0;

    let clipped = result
        .monthly
        .iter()
        .map(|row| {
            let (period_days, overlap) = match month_period(commencement, row.month) {
                Some((start, end)) => (days_between(start, end), overlap_days(start, end, window.start, window_end)),
                None => (0, 0),
            };
            let fraction = if period_days > 0 && overlap > 0 {
                overlap as f64 / period_days as f64
            } else {
                0.0
            };
            let base_rent = if fraction > 0.0 { row.base_rent * fraction } else { 0.0 };
            let total = if fraction > 0.0 { row.total * fraction } else { 0.0 };
            cumulative += total;

            ClippedMonth {
                month: row.month,
                period_days,
                overlap_days: overlap,
                fraction,
                occupied_area: row.occupied_area,
                base_rent,
                total,
                cumulative,
            }
        })
        .collect();

    Some(clipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_window_days_and_months() {
        let window = ComparisonWindow::new(d(2026, 1, 1), d(2026, 12, 31), WindowSource::Custom).unwrap();
        assert_eq!(window.days, 365);
        assert!((window.months - 12.0).abs() < 1e-12);
        assert!((window.years() - 1.0).abs() < 1e-12);

        let half = ComparisonWindow::new(d(2026, 1, 1), d(2026, 1, 16), WindowSource::Custom).unwrap();
        assert_eq!(half.days, 16);
        assert!((half.months - 16.0 / 31.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_day_and_inverted_windows() {
        let one = ComparisonWindow::new(d(2026, 3, 1), d(2026, 3, 1), WindowSource::Natural).unwrap();
        assert_eq!(one.days, 1);
        assert!(ComparisonWindow::new(d(2026, 3, 2), d(2026, 3, 1), WindowSource::Natural).is_none());
    }

    #[test]
    fn test_custom_window_parsing() {
        let ok = CustomWindow { start: "2026-01-01".into(), end: "2026-06-30".into() };
        let window = ComparisonWindow::from_custom(&ok).unwrap();
        assert_eq!(window.source, WindowSource::Custom);
        assert_eq!(window.days, 181);

        let bad = CustomWindow { start: "soon".into(), end: "2026-06-30".into() };
        assert!(ComparisonWindow::from_custom(&bad).is_none());
    }
}
