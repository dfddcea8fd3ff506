//! Optional schedule pre-check
//!
//! The engine accepts inconsistent schedules as-is (later rent steps win on
//! overlap, uncovered months carry no rent). This pass reports those cases
//! to the caller without altering anything.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::calendar::{add_months, parse_date};
use super::{LeaseScenario, MAX_TERM_MONTHS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleWarning {
    /// Term longer than the engine projects; only the first `max` months are used
    TermTooLong { months: i64, max: i64 },
    NoRentSteps,
    /// Step whose start month is after its end month
    InvertedStep { index: usize },
    /// Step that does not touch any month of the term
    StepOutsideTerm { index: usize },
    /// Months covered by more than one step (inclusive range)
    OverlappingSteps { start_month: usize, end_month: usize },
    /// Months covered by no step (inclusive range)
    RentGap { start_month: usize, end_month: usize },
    AbatementOutsideTerm,
    UnparsableDate { field: String, value: String },
    /// Expiration differs from commencement + term - 1 day
    ExpirationMismatch { expected: String, actual: String },
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleWarning::TermTooLong { months, max } => {
                write!(f, "term of {} months exceeds {}; projection is cut at {}", months, max, max)
            }
            ScheduleWarning::NoRentSteps => write!(f, "rent schedule has no steps"),
            ScheduleWarning::InvertedStep { index } => {
                write!(f, "rent step {} starts after it ends", index)
            }
            ScheduleWarning::StepOutsideTerm { index } => {
                write!(f, "rent step {} lies entirely outside the term", index)
            }
            ScheduleWarning::OverlappingSteps { start_month, end_month } => write!(
                f,
                "months {}-{} are covered by more than one rent step (later step wins)",
                start_month, end_month
            ),
            ScheduleWarning::RentGap { start_month, end_month } => {
                write!(f, "months {}-{} have no rent step", start_month, end_month)
            }
            ScheduleWarning::AbatementOutsideTerm => {
                write!(f, "abatement does not fall within the term")
            }
            ScheduleWarning::UnparsableDate { field, value } => {
                write!(f, "{} '{}' is not a YYYY-MM-DD date", field, value)
            }
            ScheduleWarning::ExpirationMismatch { expected, actual } => write!(
                f,
                "expiration {} does not match commencement plus term ({})",
                actual, expected
            ),
        }
    }
}

/// Check a scenario for schedule inconsistencies the engine would silently accept
pub fn validate_scenario(scenario: &LeaseScenario) -> Vec<ScheduleWarning> {
    let mut warnings = Vec::new();
    let term = scenario.term_months();
    let steps = &scenario.rent_schedule.steps;

    if scenario.term.months > MAX_TERM_MONTHS {
        warnings.push(ScheduleWarning::TermTooLong {
            months: scenario.term.months,
            max: MAX_TERM_MONTHS,
        });
    }
    if steps.is_empty() {
        warnings.push(ScheduleWarning::NoRentSteps);
    }

    let mut coverage = vec![0u32; term];
    for (index, step) in steps.iter().enumerate() {
        if step.start_month > step.end_month {
            warnings.push(ScheduleWarning::InvertedStep { index });
            continue;
        }
        let start = step.start_month.max(0);
        let end = step.end_month.min(term as i64 - 1);
        if start > end {
            warnings.push(ScheduleWarning::StepOutsideTerm { index });
            continue;
        }
        for month in start as usize..=end as usize {
            coverage[month] += 1;
        }
    }

    if !steps.is_empty() {
        for (start_month, end_month) in runs(&coverage, |count| count > 1) {
            warnings.push(ScheduleWarning::OverlappingSteps { start_month, end_month });
        }
        for (start_month, end_month) in runs(&coverage, |count| count == 0) {
            warnings.push(ScheduleWarning::RentGap { start_month, end_month });
        }
    }

    if let Some(abatement) = &scenario.rent_schedule.abatement {
        if abatement.months > 0 && abatement.month_range(term).is_empty() {
            warnings.push(ScheduleWarning::AbatementOutsideTerm);
        }
    }

    check_dates(scenario, &mut warnings);

    for warning in &warnings {
        log::warn!("Scenario '{}': {}", scenario.id, warning);
    }

    warnings
}

fn check_dates(scenario: &LeaseScenario, warnings: &mut Vec<ScheduleWarning>) {
    let fields = [
        ("commencement", &scenario.term.commencement),
        ("expiration", &scenario.term.expiration),
    ];
    for (field, value) in fields {
        if let Some(text) = value {
            if parse_date(text).is_none() {
                warnings.push(ScheduleWarning::UnparsableDate {
                    field: field.to_string(),
                    value: text.clone(),
                });
            }
        }
    }

    let (Some(start), Some(actual)) = (scenario.commencement_date(), scenario.expiration_date())
    else {
        return;
    };
    let Ok(months) = u32::try_from(scenario.term_months()) else {
        return;
    };
    if let Some(expected) = add_months(start, months).map(|end| end - Duration::days(1)) {
        if expected != actual {
            warnings.push(ScheduleWarning::ExpirationMismatch {
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
    }
}

/// Inclusive index ranges of consecutive entries matching `pred`
fn runs(values: &[u32], pred: impl Fn(u32) -> bool) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut current: Option<usize> = None;
    for (i, &value) in values.iter().enumerate() {
        match (pred(value), current) {
            (true, None) => current = Some(i),
            (false, Some(start)) => {
                out.push((start, i - 1));
                current = None;
            }
            _ => {}
        }
    }
    if let Some(start) = current {
        out.push((start, values.len() - 1));
    }
    out
}
