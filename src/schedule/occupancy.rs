//! Effective occupied area by month

use crate::lease::{clamp_non_negative, PhaseInSchedule};

/// Occupied area for each month of the term
///
/// Every month starts at `default_area`; each phase-in step then overwrites
/// the months it covers, later steps winning on overlap. Months no step
/// covers keep the default.
pub fn build_occupancy(
    default_area: f64,
    term_months: usize,
    phase_in: Option<&PhaseInSchedule>,
) -> Vec<f64> {
    let mut area = vec![clamp_non_negative(default_area); term_months];
    if term_months == 0 {
        return area;
    }

    if let Some(schedule) = phase_in {
        for step in &schedule.steps {
            let start = step.start_month.max(0);
            let end = step.end_month.min(term_months as i64 - 1);
            if start > end {
                continue;
            }
            let rsf = clamp_non_negative(step.rsf);
            for month in start as usize..=end as usize {
                area[month] = rsf;
            }
        }
    }

    area
}

/// Mean of a series, zero when empty
pub fn average_area(area: &[f64]) -> f64 {
    if area.is_empty() {
        0.0
    } else {
        area.iter().sum::<f64>() / area.len() as f64
    }
}
