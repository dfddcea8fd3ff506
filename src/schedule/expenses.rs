//! Operating expense by month

use crate::lease::{clamp_non_negative, ExpenseSchedule, LeaseType};

/// Per-square-foot annual expense rate chargeable in lease year `year` (0-based)
///
/// The base rate compounds at the annual escalation. Base-year and
/// expense-stop leases charge only the excess over the base-year rate.
pub fn chargeable_rate(schedule: &ExpenseSchedule, year: u32) -> f64 {
    if schedule.lease_type == LeaseType::FullService {
        return 0.0;
    }

    let base = clamp_non_negative(schedule.base_opex_psf_yr);
    let escalation = clamp_non_negative(schedule.annual_escalation);
    let year_rate = base * (1.0 + escalation).powi(year as i32);

    if schedule.lease_type.uses_base_year_offset() {
        let offset = clamp_non_negative(schedule.base_year_opex_psf_yr.unwrap_or(0.0));
        (year_rate - offset).max(0.0)
    } else {
        year_rate
    }
}

/// Monthly operating expense: `(chargeable rate / 12) * occupied area`
pub fn build_opex(term_months: usize, schedule: &ExpenseSchedule, area: &[f64]) -> Vec<f64> {
    (0..term_months)
        .map(|month| {
            let rate = chargeable_rate(schedule, (month / 12) as u32);
            rate / 12.0 * area.get(month).copied().unwrap_or(0.0)
        })
        .collect()
}
