//! Parking cost by month

use crate::lease::{clamp_non_negative, ParkingSchedule};

/// Monthly parking cost summed across slots
///
/// A slot is free while `month < abatement_months`; afterwards it costs
/// `cost * count * (1 + escalation)^(month / 12)`. The schedule's sales tax,
/// when present, is applied as a flat multiplier.
pub fn build_parking(term_months: usize, schedule: &ParkingSchedule) -> Vec<f64> {
    let escalation = clamp_non_negative(schedule.annual_escalation);
    let tax_multiplier = 1.0 + clamp_non_negative(schedule.sales_tax.unwrap_or(0.0));

    (0..term_months)
        .map(|month| {
            let growth = (1.0 + escalation).powi((month / 12) as i32);
            let base: f64 = schedule
                .slots
                .iter()
                .filter(|slot| month as i64 >= slot.abatement_months.unwrap_or(0))
                .map(|slot| {
                    clamp_non_negative(slot.cost_per_month) * clamp_non_negative(slot.count) * growth
                })
                .sum();
            base * tax_multiplier
        })
        .collect()
}

/// Undiscounted first-year parking cost before abatement, tax included
pub fn annual_parking_cost(schedule: &ParkingSchedule) -> f64 {
    let monthly: f64 = schedule
        .slots
        .iter()
        .map(|slot| clamp_non_negative(slot.cost_per_month) * clamp_non_negative(slot.count))
        .sum();
    monthly * 12.0 * (1.0 + clamp_non_negative(schedule.sales_tax.unwrap_or(0.0)))
}
