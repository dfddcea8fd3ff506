//! Base rent by month
//!
//! Rent steps are expanded first; abatement is applied afterwards to the
//! finished table. Any gross-scope suppression of expenses and parking is
//! left to the monthly aggregator.

use crate::lease::{clamp_non_negative, Abatement, RentStep};

/// Rent before abatement: `(annual rate / 12) * occupied area` for every month a step covers
///
/// Steps are applied in list order, so a later step overwrites an earlier
/// one on shared months. Uncovered months stay at zero.
pub fn scheduled_rent(term_months: usize, steps: &[RentStep], area: &[f64]) -> Vec<f64> {
    let mut rent = vec![0.0; term_months];
    if term_months == 0 {
        return rent;
    }

    for step in steps {
        let start = step.start_month.max(0);
        let end = step.end_month.min(term_months as i64 - 1);
        if start > end {
            continue;
        }
        let monthly_rate = clamp_non_negative(step.rate_psf_yr) / 12.0;
        for month in start as usize..=end as usize {
            let occupied = area.get(month).copied().unwrap_or(0.0);
            rent[month] = monthly_rate * occupied;
        }
    }

    rent
}

/// Apply an abatement to a finished rent table
pub fn apply_abatement(scheduled: &[f64], abatement: Option<&Abatement>) -> Vec<f64> {
    let mut rent = scheduled.to_vec();
    if let Some(abatement) = abatement {
        let factor = abatement.rent_factor();
        for month in abatement.month_range(rent.len()) {
            rent[month] *= factor;
        }
    }
    rent
}

/// Base rent after abatement
pub fn build_rent(
    term_months: usize,
    steps: &[RentStep],
    abatement: Option<&Abatement>,
    area: &[f64],
) -> Vec<f64> {
    apply_abatement(&scheduled_rent(term_months, steps, area), abatement)
}

/// Annual rate of the step in force at month 0, else the first listed step
pub fn first_period_rate(steps: &[RentStep]) -> f64 {
    steps
        .iter()
        .rev()
        .find(|s| s.start_month <= 0 && s.end_month >= 0)
        .or_else(|| steps.first())
        .map(|s| clamp_non_negative(s.rate_psf_yr))
        .unwrap_or(0.0)
}

/// Implied annual rent escalation between the first two distinct step rates
pub fn implied_escalation(steps: &[RentStep]) -> f64 {
    let mut ordered: Vec<&RentStep> = steps.iter().collect();
    ordered.sort_by_key(|s| s.start_month);

    let first = match ordered.first() {
        Some(step) => clamp_non_negative(step.rate_psf_yr),
        None => return 0.0,
    };
    let next = ordered
        .iter()
        .map(|s| clamp_non_negative(s.rate_psf_yr))
        .find(|&rate| (rate - first).abs() > 1e-12);

    match next {
        Some(rate) if first > 0.0 => rate / first - 1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lease::{AbatementScope, AbatementType};

    fn step(start: i64, end: i64, rate: f64) -> RentStep {
        RentStep { start_month: start, end_month: end, rate_psf_yr: rate }
    }

    #[test]
    fn test_flat_rent() {
        let area = vec![10_000.0; 60];
        let rent = build_rent(60, &[step(0, 59, 30.0)], None, &area);
        assert_eq!(rent.len(), 60);
        assert!((rent[0] - 25_000.0).abs() < 1e-9);
        assert!((rent[59] - 25_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_later_step_wins_and_gaps_are_zero() {
        let area = vec![1_200.0; 24];
        let rent = scheduled_rent(24, &[step(0, 12, 10.0), step(10, 15, 20.0)], &area);

        assert!((rent[9] - 1_000.0).abs() < 1e-9);
        assert!((rent[10] - 2_000.0).abs() < 1e-9);
        assert!((rent[15] - 2_000.0).abs() < 1e-9);
        assert_eq!(rent[16], 0.0);
    }

    #[test]
    fn test_steps_are_clipped_to_term() {
        let area = vec![1_200.0; 12];
        let rent = scheduled_rent(12, &[step(-5, 100, 10.0)], &area);
        assert_eq!(rent.len(), 12);
        assert!(rent.iter().all(|&r| (r - 1_000.0).abs() < 1e-9));
    }

    #[test]
    fn test_full_and_partial_abatement() {
        let area = vec![1_200.0; 12];
        let steps = [step(0, 11, 10.0)];

        let full = Abatement { start_month: 0, months: 3, ..Default::default() };
        let rent = build_rent(12, &steps, Some(&full), &area);
        assert_eq!(&rent[0..3], &[0.0, 0.0, 0.0]);
        assert!((rent[3] - 1_000.0).abs() < 1e-9);

        let partial = Abatement {
            start_month: 2,
            months: 2,
            kind: AbatementType::Partial,
            partial_rate: 0.25,
            scope: AbatementScope::Gross,
        };
        let rent = build_rent(12, &steps, Some(&partial), &area);
        assert!((rent[1] - 1_000.0).abs() < 1e-9);
        assert!((rent[2] - 750.0).abs() < 1e-9);
        assert!((rent[3] - 750.0).abs() < 1e-9);
        assert!((rent[4] - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_month_abatement_is_a_no_op() {
        let area = vec![1_000.0; 12];
        let steps = [step(0, 11, 24.0)];
        let none = build_rent(12, &steps, None, &area);
        let zero = Abatement { start_month: 0, months: 0, ..Default::default() };
        assert_eq!(build_rent(12, &steps, Some(&zero), &area), none);
    }

    #[test]
    fn test_first_period_rate_and_escalation() {
        let steps = [step(12, 23, 31.5), step(0, 11, 30.0), step(24, 35, 32.4)];
        assert_eq!(first_period_rate(&steps), 30.0);
        assert!((implied_escalation(&steps) - 0.05).abs() < 1e-12);

        assert_eq!(first_period_rate(&[]), 0.0);
        assert_eq!(implied_escalation(&[step(0, 59, 30.0)]), 0.0);
    }
}
