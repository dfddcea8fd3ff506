//! Scalar summary of a projected lease

use serde::{Deserialize, Serialize};

use super::cashflows::MonthlyRow;
use crate::lease::{clamp_non_negative, LeaseScenario};
use crate::schedule::{annual_parking_cost, average_area, first_period_rate, implied_escalation};

/// Summary figures used to compare scenarios side by side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionMetrics {
    pub scenario_id: String,
    pub name: String,
    pub building_name: String,
    pub rsf: f64,
    pub lease_type: String,
    pub term_months: usize,
    pub commencement: Option<String>,
    pub expiration: Option<String>,

    pub base_rent_psf_yr: f64,
    pub rent_escalation: f64,
    pub opex_psf_yr: f64,
    pub opex_escalation: f64,
    pub parking_annual: f64,

    pub ti_budget: f64,
    pub ti_allowance: f64,
    pub ti_out_of_pocket: f64,

    pub avg_gross_rent_month: f64,
    pub avg_gross_rent_year: f64,
    pub avg_all_in_cost_month: f64,
    pub avg_all_in_cost_year: f64,
    pub avg_cost_psf_yr: f64,

    #[serde(rename = "npvAtDiscount")]
    pub npv: f64,
    pub discount_rate_used: f64,
    pub total_obligation: f64,
    /// Whole-term average cost per SF per year; window-equalized figures come
    /// from the comparison module
    pub equalized_avg_cost_psf_yr: f64,
    pub notes: String,
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}

/// Derive the summary from a scenario and its projected months
pub fn summarize(scenario: &LeaseScenario, monthly: &[MonthlyRow], discount_rate: f64) -> OptionMetrics {
    let term_months = monthly.len();
    let term_years = term_months as f64 / 12.0;

    let total_obligation: f64 = monthly.iter().map(|r| r.total).sum();
    let npv: f64 = monthly.iter().map(|r| r.present_value).sum();
    let total_base_rent: f64 = monthly.iter().map(|r| r.base_rent).sum();
    let area: Vec<f64> = monthly.iter().map(|r| r.occupied_area).collect();
    let mean_area = average_area(&area);

    let avg_all_in_cost_year = safe_div(total_obligation, term_years);
    let avg_cost_psf_yr = safe_div(avg_all_in_cost_year, mean_area);
    let avg_gross_rent_month = safe_div(total_base_rent, term_months as f64);

    OptionMetrics {
        scenario_id: scenario.id.clone(),
        name: scenario.name.clone(),
        building_name: scenario.premises.name.clone(),
        rsf: scenario.rsf(),
        lease_type: scenario.premises.lease_type.as_str().to_string(),
        term_months,
        commencement: scenario.term.commencement.clone(),
        expiration: scenario.term.expiration.clone(),
        base_rent_psf_yr: first_period_rate(&scenario.rent_schedule.steps),
        rent_escalation: implied_escalation(&scenario.rent_schedule.steps),
        opex_psf_yr: clamp_non_negative(scenario.expenses.base_opex_psf_yr),
        opex_escalation: clamp_non_negative(scenario.expenses.annual_escalation),
        parking_annual: annual_parking_cost(&scenario.parking),
        ti_budget: clamp_non_negative(scenario.ti.budget_total),
        ti_allowance: scenario.ti.allowance(),
        ti_out_of_pocket: scenario.ti.out_of_pocket(),
        avg_gross_rent_month,
        avg_gross_rent_year: avg_gross_rent_month * 12.0,
        avg_all_in_cost_month: safe_div(total_obligation, term_months as f64),
        avg_all_in_cost_year,
        avg_cost_psf_yr,
        npv,
        discount_rate_used: discount_rate,
        total_obligation,
        equalized_avg_cost_psf_yr: avg_cost_psf_yr,
        notes: scenario.notes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lease::RentStep;

    fn rows(term: usize, total: f64, area: f64) -> Vec<MonthlyRow> {
        (0..term)
            .map(|m| MonthlyRow {
                base_rent: total,
                total,
                present_value: total,
                occupied_area: area,
                ..MonthlyRow::new(m)
            })
            .collect()
    }

    #[test]
    fn test_averages() {
        let mut scenario = LeaseScenario::new("a", "A", 10_000.0, 24);
        scenario.rent_schedule.steps = vec![RentStep { start_month: 0, end_month: 23, rate_psf_yr: 30.0 }];
        let monthly = rows(24, 25_000.0, 10_000.0);
        let metrics = summarize(&scenario, &monthly, 0.08);

        assert!((metrics.total_obligation - 600_000.0).abs() < 1e-6);
        assert!((metrics.avg_all_in_cost_year - 300_000.0).abs() < 1e-6);
        assert!((metrics.avg_cost_psf_yr - 30.0).abs() < 1e-9);
        assert!((metrics.avg_gross_rent_year - 300_000.0).abs() < 1e-6);
        assert_eq!(metrics.equalized_avg_cost_psf_yr, metrics.avg_cost_psf_yr);
        assert_eq!(metrics.base_rent_psf_yr, 30.0);
        assert_eq!(metrics.discount_rate_used, 0.08);
    }

    #[test]
    fn test_zero_term_is_all_zero() {
        let scenario = LeaseScenario::new("a", "A", 10_000.0, 0);
        let metrics = summarize(&scenario, &[], 0.08);
        assert_eq!(metrics.total_obligation, 0.0);
        assert_eq!(metrics.avg_all_in_cost_year, 0.0);
        assert_eq!(metrics.avg_cost_psf_yr, 0.0);
        assert_eq!(metrics.avg_gross_rent_month, 0.0);
    }
}
