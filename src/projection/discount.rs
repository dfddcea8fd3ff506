//! Discount-rate resolution and monthly discounting
//!
//! Annual rates are converted to an equivalent monthly compounding rate,
//! `(1 + annual)^(1/12) - 1`, and month `m` is discounted by `(1 + r)^m`.

use serde::{Deserialize, Serialize};

/// Annual discount rate used when neither the scenario nor the caller supplies one
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.08;

/// Pick the annual discount rate: scenario override, then the caller's global rate, then the default
///
/// Non-finite candidates are skipped; the chosen rate is clamped at zero.
pub fn resolve_discount_rate(scenario_rate: Option<f64>, global_rate: Option<f64>) -> f64 {
    scenario_rate
        .filter(|r| r.is_finite())
        .or_else(|| global_rate.filter(|r| r.is_finite()))
        .unwrap_or(DEFAULT_DISCOUNT_RATE)
        .max(0.0)
}

/// A single annual discount rate with its monthly equivalent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountRate {
    pub annual: f64,
    pub monthly: f64,
}

impl DiscountRate {
    pub fn new(annual: f64) -> Self {
        let annual = if annual.is_finite() { annual.max(0.0) } else { 0.0 };
        Self {
            annual,
            monthly: (1.0 + annual).powf(1.0 / 12.0) - 1.0,
        }
    }

    /// Discount factor for month `month` (month 0 is undiscounted)
    pub fn factor(&self, month: usize) -> f64 {
        let factor = (1.0 + self.monthly).powi(month as i32).recip();
        if factor.is_finite() { factor } else { 0.0 }
    }

    pub fn present_value(&self, amount: f64, month: usize) -> f64 {
        amount * self.factor(month)
    }

    /// Present value of a stream whose first entry falls at month 0
    pub fn pv_stream(&self, amounts: &[f64]) -> f64 {
        amounts
            .iter()
            .enumerate()
            .map(|(month, &amount)| self.present_value(amount, month))
            .sum()
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        Self::new(DEFAULT_DISCOUNT_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resolution_order() {
        assert_eq!(resolve_discount_rate(Some(0.05), Some(0.07)), 0.05);
        assert_eq!(resolve_discount_rate(None, Some(0.07)), 0.07);
        assert_eq!(resolve_discount_rate(None, None), DEFAULT_DISCOUNT_RATE);
        assert_eq!(resolve_discount_rate(Some(f64::NAN), Some(0.07)), 0.07);
        assert_eq!(resolve_discount_rate(Some(-0.02), None), 0.0);
    }

    #[test]
    fn test_monthly_rate_compounds_to_annual() {
        let rate = DiscountRate::new(0.08);
        assert_relative_eq!((1.0 + rate.monthly).powi(12), 1.08, max_relative = 1e-12);
        assert_relative_eq!(rate.factor(12), 1.0 / 1.08, max_relative = 1e-12);
        assert_eq!(rate.factor(0), 1.0);
    }

    #[test]
    fn test_zero_rate_is_undiscounted() {
        let rate = DiscountRate::new(0.0);
        assert_eq!(rate.monthly, 0.0);
        assert_eq!(rate.pv_stream(&[100.0, 200.0, 300.0]), 600.0);
    }

    #[test]
    fn test_pv_stream_of_annual_payments() {
        let rate = DiscountRate::new(0.10);
        let mut flows = vec![0.0; 25];
        flows[12] = 110.0;
        flows[24] = 121.0;
        assert_relative_eq!(rate.pv_stream(&flows), 200.0, max_relative = 1e-10);
    }
}
