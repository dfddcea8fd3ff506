//! Cash-flow output structures for a lease projection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::metrics::OptionMetrics;

/// One month of lease cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRow {
    /// Lease month, 0-indexed from commencement
    pub month: usize,
    /// First day of the month's calendar period, when commencement is known
    pub period_start: Option<NaiveDate>,
    pub occupied_area: f64,

    pub base_rent: f64,
    pub opex: f64,
    pub parking: f64,
    pub ti_amortization: f64,
    pub misc: f64,

    /// Sum of the categories above, less the TI allowance in month 0
    pub total: f64,
    pub cumulative: f64,
    pub present_value: f64,
}

impl MonthlyRow {
    pub fn new(month: usize) -> Self {
        Self {
            month,
            period_start: None,
            occupied_area: 0.0,
            base_rent: 0.0,
            opex: 0.0,
            parking: 0.0,
            ti_amortization: 0.0,
            misc: 0.0,
            total: 0.0,
            cumulative: 0.0,
            present_value: 0.0,
        }
    }

    /// Sum of the cost categories before any allowance credit
    pub fn gross_cost(&self) -> f64 {
        self.base_rent + self.opex + self.parking + self.ti_amortization + self.misc
    }
}

/// Twelve-month bucket of monthly rows (the last bucket may be shorter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualRow {
    /// Lease year, 1-indexed
    pub year: usize,
    pub months: usize,
    pub base_rent: f64,
    pub opex: f64,
    pub parking: f64,
    pub ti_amortization: f64,
    pub misc: f64,
    pub total: f64,
    pub average_area: f64,
    /// `(total / months) * 12 / average area`
    pub effective_rate_psf_yr: f64,
}

/// Complete engine output for one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineResult {
    pub scenario_id: String,
    pub term_months: usize,
    pub monthly: Vec<MonthlyRow>,
    pub annual: Vec<AnnualRow>,
    pub metrics: OptionMetrics,
    /// Annual discount rate actually applied
    pub discount_rate: f64,
}

impl EngineResult {
    pub fn commencement_date(&self) -> Option<NaiveDate> {
        self.metrics.commencement.as_deref().and_then(crate::lease::calendar::parse_date)
    }

    pub fn expiration_date(&self) -> Option<NaiveDate> {
        self.metrics.expiration.as_deref().and_then(crate::lease::calendar::parse_date)
    }
}
