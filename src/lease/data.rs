//! Canonical lease record consumed by the cash-flow engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::parse_date;

/// Lease-type tag controlling how operating expenses are recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseType {
    /// Triple net: tenant pays its full share of operating expenses
    #[default]
    Nnn,
    /// Expenses bundled into rent
    FullService,
    /// Tenant pays only the excess over a base-year level
    BaseYear,
    /// Tenant pays only the excess over a fixed stop
    ExpenseStop,
    /// Partially bundled; treated like NNN for the expense series
    ModifiedGross,
}

impl LeaseType {
    /// Whether the base-year rate is deducted from each year's expense rate
    pub fn uses_base_year_offset(&self) -> bool {
        matches!(self, LeaseType::BaseYear | LeaseType::ExpenseStop)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaseType::Nnn => "nnn",
            LeaseType::FullService => "full_service",
            LeaseType::BaseYear => "base_year",
            LeaseType::ExpenseStop => "expense_stop",
            LeaseType::ModifiedGross => "modified_gross",
        }
    }
}

/// Premises being leased
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Premises {
    pub name: String,
    /// Rentable area in square feet
    pub rsf: f64,
    pub lease_type: LeaseType,
}

/// Lease term: length in months plus optional calendar anchors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaseTerm {
    pub months: i64,
    /// `YYYY-MM-DD`
    pub commencement: Option<String>,
    /// `YYYY-MM-DD`, inclusive last day of the lease
    pub expiration: Option<String>,
}

/// One row of the rent table; months are 0-indexed and inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentStep {
    pub start_month: i64,
    pub end_month: i64,
    /// Annual rent per square foot
    pub rate_psf_yr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbatementType {
    #[default]
    Full,
    Partial,
}

/// What an abatement suppresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbatementScope {
    /// Base rent only
    #[default]
    BaseRent,
    /// Base rent, operating expense and parking
    Gross,
}

/// Free-rent period
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Abatement {
    pub start_month: i64,
    pub months: i64,
    #[serde(rename = "type")]
    pub kind: AbatementType,
    /// Fraction of rent forgiven when `kind` is partial (0.5 = half rent)
    pub partial_rate: f64,
    pub scope: AbatementScope,
}

impl Abatement {
    /// Half-open month range `[start, end)` affected by the abatement, clipped to the term
    pub fn month_range(&self, term_months: usize) -> std::ops::Range<usize> {
        let start = self.start_month.max(0) as usize;
        let len = self.months.max(0) as usize;
        let start = start.min(term_months);
        let end = start.saturating_add(len).min(term_months);
        start..end
    }

    /// Multiplier applied to abated months (0 for full, `1 - partialRate` for partial)
    pub fn rent_factor(&self) -> f64 {
        match self.kind {
            AbatementType::Full => 0.0,
            AbatementType::Partial => {
                let rate = if self.partial_rate.is_finite() { self.partial_rate } else { 0.0 };
                1.0 - rate.clamp(0.0, 1.0)
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RentSchedule {
    pub steps: Vec<RentStep>,
    pub abatement: Option<Abatement>,
}

/// Occupied-area override for a month range (0-indexed, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseInStep {
    pub start_month: i64,
    pub end_month: i64,
    pub rsf: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhaseInSchedule {
    pub steps: Vec<PhaseInStep>,
}

/// Operating expense terms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseSchedule {
    pub lease_type: LeaseType,
    /// Operating expense per square foot per year in lease year 1
    pub base_opex_psf_yr: f64,
    /// Base-year (or stop) rate deducted for base-year / expense-stop leases
    pub base_year_opex_psf_yr: Option<f64>,
    /// Annual compounding escalation (0.03 = 3%)
    pub annual_escalation: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParkingSlot {
    pub name: String,
    pub count: f64,
    /// Monthly cost per space
    pub cost_per_month: f64,
    /// Free months from commencement
    pub abatement_months: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParkingSchedule {
    pub slots: Vec<ParkingSlot>,
    pub annual_escalation: f64,
    /// Flat sales tax applied on top of parking cost (0.0825 = 8.25%)
    pub sales_tax: Option<f64>,
}

/// Tenant-improvement terms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TiSchedule {
    pub budget_total: f64,
    /// Landlord-funded allowance, credited in month 0
    pub allowance: f64,
    /// Tenant-funded shortfall; derived from budget and allowance when absent
    pub out_of_pocket: Option<f64>,
    pub amortize_oop: bool,
    pub amortization_rate: f64,
    pub amortization_term_months: i64,
}

impl TiSchedule {
    pub fn out_of_pocket(&self) -> f64 {
        let oop = self
            .out_of_pocket
            .unwrap_or(self.budget_total - self.allowance);
        if oop.is_finite() { oop.max(0.0) } else { 0.0 }
    }

    pub fn allowance(&self) -> f64 {
        if self.allowance.is_finite() { self.allowance.max(0.0) } else { 0.0 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OneTimeCost {
    pub name: String,
    pub amount: f64,
    pub month: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OtherCashFlows {
    pub one_time_costs: Vec<OneTimeCost>,
    pub misc_monthly: Option<f64>,
    /// Charged in month 0
    pub broker_fee: f64,
    /// Deposit size in months of first-month rent; refunded in the final month
    pub security_deposit_months: f64,
}

/// Longest term the engine will expand into monthly rows (100 years)
pub const MAX_TERM_MONTHS: i64 = 1_200;

/// One lease scenario (an existing lease, a renewal offer, a relocation proposal...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaseScenario {
    pub id: String,
    pub name: String,
    /// Scenario-specific annual discount rate; falls back to the engine config
    pub discount_rate: Option<f64>,
    pub premises: Premises,
    pub term: LeaseTerm,
    pub rent_schedule: RentSchedule,
    pub phase_in: Option<PhaseInSchedule>,
    pub expenses: ExpenseSchedule,
    pub parking: ParkingSchedule,
    pub ti: TiSchedule,
    pub other_cash_flows: OtherCashFlows,
    pub notes: String,
}

impl LeaseScenario {
    /// Bare scenario with a flat area and term, no rent or costs
    pub fn new(id: impl Into<String>, name: impl Into<String>, rsf: f64, term_months: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            premises: Premises { rsf, ..Default::default() },
            term: LeaseTerm { months: term_months, ..Default::default() },
            ..Default::default()
        }
    }

    /// Term length clamped to `[0, MAX_TERM_MONTHS]`
    pub fn term_months(&self) -> usize {
        self.term.months.clamp(0, MAX_TERM_MONTHS) as usize
    }

    /// Rentable area with negative or non-finite values clamped to zero
    pub fn rsf(&self) -> f64 {
        clamp_non_negative(self.premises.rsf)
    }

    pub fn commencement_date(&self) -> Option<NaiveDate> {
        self.term.commencement.as_deref().and_then(parse_date)
    }

    pub fn expiration_date(&self) -> Option<NaiveDate> {
        self.term.expiration.as_deref().and_then(parse_date)
    }
}

/// Clamp a multiplier to `[0, inf)`, mapping NaN and infinities to zero
pub(crate) fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_record() {
        let json = r#"{
            "id": "renewal",
            "name": "Renewal offer",
            "discountRate": 0.07,
            "premises": { "name": "Suite 400", "rsf": 12500, "leaseType": "base_year" },
            "term": { "months": 60, "commencement": "2026-01-01", "expiration": "2030-12-31" },
            "rentSchedule": {
                "steps": [{ "startMonth": 0, "endMonth": 59, "ratePsfYr": 42.5 }],
                "abatement": { "startMonth": 0, "months": 3, "type": "partial", "partialRate": 0.5, "scope": "gross" }
            },
            "expenses": { "leaseType": "base_year", "baseOpexPsfYr": 14.0, "baseYearOpexPsfYr": 14.0, "annualEscalation": 0.03 },
            "ti": { "budgetTotal": 500000, "allowance": 400000, "amortizeOop": true, "amortizationRate": 0.08, "amortizationTermMonths": 60 }
        }"#;

        let scenario: LeaseScenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.term_months(), 60);
        assert_eq!(scenario.premises.lease_type, LeaseType::BaseYear);
        assert_eq!(scenario.rent_schedule.steps.len(), 1);

        let abatement = scenario.rent_schedule.abatement.unwrap();
        assert_eq!(abatement.kind, AbatementType::Partial);
        assert_eq!(abatement.scope, AbatementScope::Gross);
        assert!((abatement.rent_factor() - 0.5).abs() < 1e-12);

        assert!((scenario.ti.out_of_pocket() - 100_000.0).abs() < 1e-9);
        assert_eq!(scenario.commencement_date(), NaiveDate::from_ymd_opt(2026, 1, 1));
        assert!(scenario.parking.slots.is_empty());
    }

    #[test]
    fn test_negative_inputs_are_clamped() {
        let mut scenario = LeaseScenario::new("a", "A", -500.0, -12);
        scenario.ti.budget_total = 10.0;
        scenario.ti.allowance = 50.0;

        assert_eq!(scenario.term_months(), 0);
        assert_eq!(scenario.rsf(), 0.0);
        assert_eq!(scenario.ti.out_of_pocket(), 0.0);
    }

    #[test]
    fn test_abatement_range_is_clipped_to_term() {
        let abatement = Abatement { start_month: 10, months: 6, ..Default::default() };
        assert_eq!(abatement.month_range(12), 10..12);
        assert_eq!(abatement.month_range(5), 5..5);

        let negative = Abatement { start_month: -2, months: -3, ..Default::default() };
        assert!(negative.month_range(12).is_empty());
    }

    #[test]
    fn test_oversized_term_is_capped() {
        let scenario = LeaseScenario::new("s", "S", 1_000.0, 10_000_000_000_000);
        assert_eq!(scenario.term_months(), MAX_TERM_MONTHS as usize);
        assert_eq!(LeaseScenario::new("s", "S", 1_000.0, -5).term_months(), 0);
    }

    #[test]
    fn test_unparsable_dates_are_absent() {
        let mut scenario = LeaseScenario::new("a", "A", 1000.0, 12);
        scenario.term.commencement = Some("Jan 1st".to_string());
        assert!(scenario.commencement_date().is_none());
        assert!(scenario.expiration_date().is_none());
    }
}
