//! Monthly aggregation of the per-category calculators

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::annual::roll_up;
use super::cashflows::{EngineResult, MonthlyRow};
use super::discount::{resolve_discount_rate, DiscountRate};
use super::metrics::summarize;
use crate::error::LeaseResult;
use crate::lease::calendar::month_period;
use crate::lease::{Abatement, AbatementScope, LeaseScenario, MAX_TERM_MONTHS};
use crate::schedule::{
    apply_abatement, build_amortization, build_misc, build_occupancy, build_opex, build_parking,
    scheduled_rent,
};

/// Configuration for a projection run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Global annual discount rate, used when a scenario has no override
    pub discount_rate: Option<f64>,
}

impl EngineConfig {
    pub fn with_discount_rate(rate: f64) -> Self {
        Self { discount_rate: Some(rate) }
    }

    /// Load a config from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> LeaseResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Annual discount rate that applies to `scenario`
    pub fn discount_rate_for(&self, scenario: &LeaseScenario) -> f64 {
        resolve_discount_rate(scenario.discount_rate, self.discount_rate)
    }
}

/// Per-category monthly series before aggregation
#[derive(Debug, Clone, Default)]
pub struct CategorySeries {
    pub area: Vec<f64>,
    pub base_rent: Vec<f64>,
    pub opex: Vec<f64>,
    pub parking: Vec<f64>,
    pub ti_amortization: Vec<f64>,
    pub misc: Vec<f64>,
}

impl CategorySeries {
    /// Run every calculator for a scenario
    ///
    /// The calculators are independent of one another; the security deposit
    /// is sized from the scheduled (pre-abatement) month-0 rent.
    pub fn from_scenario(scenario: &LeaseScenario) -> Self {
        let term = scenario.term_months();
        let area = build_occupancy(scenario.rsf(), term, scenario.phase_in.as_ref());
        let scheduled = scheduled_rent(term, &scenario.rent_schedule.steps, &area);
        let abatement = scenario.rent_schedule.abatement.as_ref();
        let first_month_rent = scheduled.first().copied().unwrap_or(0.0);

        Self {
            base_rent: apply_abatement(&scheduled, abatement),
            opex: build_opex(term, &scenario.expenses, &area),
            parking: build_parking(term, &scenario.parking),
            ti_amortization: build_amortization(term, &scenario.ti),
            misc: build_misc(term, &scenario.other_cash_flows, first_month_rent),
            area,
        }
    }

    /// Zero expenses and parking during a gross-scope abatement
    pub fn apply_gross_abatement(&mut self, abatement: Option<&Abatement>) {
        let Some(abatement) = abatement.filter(|a| a.scope == AbatementScope::Gross) else {
            return;
        };
        for month in abatement.month_range(self.opex.len()) {
            self.opex[month] = 0.0;
        }
        for month in abatement.month_range(self.parking.len()) {
            self.parking[month] = 0.0;
        }
    }
}

/// Main lease projection engine
#[derive(Debug, Clone, Default)]
pub struct LeaseEngine {
    config: EngineConfig,
}

impl LeaseEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full projection for one scenario
    pub fn project_scenario(&self, scenario: &LeaseScenario) -> EngineResult {
        let discount_rate = self.config.discount_rate_for(scenario);
        if scenario.term.months > MAX_TERM_MONTHS {
            log::warn!(
                "Scenario '{}' term of {} months cut to {}",
                scenario.id,
                scenario.term.months,
                MAX_TERM_MONTHS
            );
        }
        log::debug!(
            "Projecting scenario '{}' over {} months at {:.4} discount",
            scenario.id,
            scenario.term_months(),
            discount_rate
        );

        let mut series = CategorySeries::from_scenario(scenario);
        series.apply_gross_abatement(scenario.rent_schedule.abatement.as_ref());

        let monthly = aggregate(scenario, &series, DiscountRate::new(discount_rate));
        let annual = roll_up(&monthly);
        let metrics = summarize(scenario, &monthly, discount_rate);

        EngineResult {
            scenario_id: scenario.id.clone(),
            term_months: monthly.len(),
            monthly,
            annual,
            metrics,
            discount_rate,
        }
    }
}

/// Combine category series into monthly rows
///
/// The TI allowance is credited against month 0 only. Cumulative cost is a
/// running sum of totals and each month's total is discounted back to
/// commencement.
pub fn aggregate(scenario: &LeaseScenario, series: &CategorySeries, rate: DiscountRate) -> Vec<MonthlyRow> {
    let commencement = scenario.commencement_date();
    let allowance = scenario.ti.allowance();
    let mut cumulative = 0.0;

    (0..scenario.term_months())
        .map(|month| {
            let value = |v: &[f64]| v.get(month).copied().unwrap_or(0.0);
            let mut row = MonthlyRow::new(month);

            row.period_start = commencement.and_then(|d| month_period(d, month)).map(|(start, _)| start);
            row.occupied_area = value(&series.area);
            row.base_rent = value(&series.base_rent);
            row.opex = value(&series.opex);
            row.parking = value(&series.parking);
            row.ti_amortization = value(&series.ti_amortization);
            row.misc = value(&series.misc);

            row.total = row.gross_cost();
            if month == 0 {
                row.total -= allowance;
            }

            cumulative += row.total;
            row.cumulative = cumulative;
            row.present_value = rate.present_value(row.total, month);
            row
        })
        .collect()
}
