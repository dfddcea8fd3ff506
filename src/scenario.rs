//! Batch runner for comparing several lease scenarios
//!
//! Scenarios are independent, so batches are projected in parallel; results
//! come back in input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::comparison::{compare_equalized, CustomWindow, EqualizedComparisonResult};
use crate::lease::LeaseScenario;
use crate::projection::{EngineConfig, EngineResult, LeaseEngine};

/// Projections for a set of scenarios plus their equalized comparison
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub results: Vec<EngineResult>,
    pub equalized: EqualizedComparisonResult,
}

/// Runs the lease engine over many scenarios with one configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(EngineConfig::with_discount_rate(0.07));
/// let report = runner.compare(&[renewal, relocation], None);
/// for (id, m) in &report.equalized.metrics {
///     println!("{id}: {:.2}/SF/yr", m.avg_cost_psf_yr);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: LeaseEngine,
}

impl ScenarioRunner {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: LeaseEngine::new(config),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    /// Project a single scenario
    pub fn run(&self, scenario: &LeaseScenario) -> EngineResult {
        self.engine.project_scenario(scenario)
    }

    /// Project many scenarios in parallel
    pub fn run_batch(&self, scenarios: &[LeaseScenario]) -> Vec<EngineResult> {
        log::info!("Projecting {} lease scenario(s)", scenarios.len());
        scenarios
            .par_iter()
            .map(|scenario| self.engine.project_scenario(scenario))
            .collect()
    }

    /// Project one scenario at several global discount rates
    ///
    /// A scenario-level override still wins over each of `rates`.
    pub fn run_discount_sensitivity(&self, scenario: &LeaseScenario, rates: &[f64]) -> Vec<EngineResult> {
        rates
            .par_iter()
            .map(|&rate| LeaseEngine::new(EngineConfig::with_discount_rate(rate)).project_scenario(scenario))
            .collect()
    }

    /// Project all scenarios and compare them over their shared window
    pub fn compare(&self, scenarios: &[LeaseScenario], custom: Option<&CustomWindow>) -> ComparisonReport {
        let results = self.run_batch(scenarios);
        let equalized = compare_equalized(&results, custom);
        if let Some(message) = &equalized.message {
            log::warn!("{}", message);
        }
        ComparisonReport { results, equalized }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lease::RentStep;

    fn scenario(id: &str, rate: f64, start: &str, end: &str, months: i64) -> LeaseScenario {
        let mut s = LeaseScenario::new(id, id, 10_000.0, months);
        s.term.commencement = Some(start.to_string());
        s.term.expiration = Some(end.to_string());
        s.rent_schedule.steps = vec![RentStep { start_month: 0, end_month: months - 1, rate_psf_yr: rate }];
        s
    }

    #[test]
    fn test_batch_preserves_order() {
        let runner = ScenarioRunner::default();
        let scenarios: Vec<_> = (0..8)
            .map(|i| scenario(&format!("s{}", i), 20.0 + i as f64, "2026-01-01", "2030-12-31", 60))
            .collect();
        let results = runner.run_batch(&scenarios);

        assert_eq!(results.len(), 8);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.scenario_id, format!("s{}", i));
        }
        assert!(results[7].metrics.total_obligation > results[0].metrics.total_obligation);
    }

    #[test]
    fn test_discount_sensitivity() {
        let runner = ScenarioRunner::default();
        let s = scenario("a", 30.0, "2026-01-01", "2030-12-31", 60);
        let results = runner.run_discount_sensitivity(&s, &[0.0, 0.05, 0.10]);

        assert_eq!(results.len(), 3);
        assert!((results[0].metrics.npv - results[0].metrics.total_obligation).abs() < 1e-6);
        assert!(results[2].metrics.npv < results[1].metrics.npv);
    }

    #[test]
    fn test_compare_report() {
        let runner = ScenarioRunner::new(EngineConfig::with_discount_rate(0.07));
        let scenarios = vec![
            scenario("renewal", 30.0, "2026-01-01", "2030-12-31", 60),
            scenario("relocation", 27.0, "2026-07-01", "2033-06-30", 84),
        ];
        let report = runner.compare(&scenarios, None);

        assert_eq!(report.results.len(), 2);
        assert!(report.equalized.has_overlap);
        let window = report.equalized.window.unwrap();
        assert_eq!(window.start.to_string(), "2026-07-01");
        assert_eq!(window.end.to_string(), "2030-12-31");
        assert!(report.equalized.metrics["relocation"].avg_cost_psf_yr < report.equalized.metrics["renewal"].avg_cost_psf_yr);
    }
}
