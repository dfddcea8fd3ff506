//! Equalized comparison of several projected leases over a shared window
//!
//! Leases rarely start and end on the same dates. Restricting every
//! scenario to one common window makes totals and averages comparable.
//! Boundary months are prorated by exact day counts, and the window NPV is
//! discounted from the window start rather than from each commencement.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::window::{clip_to_window, natural_window, ClippedMonth, ComparisonWindow, CustomWindow};
use crate::projection::{DiscountRate, EngineResult};

/// Window-local figures for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowedMetrics {
    pub scenario_id: String,
    pub name: String,
    pub days_in_window: i64,
    /// Sum of the scenario's fractional month overlaps with the window
    pub months_in_window: f64,
    pub total_base_rent: f64,
    pub total_cost: f64,
    pub avg_gross_rent_year: f64,
    pub avg_cost_year: f64,
    pub avg_cost_month: f64,
    pub avg_cost_psf_yr: f64,
    pub npv: f64,
    pub discount_rate: f64,
    pub clipped: Vec<ClippedMonth>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualizedComparisonResult {
    /// A comparison window was resolved and metrics computed
    pub has_overlap: bool,
    /// The scenarios have no usable natural overlap
    pub needs_custom_window: bool,
    pub window: Option<ComparisonWindow>,
    pub metrics: BTreeMap<String, WindowedMetrics>,
    /// Scenarios left out because their commencement date is unusable
    pub excluded: Vec<String>,
    pub message: Option<String>,
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}

/// Map key for the result at `index`: its id, or `scenario-N` when empty
///
/// A key already in `taken` gets the 1-based position appended so that
/// scenarios sharing an id are all reported.
fn scenario_key(result: &EngineResult, index: usize, taken: &BTreeSet<String>) -> String {
    let base = if result.scenario_id.is_empty() {
        format!("scenario-{}", index + 1)
    } else {
        result.scenario_id.clone()
    };
    let mut key = base.clone();
    let mut suffix = index + 1;
    while taken.contains(&key) {
        key = format!("{}-{}", base, suffix);
        suffix += 1;
    }
    key
}

/// Compare already-projected scenarios over their shared window
///
/// The natural window is the intersection of all terms. A valid custom
/// window, when given, takes precedence. When neither exists the result is
/// empty with an explanatory message; this function never fails.
pub fn compare_equalized(results: &[EngineResult], custom: Option<&CustomWindow>) -> EqualizedComparisonResult {
    let natural = natural_window(results);
    let needs_custom_window = natural.is_none();

    let custom_window = custom.and_then(|c| {
        let window = ComparisonWindow::from_custom(c);
        if window.is_none() {
            log::warn!("Custom comparison window {} to {} is not a valid date range", c.start, c.end);
        }
        window
    });

    let Some(window) = custom_window.or(natural) else {
        let message = if results.is_empty() {
            "No scenarios to compare".to_string()
        } else if custom.is_some() {
            "Lease terms do not overlap and the custom window is not a valid date range".to_string()
        } else {
            "Lease terms do not overlap or lack dates; supply a custom comparison window".to_string()
        };
        return EqualizedComparisonResult {
            has_overlap: false,
            needs_custom_window,
            message: Some(message),
            ..Default::default()
        };
    };

    let mut metrics = BTreeMap::new();
    let mut excluded = Vec::new();
    let mut taken = BTreeSet::new();
    for (index, result) in results.iter().enumerate() {
        let key = scenario_key(result, index, &taken);
        if key != result.scenario_id && !result.scenario_id.is_empty() {
            log::warn!("Duplicate scenario id '{}' reported as '{}'", result.scenario_id, key);
        }
        taken.insert(key.clone());
        match windowed_metrics(result, &window) {
            Some(m) => {
                metrics.insert(key, m);
            }
            None => {
                log::warn!("Scenario '{}' has no usable commencement date; excluded from window", key);
                excluded.push(key);
            }
        }
    }

    let message = (!excluded.is_empty())
        .then(|| format!("{} scenario(s) lack a commencement date and were excluded", excluded.len()));

    EqualizedComparisonResult {
        has_overlap: true,
        needs_custom_window,
        window: Some(window),
        metrics,
        excluded,
        message,
    }
}

/// Window-local metrics for one scenario; `None` without a usable commencement date
pub fn windowed_metrics(result: &EngineResult, window: &ComparisonWindow) -> Option<WindowedMetrics> {
    let clipped = clip_to_window(result, window)?;
    let rate = DiscountRate::new(result.discount_rate);

    let total_base_rent: f64 = clipped.iter().map(|c| c.base_rent).sum();
    let total_cost: f64 = clipped.iter().map(|c| c.total).sum();
    let days_in_window: i64 = clipped.iter().map(|c| c.overlap_days).sum();
    let months_in_window: f64 = clipped.iter().map(|c| c.fraction).sum();
    let weighted_area: f64 = clipped.iter().map(|c| c.fraction * c.occupied_area).sum();

    let in_window: Vec<f64> = clipped.iter().filter(|c| c.fraction > 0.0).map(|c| c.total).collect();
    let npv = rate.pv_stream(&in_window);

    let avg_cost_year = safe_div(total_cost, window.years());

    Some(WindowedMetrics {
        scenario_id: result.scenario_id.clone(),
        name: result.metrics.name.clone(),
        days_in_window,
        months_in_window,
        total_base_rent,
        total_cost,
        avg_gross_rent_year: safe_div(total_base_rent, window.years()),
        avg_cost_year,
        avg_cost_month: safe_div(total_cost, window.months),
        avg_cost_psf_yr: safe_div(avg_cost_year, safe_div(weighted_area, months_in_window)),
        npv,
        discount_rate: result.discount_rate,
        clipped,
    })
}
