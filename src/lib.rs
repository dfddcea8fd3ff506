//! Lease Economics - cash-flow engine for comparing commercial lease scenarios
//!
//! This library provides:
//! - A canonical lease record (premises, term, rent steps, expenses, parking, TI, misc)
//! - Pure per-month calculators for rent, occupancy, expenses, parking, TI amortization and misc costs
//! - Monthly aggregation with discounting, annual roll-ups and summary metrics
//! - Equalized comparison of several leases over a shared, day-prorated window
//! - A parallel batch runner for side-by-side scenario sets

pub mod comparison;
pub mod error;
pub mod lease;
pub mod projection;
pub mod schedule;
pub mod scenario;

// Re-export commonly used types
pub use comparison::{compare_equalized, CustomWindow, EqualizedComparisonResult};
pub use error::{LeaseError, LeaseResult};
pub use lease::{validate_scenario, LeaseScenario, ScheduleWarning};
pub use projection::{EngineConfig, EngineResult, LeaseEngine, MonthlyRow, OptionMetrics};
pub use scenario::{ComparisonReport, ScenarioRunner};
