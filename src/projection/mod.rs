//! Lease projection: monthly aggregation, discounting, roll-ups and metrics

mod annual;
mod cashflows;
mod discount;
mod engine;
mod metrics;

pub use annual::roll_up;
pub use cashflows::{AnnualRow, EngineResult, MonthlyRow};
pub use discount::{resolve_discount_rate, DiscountRate, DEFAULT_DISCOUNT_RATE};
pub use engine::{aggregate, CategorySeries, EngineConfig, LeaseEngine};
pub use metrics::{summarize, OptionMetrics};
