//! Per-month calculators
//!
//! Each calculator is a pure function of the term length, its own slice of
//! the lease record and, where needed, the occupied-area series. None reads
//! another calculator's output, so they can be tested and evaluated
//! independently; the monthly aggregator combines them.

mod amortization;
mod expenses;
mod misc;
mod occupancy;
mod parking;
mod rent;

pub use amortization::{build_amortization, level_payment};
pub use expenses::{build_opex, chargeable_rate};
pub use misc::build_misc;
pub use occupancy::{average_area, build_occupancy};
pub use parking::{annual_parking_cost, build_parking};
pub use rent::{apply_abatement, build_rent, first_period_rate, implied_escalation, scheduled_rent};
