//! Lease data structures, calendar helpers and scenario loading

mod data;
pub mod calendar;
pub mod loader;
pub mod validation;

pub use data::{
    Abatement, AbatementScope, AbatementType, ExpenseSchedule, LeaseScenario, LeaseTerm,
    LeaseType, OneTimeCost, OtherCashFlows, ParkingSchedule, ParkingSlot, PhaseInSchedule,
    PhaseInStep, Premises, RentSchedule, RentStep, TiSchedule, MAX_TERM_MONTHS,
};
pub(crate) use data::clamp_non_negative;
pub use loader::{load_rent_steps, load_rent_steps_from_reader, load_scenarios, load_scenarios_from_reader};
pub use validation::{validate_scenario, ScheduleWarning};
