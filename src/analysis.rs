//! Reports built on top of the loaded series and the cost calculator.

mod overview;
mod peak;
mod profile;
mod range;

pub use self::{
    overview::Overview,
    peak::{PeakComparison, TimeWindow},
    profile::{ConsumptionProfile, ProfileSlot},
    range::{DateRange, RangePreset},
};
