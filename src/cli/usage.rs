//! Commands that only look at the consumption.

use clap::Parser;

use crate::{
    analysis::{ConsumptionProfile, PeakComparison, TimeWindow},
    cli::{output::OutputArgs, range::RangeArgs, source::ConsumptionSourceArgs},
    prelude::*,
    tables::{build_peak_table, build_profile_table},
};

#[derive(Parser)]
pub struct ProfileArgs {
    #[clap(flatten)]
    consumption: ConsumptionSourceArgs,

    #[clap(flatten)]
    range: RangeArgs,

    #[clap(flatten)]
    output: OutputArgs,
}

impl ProfileArgs {
    pub fn run(self) -> Result {
        let consumption = self.consumption.load()?;
        let (_, selection) = self.range.select(&consumption)?;
        let profile = ConsumptionProfile::new(&selection, &consumption);
        self.output.print(&profile, build_profile_table)
    }
}

#[derive(Parser)]
pub struct PeakHoursArgs {
    #[clap(flatten)]
    consumption: ConsumptionSourceArgs,

    #[clap(flatten)]
    range: RangeArgs,

    /// Expensive time-of-day windows, both ends inclusive.
    #[clap(
        long = "expensive-hours",
        env = "EXPENSIVE_HOURS",
        value_delimiter = ',',
        default_values_t = TimeWindow::DEFAULT_EXPENSIVE
    )]
    expensive_hours: Vec<TimeWindow>,

    #[clap(flatten)]
    output: OutputArgs,
}

impl PeakHoursArgs {
    pub fn run(self) -> Result {
        let consumption = self.consumption.load()?;
        let (_, selection) = self.range.select(&consumption)?;
        let comparison = PeakComparison::new(&selection, &self.expensive_hours);
        self.output.print(&comparison, build_peak_table)
    }
}
