mod billing;
mod output;
mod range;
mod source;
mod tariff;
mod usage;

use clap::{Parser, Subcommand};

use crate::{
    cli::{
        billing::{CostsArgs, MonthlyArgs, OverviewArgs},
        usage::{PeakHoursArgs, ProfileArgs},
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Headline consumption and cost numbers of the selected range.
    #[clap(name = "overview")]
    Overview(Box<OverviewArgs>),

    /// Monthly bills: market cost, variable and fixed fees.
    #[clap(name = "monthly")]
    Monthly(Box<MonthlyArgs>),

    /// Consumption per time of day against the whole history.
    #[clap(name = "profile")]
    Profile(Box<ProfileArgs>),

    /// Consumption inside and outside the expensive hours.
    #[clap(name = "peak-hours")]
    PeakHours(Box<PeakHoursArgs>),

    /// Every priced interval with its costs.
    #[clap(name = "costs")]
    Costs(Box<CostsArgs>),
}

impl Command {
    pub fn run(self) -> Result {
        match self {
            Self::Overview(args) => args.run(),
            Self::Monthly(args) => args.run(),
            Self::Profile(args) => args.run(),
            Self::PeakHours(args) => args.run(),
            Self::Costs(args) => args.run(),
        }
    }
}
