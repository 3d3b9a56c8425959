use clap::Parser;

use crate::{
    core::Tariff,
    quantity::{currency::Euro, price::KilowattHourPrice},
};

#[derive(Copy, Clone, Parser)]
pub struct TariffArgs {
    /// Fixed provider fee per calendar month, in euro.
    #[clap(long = "fixed-fee", env = "FIXED_FEE", default_value = "2.16")]
    fixed_fee: Euro,

    /// Provider fee on top of the market price, in euro per kilowatt-hour.
    #[clap(long = "variable-fee", env = "VARIABLE_FEE", default_value = "0.018")]
    variable_fee: KilowattHourPrice,

    /// Grid operator base fee per calendar month, in euro (Styria 2025: 6.24).
    #[clap(long = "grid-base-fee", env = "GRID_BASE_FEE", default_value = "0")]
    grid_base_fee: Euro,

    /// Grid operator fee per kilowatt-hour, in euro (Styria 2025: 0.0911).
    #[clap(long = "grid-work-fee", env = "GRID_WORK_FEE", default_value = "0")]
    grid_work_fee: KilowattHourPrice,
}

impl From<TariffArgs> for Tariff {
    fn from(args: TariffArgs) -> Self {
        Self::builder()
            .fixed_fee(args.fixed_fee)
            .variable_fee(args.variable_fee)
            .grid_base_fee(args.grid_base_fee)
            .grid_work_fee(args.grid_work_fee)
            .build()
    }
}
