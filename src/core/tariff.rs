use serde::Serialize;

use crate::{
    prelude::*,
    quantity::{currency::Euro, price::KilowattHourPrice},
};

/// Provider and grid operator fees on top of the wholesale market price.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, bon::Builder)]
pub struct Tariff {
    /// Provider fee charged once per calendar month, regardless of the consumption.
    #[builder(default = Tariff::DEFAULT_FIXED_FEE)]
    pub fixed_fee: Euro,

    /// Provider fee per consumed kilowatt-hour.
    #[builder(default = Tariff::DEFAULT_VARIABLE_FEE)]
    pub variable_fee: KilowattHourPrice,

    /// Grid operator base fee per calendar month.
    #[builder(default = Euro::ZERO)]
    pub grid_base_fee: Euro,

    /// Grid operator fee per consumed kilowatt-hour.
    #[builder(default = KilowattHourPrice::ZERO)]
    pub grid_work_fee: KilowattHourPrice,
}

impl Tariff {
    pub const DEFAULT_FIXED_FEE: Euro = Euro(2.16);
    pub const DEFAULT_VARIABLE_FEE: KilowattHourPrice = KilowattHourPrice(0.018);

    /// Fail on a fee that would turn every cost into `NaN` or infinity.
    pub fn ensure_finite(&self) -> Result {
        ensure!(self.fixed_fee.is_finite(), "`fixed_fee` is not a finite number: {:?}", self.fixed_fee);
        ensure!(
            self.variable_fee.is_finite(),
            "`variable_fee` is not a finite number: {:?}",
            self.variable_fee,
        );
        ensure!(
            self.grid_base_fee.is_finite(),
            "`grid_base_fee` is not a finite number: {:?}",
            self.grid_base_fee,
        );
        ensure!(
            self.grid_work_fee.is_finite(),
            "`grid_work_fee` is not a finite number: {:?}",
            self.grid_work_fee,
        );
        Ok(())
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self::builder().build()
    }
}
