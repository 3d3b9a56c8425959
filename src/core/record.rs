use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    core::tariff::Tariff,
    prelude::*,
    quantity::{currency::Euro, energy::KilowattHours, price::MegawattHourPrice},
};

/// Household consumption over one metering interval.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConsumptionRecord {
    /// Interval start.
    pub timestamp: DateTime<Local>,

    pub consumption: KilowattHours,
}

/// Day-ahead auction price for one interval.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PriceRecord {
    /// Interval start.
    pub timestamp: DateTime<Local>,

    pub price: MegawattHourPrice,
}

/// Consumption and price sharing the same interval start.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MergedRecord {
    pub timestamp: DateTime<Local>,
    pub consumption: KilowattHours,
    pub price: MegawattHourPrice,
}

impl MergedRecord {
    /// Apply the tariff to the interval.
    ///
    /// Fails if either value is not a finite number: a broken value is never priced as zero.
    pub fn try_cost(self, tariff: &Tariff) -> Result<CostedRecord> {
        ensure!(
            self.consumption.is_finite(),
            "`consumption` at {} is not a finite number: {:?}",
            self.timestamp,
            self.consumption,
        );
        ensure!(
            self.price.is_finite(),
            "`price` at {} is not a finite number: {:?}",
            self.timestamp,
            self.price,
        );
        let market_cost = self.consumption.at(self.price);
        let variable_fee = self.consumption * tariff.variable_fee;
        Ok(CostedRecord {
            merged: self,
            market_cost,
            variable_fee,
            grid_work_fee: self.consumption * tariff.grid_work_fee,
            total_cost: market_cost + variable_fee,
        })
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CostedRecord {
    #[serde(flatten)]
    pub merged: MergedRecord,

    /// Wholesale part: consumption at the auction price.
    pub market_cost: Euro,

    /// Provider fee proportional to the consumption.
    pub variable_fee: Euro,

    /// Grid operator fee proportional to the consumption, billed separately from the provider.
    pub grid_work_fee: Euro,

    /// Provider cost of the interval: market cost plus the variable fee.
    ///
    /// Monthly fees and grid fees are added on the monthly level.
    pub total_cost: Euro,
}
