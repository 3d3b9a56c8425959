//! Input file arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::{
    core::{ConsumptionRecord, PriceRecord},
    ingest::{ConsumptionSchema, PriceSchema, load_consumption, load_prices},
    prelude::*,
};

#[must_use]
#[derive(Parser)]
pub struct ConsumptionSourceArgs {
    /// Metering point export: spreadsheet or CSV with epoch-second timestamps.
    #[clap(long = "consumption-file", env = "CONSUMPTION_FILE")]
    path: PathBuf,

    #[clap(
        long = "consumption-timestamp-column",
        env = "CONSUMPTION_TIMESTAMP_COLUMN",
        default_value = ConsumptionSchema::DEFAULT_TIMESTAMP_COLUMN,
    )]
    timestamp_column: String,

    /// Column with the interval consumption in kilowatt-hours.
    #[clap(
        long = "consumption-column",
        env = "CONSUMPTION_COLUMN",
        default_value = ConsumptionSchema::DEFAULT_CONSUMPTION_COLUMN,
    )]
    consumption_column: String,
}

impl ConsumptionSourceArgs {
    pub fn load(&self) -> Result<Vec<ConsumptionRecord>> {
        let schema = ConsumptionSchema {
            timestamp: self.timestamp_column.clone(),
            consumption: self.consumption_column.clone(),
        };
        load_consumption(&self.path, &schema)
    }
}

#[must_use]
#[derive(Parser)]
pub struct PriceSourceArgs {
    /// Day-ahead auction export, semicolon-separated.
    #[clap(long = "price-file", env = "PRICE_FILE")]
    path: PathBuf,

    #[clap(
        long = "price-time-column",
        env = "PRICE_TIME_COLUMN",
        default_value = PriceSchema::DEFAULT_TIME_COLUMN,
    )]
    time_column: String,

    /// Column with the auction price in euro per megawatt-hour.
    #[clap(long = "price-column", env = "PRICE_COLUMN", default_value = PriceSchema::DEFAULT_PRICE_COLUMN)]
    price_column: String,
}

impl PriceSourceArgs {
    pub fn load(&self) -> Result<Vec<PriceRecord>> {
        let schema =
            PriceSchema { time: self.time_column.clone(), price: self.price_column.clone() };
        load_prices(&self.path, &schema)
    }
}
