//! Schema normalisation of the two downloaded files.
//!
//! Everything the calculator receives has already been typed here: header spellings are bound
//! to canonical fields, decimal commas are normalised, and unusable rows are dropped.

mod clock;
mod consumption;
mod number;
mod prices;
mod table;

use std::path::Path;

use chrono::{DateTime, Local};

pub use self::{consumption::ConsumptionSchema, prices::PriceSchema};
use crate::{
    core::{ConsumptionRecord, PriceRecord},
    ingest::table::Table,
    prelude::*,
};

#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_consumption(path: &Path, schema: &ConsumptionSchema) -> Result<Vec<ConsumptionRecord>> {
    let table = Table::read(path)?;
    ensure!(!table.is_empty(), "`{}` contains no consumption rows", path.display());
    schema.parse(&table).with_context(|| format!("failed to load `{}`", path.display()))
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_prices(path: &Path, schema: &PriceSchema) -> Result<Vec<PriceRecord>> {
    let table = Table::read(path)?;
    ensure!(!table.is_empty(), "`{}` contains no price rows", path.display());
    schema.parse(&table).with_context(|| format!("failed to load `{}`", path.display()))
}

/// Sort the records by timestamp and keep the first record of each timestamp.
///
/// Returns the number of removed records.
fn deduplicate<T>(records: &mut Vec<T>, key: impl Fn(&T) -> DateTime<Local>) -> usize {
    let n_records = records.len();
    records.sort_by_key(&key);
    records.dedup_by_key(|record| key(record));
    n_records - records.len()
}
