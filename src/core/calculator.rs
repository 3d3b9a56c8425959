use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{
        memo::Memo,
        month::Month,
        record::{ConsumptionRecord, CostedRecord, MergedRecord, PriceRecord},
        tariff::Tariff,
    },
    prelude::*,
    quantity::{currency::Euro, energy::KilowattHours, price::KilowattHourPrice},
};

/// Joins consumption with market prices and applies the provider tariff.
///
/// The inputs are borrowed and never change during the calculator lifetime,
/// so the join is computed once and then served from the memo.
#[must_use]
#[derive(bon::Builder)]
pub struct CostCalculator<'a> {
    consumption: &'a [ConsumptionRecord],
    prices: &'a [PriceRecord],

    #[builder(default)]
    tariff: Tariff,

    #[builder(skip)]
    merged: Memo<Vec<MergedRecord>>,
}

impl CostCalculator<'_> {
    /// Inner join of the consumption and price series on the exact interval start.
    ///
    /// Intervals present in only one of the series are left out. The result is ordered by timestamp.
    pub fn merge(&self) -> Result<&[MergedRecord]> {
        self.merged.get_or_try_init(|| join(self.consumption, self.prices)).map(Vec::as_slice)
    }

    /// Merged intervals with the market cost, variable fee and their sum.
    pub fn calculate_costs(&self) -> Result<Vec<CostedRecord>> {
        self.tariff.ensure_finite()?;
        self.merge()?.iter().map(|record| record.try_cost(&self.tariff)).collect()
    }

    /// Per-month totals, each with the fixed fee and the grid base fee added exactly once.
    ///
    /// A month without merged intervals is absent: there is nothing to bill the fixed fee against.
    #[instrument(skip_all)]
    pub fn monthly_totals(&self) -> Result<Vec<MonthlyTotal>> {
        let costs = self.calculate_costs()?;
        let months = costs.iter().chunk_by(|record| Month::from(record.merged.timestamp));
        let totals = months
            .into_iter()
            .map(|(month, records)| MonthlyTotal::new(month, &self.tariff, records))
            .collect_vec();
        debug!(n_months = totals.len(), "aggregated");
        Ok(totals)
    }
}

#[instrument(skip_all, fields(n_consumption = consumption.len(), n_prices = prices.len()))]
fn join(consumption: &[ConsumptionRecord], prices: &[PriceRecord]) -> Result<Vec<MergedRecord>> {
    let mut price_index = BTreeMap::new();
    for record in prices {
        if price_index.insert(record.timestamp, record.price).is_some() {
            bail!("duplicate price timestamp {}", record.timestamp);
        }
    }

    let mut seen = BTreeSet::new();
    let mut merged = Vec::with_capacity(consumption.len().min(prices.len()));
    for record in consumption {
        ensure!(seen.insert(record.timestamp), "duplicate consumption timestamp {}", record.timestamp);
        if let Some(price) = price_index.get(&record.timestamp) {
            merged.push(MergedRecord {
                timestamp: record.timestamp,
                consumption: record.consumption,
                price: *price,
            });
        }
    }
    merged.sort_unstable_by_key(|record| record.timestamp);

    debug!(
        n_merged = merged.len(),
        n_unpriced = consumption.len() - merged.len(),
        n_unused_prices = prices.len() - merged.len(),
        "joined",
    );
    Ok(merged)
}

/// Bill of one calendar month.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub month: Month,
    pub n_intervals: usize,
    pub consumption: KilowattHours,
    pub market_cost: Euro,
    pub variable_fee: Euro,
    pub fixed_fee: Euro,
    pub grid_base_fee: Euro,
    pub grid_work_fee: Euro,

    /// Sum of the interval costs plus all the fees.
    pub total_cost: Euro,
}

impl MonthlyTotal {
    fn new<'r>(
        month: Month,
        tariff: &Tariff,
        records: impl IntoIterator<Item = &'r CostedRecord>,
    ) -> Self {
        let mut n_intervals = 0;
        let mut consumption = KilowattHours::ZERO;
        let mut market_cost = Euro::ZERO;
        let mut variable_fee = Euro::ZERO;
        let mut grid_work_fee = Euro::ZERO;
        let mut interval_cost = Euro::ZERO;
        for record in records {
            n_intervals += 1;
            consumption += record.merged.consumption;
            market_cost += record.market_cost;
            variable_fee += record.variable_fee;
            grid_work_fee += record.grid_work_fee;
            interval_cost += record.total_cost;
        }
        Self {
            month,
            n_intervals,
            consumption,
            market_cost,
            variable_fee,
            fixed_fee: tariff.fixed_fee,
            grid_base_fee: tariff.grid_base_fee,
            grid_work_fee,
            total_cost: interval_cost + tariff.fixed_fee + tariff.grid_base_fee + grid_work_fee,
        }
    }

    /// All-in price per consumed kilowatt-hour, if anything was consumed.
    #[must_use]
    pub fn average_price(&self) -> Option<KilowattHourPrice> {
        (self.consumption > KilowattHours::ZERO).then(|| self.total_cost / self.consumption)
    }
}
