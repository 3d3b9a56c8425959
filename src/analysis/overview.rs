use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    analysis::range::DateRange,
    core::{ConsumptionRecord, Month, MonthlyTotal},
    prelude::*,
    quantity::{currency::Euro, energy::KilowattHours, price::KilowattHourPrice},
};

/// Headline numbers of the selected range.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct Overview {
    pub range: DateRange,
    pub n_intervals: usize,
    pub total_consumption: KilowattHours,
    pub mean_consumption: KilowattHours,
    pub min_consumption: KilowattHours,
    pub max_consumption: KilowattHours,

    /// Sum of the monthly totals, fixed fees included.
    pub total_cost: Euro,

    /// Calendar months between the first and the last interval, both inclusive.
    pub n_months: u32,

    pub monthly_consumption: KilowattHours,
    pub monthly_cost: Euro,

    /// Total cost over total consumption, absent if nothing was consumed.
    pub average_price: Option<KilowattHourPrice>,

    /// Months with consumption but without a single priced interval.
    ///
    /// These are missing from the totals, typically because the price export lags behind.
    pub unpriced_months: Vec<Month>,
}

impl Overview {
    pub fn try_new(
        range: DateRange,
        selection: &[ConsumptionRecord],
        monthly_totals: &[MonthlyTotal],
    ) -> Result<Self> {
        let first = selection.first().context("no consumption data for the selected range")?;
        let last = selection.last().context("no consumption data for the selected range")?;

        let n_intervals = selection.len();
        let consumption = || selection.iter().map(|record| record.consumption);
        let total_consumption: KilowattHours = consumption().sum();
        #[expect(clippy::cast_precision_loss)]
        let mean_consumption = total_consumption / n_intervals as f64;
        let min_consumption = consumption().min().unwrap_or_default();
        let max_consumption = consumption().max().unwrap_or_default();

        let total_cost: Euro = monthly_totals.iter().map(|total| total.total_cost).sum();
        let n_months = Month::from(first.timestamp).count_through(Month::from(last.timestamp));
        let average_price = (total_consumption > KilowattHours::ZERO)
            .then(|| total_cost / total_consumption);

        let priced_months: BTreeSet<Month> = monthly_totals.iter().map(|total| total.month).collect();
        let unpriced_months: Vec<Month> = selection
            .iter()
            .map(|record| Month::from(record.timestamp))
            .collect::<BTreeSet<_>>()
            .difference(&priced_months)
            .copied()
            .collect();
        if !unpriced_months.is_empty() {
            warn!(?unpriced_months, "some months have consumption but no prices");
        }

        Ok(Self {
            range,
            n_intervals,
            total_consumption,
            mean_consumption,
            min_consumption,
            max_consumption,
            total_cost,
            n_months,
            monthly_consumption: total_consumption / f64::from(n_months.max(1)),
            monthly_cost: total_cost / f64::from(n_months.max(1)),
            average_price,
            unpriced_months,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::{Local, NaiveDate, TimeZone};

    use super::*;
    use crate::{
        core::{CostCalculator, PriceRecord, Tariff},
        quantity::price::MegawattHourPrice,
    };

    fn record(month: u32, day: u32, consumption: f64) -> ConsumptionRecord {
        ConsumptionRecord {
            timestamp: Local.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap(),
            consumption: KilowattHours(consumption),
        }
    }

    fn range() -> DateRange {
        DateRange::try_new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_overview() -> Result {
        let selection = [record(1, 10, 1.0), record(1, 20, 3.0), record(3, 5, 2.0)];
        let prices = [PriceRecord { timestamp: selection[0].timestamp, price: MegawattHourPrice(100.0) }];
        let calculator = CostCalculator::builder()
            .consumption(&selection)
            .prices(&prices)
            .tariff(Tariff::default())
            .build();
        let monthly_totals = calculator.monthly_totals()?;
        let overview = Overview::try_new(range(), &selection, &monthly_totals)?;

        assert_eq!(overview.n_intervals, 3);
        assert_relative_eq!(overview.total_consumption.0, 6.0);
        assert_relative_eq!(overview.mean_consumption.0, 2.0);
        assert_relative_eq!(overview.min_consumption.0, 1.0);
        assert_relative_eq!(overview.max_consumption.0, 3.0);
        assert_eq!(overview.n_months, 3);
        assert_relative_eq!(overview.total_cost.0, 0.1 + 0.018 + 2.16, max_relative = 1e-9);
        assert_relative_eq!(overview.monthly_cost.0, (0.1 + 0.018 + 2.16) / 3.0, max_relative = 1e-9);
        assert_relative_eq!(overview.monthly_consumption.0, 2.0);
        assert_relative_eq!(
            overview.average_price.unwrap().0,
            (0.1 + 0.018 + 2.16) / 6.0,
            max_relative = 1e-9,
        );
        assert_eq!(overview.unpriced_months, [Month::from(selection[2].timestamp)]);
        Ok(())
    }

    #[test]
    fn test_zero_consumption_has_no_average_price() -> Result {
        let selection = [record(2, 1, 0.0)];
        let overview = Overview::try_new(range(), &selection, &[])?;
        assert_eq!(overview.average_price, None);
        assert_eq!(overview.n_months, 1);
        Ok(())
    }

    #[test]
    fn test_empty_selection_fails() {
        assert!(Overview::try_new(range(), &[], &[]).is_err());
    }
}
