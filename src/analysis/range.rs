use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use crate::{
    core::{ConsumptionRecord, Month},
    prelude::*,
};

/// Inclusive range of local calendar dates.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn try_new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        ensure!(start <= end, "the start date {start} is after the end date {end}");
        Ok(Self { start, end })
    }

    /// Dates covered by the consumption series, `None` for an empty series.
    pub fn of(records: &[ConsumptionRecord]) -> Option<Self> {
        let (start, end) = records.iter().fold(None, |bounds, record| {
            let date = record.timestamp.date_naive();
            Some(match bounds {
                None => (date, date),
                Some((start, end)) => (date.min(start), date.max(end)),
            })
        })?;
        Some(Self { start, end })
    }

    #[must_use]
    pub fn contains(self, timestamp: DateTime<Local>) -> bool {
        let date = timestamp.date_naive();
        (self.start <= date) && (date <= self.end)
    }

    #[must_use]
    pub fn select(self, records: &[ConsumptionRecord]) -> Vec<ConsumptionRecord> {
        records.iter().filter(|record| self.contains(record.timestamp)).copied().collect()
    }
}

/// Quick selection relative to the available data.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum RangePreset {
    /// Everything from the first to the last consumption date.
    #[default]
    All,

    /// From the first day of the latest month with data up to the last consumption date.
    ThisMonth,

    /// The whole calendar month before the latest month with data.
    LastMonth,
}

impl RangePreset {
    /// Resolve the preset against the data bounds, then apply the explicit overrides.
    pub fn resolve(
        self,
        bounds: DateRange,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<DateRange> {
        let latest_month = Month::of(bounds.end);
        let (start, end) = match self {
            Self::All => (bounds.start, bounds.end),
            Self::ThisMonth => (latest_month.first_day(), bounds.end),
            Self::LastMonth => {
                let month = latest_month.previous();
                (month.first_day(), month.last_day())
            }
        };
        DateRange::try_new(since.unwrap_or(start), until.unwrap_or(end))
    }
}
