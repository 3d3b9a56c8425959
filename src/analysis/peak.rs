use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::{core::ConsumptionRecord, prelude::*, quantity::energy::KilowattHours};

/// Time-of-day window, both ends inclusive at minute resolution.
///
/// A window whose end precedes its start wraps around midnight.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    const MORNING: Self = Self::from_hm(7, 0, 10, 0);
    const EVENING: Self = Self::from_hm(18, 0, 20, 0);

    /// Morning and evening peaks of the household tariff.
    pub const DEFAULT_EXPENSIVE: [Self; 2] = [Self::MORNING, Self::EVENING];

    const fn from_hm(start_hour: u32, start_minute: u32, end_hour: u32, end_minute: u32) -> Self {
        Self { start: Self::hm(start_hour, start_minute), end: Self::hm(end_hour, end_minute) }
    }

    const fn hm(hour: u32, minute: u32) -> NaiveTime {
        match NaiveTime::from_hms_opt(hour, minute, 0) {
            Some(time) => time,
            None => panic!("invalid time of day"),
        }
    }

    #[must_use]
    pub fn contains(self, time: NaiveTime) -> bool {
        let time = Self::hm(time.hour(), time.minute());
        if self.start <= self.end {
            (self.start <= time) && (time <= self.end)
        } else {
            (self.start <= time) || (time <= self.end)
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

impl FromStr for TimeWindow {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let (start, end) =
            text.split_once('-').with_context(|| format!("`{text}` is not a `HH:MM-HH:MM` window"))?;
        let parse = |time: &str| {
            NaiveTime::parse_from_str(time.trim(), "%H:%M")
                .with_context(|| format!("`{time}` is not a `HH:MM` time"))
        };
        Ok(Self { start: parse(start)?, end: parse(end)? })
    }
}

/// Consumption split between the expensive windows and the rest of the day.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct PeakComparison {
    pub windows: Vec<TimeWindow>,
    pub expensive: KilowattHours,
    pub cheap: KilowattHours,
    pub total: KilowattHours,

    /// Fraction of the total, absent when nothing was consumed.
    pub expensive_share: Option<f64>,

    pub cheap_share: Option<f64>,
}

impl PeakComparison {
    pub fn new(selection: &[ConsumptionRecord], windows: &[TimeWindow]) -> Self {
        let (mut expensive, mut cheap) = (KilowattHours::ZERO, KilowattHours::ZERO);
        for record in selection {
            let time = record.timestamp.time();
            if windows.iter().any(|window| window.contains(time)) {
                expensive += record.consumption;
            } else {
                cheap += record.consumption;
            }
        }
        let total = expensive + cheap;
        let share = |part: KilowattHours| (total > KilowattHours::ZERO).then(|| part / total);
        Self {
            windows: windows.to_vec(),
            expensive,
            cheap,
            total,
            expensive_share: share(expensive),
            cheap_share: share(cheap),
        }
    }
}
