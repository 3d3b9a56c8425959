use std::collections::BTreeMap;

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::{core::ConsumptionRecord, quantity::energy::KilowattHours};

/// Consumption per time of day, selection against the full data.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct ConsumptionProfile {
    pub slots: Vec<ProfileSlot>,

    /// Applied to the full-data profile so that both profiles add up to the same total.
    pub scaling_factor: f64,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ProfileSlot {
    pub time: NaiveTime,

    /// Consumption of the selected range in this slot.
    pub selected: KilowattHours,

    /// Scaled consumption of the full data in this slot.
    pub reference: KilowattHours,
}

impl ConsumptionProfile {
    pub fn new(selection: &[ConsumptionRecord], full: &[ConsumptionRecord]) -> Self {
        let selected = sum_by_slot(selection);
        let reference = sum_by_slot(full);

        let selected_total: KilowattHours = selected.values().copied().sum();
        let full_total: KilowattHours = reference.values().copied().sum();
        let scaling_factor =
            if full_total == KilowattHours::ZERO { 1.0 } else { selected_total / full_total };

        let mut slots: BTreeMap<NaiveTime, ProfileSlot> = BTreeMap::new();
        for (time, consumption) in selected {
            slots.entry(time).or_insert_with(|| ProfileSlot::empty(time)).selected = consumption;
        }
        for (time, consumption) in reference {
            slots.entry(time).or_insert_with(|| ProfileSlot::empty(time)).reference =
                consumption * scaling_factor;
        }
        Self { slots: slots.into_values().collect(), scaling_factor }
    }
}

impl ProfileSlot {
    const fn empty(time: NaiveTime) -> Self {
        Self { time, selected: KilowattHours::ZERO, reference: KilowattHours::ZERO }
    }
}

fn sum_by_slot(records: &[ConsumptionRecord]) -> BTreeMap<NaiveTime, KilowattHours> {
    let mut sums = BTreeMap::new();
    for record in records {
        *sums.entry(slot_of(record.timestamp.time())).or_insert(KilowattHours::ZERO) +=
            record.consumption;
    }
    sums
}

/// Local time of day truncated to the minute.
fn slot_of(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{Local, TimeZone};

    use super::*;

    fn record(day: u32, hour: u32, minute: u32, consumption: f64) -> ConsumptionRecord {
        ConsumptionRecord {
            timestamp: Local.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap(),
            consumption: KilowattHours(consumption),
        }
    }

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_profile() {
        let full = [
            record(1, 0, 0, 1.0),
            record(1, 0, 15, 3.0),
            record(2, 0, 0, 2.0),
            record(2, 0, 15, 2.0),
        ];
        let profile = ConsumptionProfile::new(&full[2..], &full);

        // Selection totals 4 kWh out of 8 kWh.
        assert_abs_diff_eq!(profile.scaling_factor, 0.5);
        assert_eq!(profile.slots.len(), 2);
        assert_eq!(profile.slots[0].time, hm(0, 0));
        assert_abs_diff_eq!(profile.slots[0].selected.0, 2.0);
        assert_abs_diff_eq!(profile.slots[0].reference.0, 1.5);
        assert_eq!(profile.slots[1].time, hm(0, 15));
        assert_abs_diff_eq!(profile.slots[1].selected.0, 2.0);
        assert_abs_diff_eq!(profile.slots[1].reference.0, 2.5);
    }

    #[test]
    fn test_slots_are_the_union() {
        let full = [record(1, 6, 0, 1.0), record(2, 7, 30, 1.0)];
        let profile = ConsumptionProfile::new(&full[..1], &full);
        let times: Vec<_> = profile.slots.iter().map(|slot| slot.time).collect();
        assert_eq!(times, [hm(6, 0), hm(7, 30)]);
        assert_eq!(profile.slots[1].selected, KilowattHours::ZERO);
    }

    #[test]
    fn test_zero_full_total() {
        let full = [record(1, 0, 0, 0.0)];
        let profile = ConsumptionProfile::new(&full, &full);
        assert_abs_diff_eq!(profile.scaling_factor, 1.0);
    }

    #[test]
    fn test_slot_truncates_seconds() {
        assert_eq!(slot_of(NaiveTime::from_hms_opt(12, 34, 56).unwrap()), hm(12, 34));
    }
}
