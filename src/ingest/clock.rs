use std::collections::HashSet;

use chrono::{DateTime, MappedLocalTime, NaiveDateTime, TimeZone};

/// Maps wall-clock times of an export onto instants of a time zone.
///
/// The hour repeated at the end of summer time shows up twice in the exports:
/// the first occurrence is the earlier instant, the second one is the later instant.
#[must_use]
pub struct WallClock<Tz: TimeZone> {
    zone: Tz,
    repeated: HashSet<NaiveDateTime>,
}

impl<Tz: TimeZone> WallClock<Tz> {
    pub fn new(zone: Tz) -> Self {
        Self { zone, repeated: HashSet::new() }
    }

    /// `None` for a time skipped by the spring-forward gap.
    pub fn resolve(&mut self, time: NaiveDateTime) -> Option<DateTime<Tz>> {
        match self.zone.from_local_datetime(&time) {
            MappedLocalTime::Single(timestamp) => Some(timestamp),
            MappedLocalTime::Ambiguous(earliest, latest) => {
                Some(if self.repeated.insert(time) { earliest } else { latest })
            }
            MappedLocalTime::None => None,
        }
    }
}
