use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::{Serialize, Serializer};

/// Calendar month in the local time zone, the billing period of the fixed fee.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, derive_more::Display)]
#[display("{year:04}-{month:02}")]
pub struct Month {
    year: i32,

    /// `1..=12`.
    month: u32,
}

impl Month {
    pub fn of(date: impl Datelike) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        self.next().first_day().pred_opt().unwrap_or(NaiveDate::MAX)
    }

    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// Number of calendar months in `self..=last`, zero if `last` precedes `self`.
    #[must_use]
    pub fn count_through(self, last: Self) -> u32 {
        let months =
            (i64::from(last.year) - i64::from(self.year)) * 12 + i64::from(last.month) + 1
                - i64::from(self.month);
        u32::try_from(months).unwrap_or(0)
    }
}

impl From<DateTime<Local>> for Month {
    fn from(timestamp: DateTime<Local>) -> Self {
        Self::of(timestamp)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
