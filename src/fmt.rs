use std::fmt::{Debug, Display, Formatter};

use crate::quantity::price::KilowattHourPrice;

pub struct FormattedPercentage(pub f64);

impl Debug for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

/// Price in euro cents per kilowatt-hour, the way it is printed on a bill.
pub struct FormattedCents(pub KilowattHourPrice);

impl Display for FormattedCents {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} ct/kWh", self.0.to_cents())
    }
}

/// Placeholder for an average or a share that does not exist.
pub struct FormattedOption<T>(pub Option<T>);

impl<T: Display> Display for FormattedOption<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(value) => Display::fmt(value, f),
            None => f.write_str("n/a"),
        }
    }
}
