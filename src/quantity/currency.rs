use std::ops::Div;

use crate::quantity::{energy::KilowattHours, price::KilowattHourPrice};

quantity!(Euro, "€", 2);

impl Div<KilowattHours> for Euro {
    type Output = KilowattHourPrice;

    fn div(self, rhs: KilowattHours) -> Self::Output {
        KilowattHourPrice(self.0 / rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_average_price() {
        let price = Euro(3.05) / KilowattHours(5.0);
        assert_abs_diff_eq!(price.0, 0.61);
    }

    #[test]
    fn test_display() {
        assert_eq!(Euro(2.228).to_string(), "2.23 €");
        assert_eq!(Euro(-0.1).to_string(), "-0.10 €");
    }
}
