quantity!(
    /// Euro per kilowatt-hour, the unit the provider fees are quoted in.
    KilowattHourPrice,
    "€/kWh",
    4
);

quantity!(
    /// Euro per megawatt-hour, the unit of the day-ahead auction.
    ///
    /// Wholesale prices can be negative.
    MegawattHourPrice,
    "€/MWh",
    2
);

impl KilowattHourPrice {
    /// Price in cents per kilowatt-hour, the way it is printed on a bill.
    #[must_use]
    pub const fn to_cents(self) -> f64 {
        self.0 * 100.0
    }
}

impl From<MegawattHourPrice> for KilowattHourPrice {
    fn from(price: MegawattHourPrice) -> Self {
        Self(price.0 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::energy::KilowattHours;

    #[test]
    fn test_megawatt_hour_to_kilowatt_hour() {
        assert_abs_diff_eq!(KilowattHourPrice::from(MegawattHourPrice(123.4)).0, 0.1234);
    }

    #[test]
    fn test_negative_price() {
        let cost = KilowattHours(2.0).at(MegawattHourPrice(-50.0));
        assert_abs_diff_eq!(cost.0, -0.1);
    }

    #[test]
    fn test_parse() {
        let price: KilowattHourPrice = "0.018".parse().unwrap();
        assert_abs_diff_eq!(price.0, 0.018);
    }
}
