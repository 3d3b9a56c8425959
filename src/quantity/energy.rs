use std::ops::{Div, Mul};

use crate::quantity::{
    currency::Euro,
    price::{KilowattHourPrice, MegawattHourPrice},
};

quantity!(KilowattHours, "kWh", 3);

impl KilowattHours {
    /// Market cost of this energy at the given auction price.
    pub fn at(self, price: MegawattHourPrice) -> Euro {
        self * KilowattHourPrice::from(price)
    }
}

impl Mul<KilowattHourPrice> for KilowattHours {
    type Output = Euro;

    fn mul(self, rhs: KilowattHourPrice) -> Self::Output {
        Euro(self.0 * rhs.0)
    }
}

impl Div for KilowattHours {
    type Output = f64;

    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}
