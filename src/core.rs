mod calculator;
mod memo;
mod month;
mod record;
mod tariff;

pub use self::{
    calculator::{CostCalculator, MonthlyTotal},
    month::Month,
    record::{ConsumptionRecord, CostedRecord, PriceRecord},
    tariff::Tariff,
};
