//! Commands that need both the consumption and the prices.

use clap::Parser;

use crate::{
    analysis::{DateRange, Overview},
    cli::{
        output::OutputArgs,
        range::RangeArgs,
        source::{ConsumptionSourceArgs, PriceSourceArgs},
        tariff::TariffArgs,
    },
    core::{ConsumptionRecord, CostCalculator, PriceRecord, Tariff},
    prelude::*,
    tables::{build_costs_table, build_monthly_table, build_overview_table},
};

#[derive(Parser)]
pub struct BillingArgs {
    #[clap(flatten)]
    consumption: ConsumptionSourceArgs,

    #[clap(flatten)]
    prices: PriceSourceArgs,

    #[clap(flatten)]
    tariff: TariffArgs,

    #[clap(flatten)]
    range: RangeArgs,

    #[clap(flatten)]
    output: OutputArgs,
}

impl BillingArgs {
    fn load(&self) -> Result<Billing> {
        let consumption = self.consumption.load()?;
        let prices = self.prices.load()?;
        let (range, selection) = self.range.select(&consumption)?;
        Ok(Billing { range, selection, prices, tariff: self.tariff.into() })
    }
}

/// Loaded inputs restricted to the selected range.
struct Billing {
    range: DateRange,
    selection: Vec<ConsumptionRecord>,
    prices: Vec<PriceRecord>,
    tariff: Tariff,
}

impl Billing {
    fn calculator(&self) -> CostCalculator<'_> {
        CostCalculator::builder()
            .consumption(&self.selection)
            .prices(&self.prices)
            .tariff(self.tariff)
            .build()
    }
}

#[derive(Parser)]
pub struct OverviewArgs {
    #[clap(flatten)]
    billing: BillingArgs,
}

impl OverviewArgs {
    pub fn run(self) -> Result {
        let billing = self.billing.load()?;
        let monthly_totals = billing.calculator().monthly_totals()?;
        let overview = Overview::try_new(billing.range, &billing.selection, &monthly_totals)?;
        self.billing.output.print(&overview, build_overview_table)
    }
}

#[derive(Parser)]
pub struct MonthlyArgs {
    #[clap(flatten)]
    billing: BillingArgs,
}

impl MonthlyArgs {
    pub fn run(self) -> Result {
        let billing = self.billing.load()?;
        let monthly_totals = billing.calculator().monthly_totals()?;
        if monthly_totals.is_empty() {
            warn!("no consumption interval has a matching price");
        }
        self.billing.output.print(monthly_totals.as_slice(), build_monthly_table)
    }
}

#[derive(Parser)]
pub struct CostsArgs {
    #[clap(flatten)]
    billing: BillingArgs,
}

impl CostsArgs {
    pub fn run(self) -> Result {
        let billing = self.billing.load()?;
        let costs = billing.calculator().calculate_costs()?;
        info!(n_intervals = costs.len(), "calculated");
        self.billing.output.print(costs.as_slice(), build_costs_table)
    }
}
