use chrono::NaiveDate;
use clap::Parser;

use crate::{
    analysis::{DateRange, RangePreset},
    core::ConsumptionRecord,
    prelude::*,
};

#[derive(Copy, Clone, Parser)]
pub struct RangeArgs {
    /// Preset relative to the latest consumption date.
    #[clap(long, env = "RANGE", value_enum, default_value_t)]
    range: RangePreset,

    /// First date to include, overrides the preset start.
    #[clap(long, env = "SINCE")]
    since: Option<NaiveDate>,

    /// Last date to include, overrides the preset end.
    #[clap(long, env = "UNTIL")]
    until: Option<NaiveDate>,
}

impl RangeArgs {
    /// Resolve the range against the consumption data and select the records inside it.
    #[instrument(skip_all)]
    pub fn select(
        self,
        consumption: &[ConsumptionRecord],
    ) -> Result<(DateRange, Vec<ConsumptionRecord>)> {
        let bounds = DateRange::of(consumption).context("no consumption data")?;
        let range = self.range.resolve(bounds, self.since, self.until)?;
        let selection = range.select(consumption);
        ensure!(
            !selection.is_empty(),
            "no consumption data from {} to {} (available: {} to {})",
            range.start,
            range.end,
            bounds.start,
            bounds.end,
        );
        info!(%range.start, %range.end, n_records = selection.len(), "selected");
        Ok((range, selection))
    }
}
