use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    analysis::{ConsumptionProfile, Overview, PeakComparison},
    core::{CostedRecord, MonthlyTotal},
    fmt::{FormattedCents, FormattedOption, FormattedPercentage},
    quantity::{currency::Euro, energy::KilowattHours},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn right(content: impl ToString) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}

/// Monthly bills, the more expensive months in red, followed by the grand total.
pub fn build_monthly_table(totals: &[MonthlyTotal]) -> Table {
    #[expect(clippy::cast_precision_loss)]
    let mean_cost = totals.iter().map(|total| total.total_cost).sum::<Euro>()
        / totals.len().max(1) as f64;

    let mut table = new_table();
    table.set_header(vec![
        "Month",
        "Intervals",
        "Consumption",
        "Market",
        "Variable fee",
        "Fixed fee",
        "Grid base",
        "Grid work",
        "Total",
        "Average",
    ]);
    for total in totals {
        table.add_row(vec![
            Cell::new(total.month),
            right(total.n_intervals).add_attribute(Attribute::Dim),
            right(total.consumption),
            right(total.market_cost).fg(if total.market_cost < Euro::ZERO {
                Color::Green
            } else {
                Color::Reset
            }),
            right(total.variable_fee),
            right(total.fixed_fee).add_attribute(Attribute::Dim),
            right(total.grid_base_fee).add_attribute(Attribute::Dim),
            right(total.grid_work_fee),
            right(total.total_cost).fg(if total.total_cost > mean_cost {
                Color::Red
            } else {
                Color::Green
            }),
            right(FormattedOption(total.average_price().map(FormattedCents))),
        ]);
    }

    let consumption: KilowattHours = totals.iter().map(|total| total.consumption).sum();
    let total_cost: Euro = totals.iter().map(|total| total.total_cost).sum();
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        right(totals.iter().map(|total| total.n_intervals).sum::<usize>()),
        right(consumption).add_attribute(Attribute::Bold),
        right(totals.iter().map(|total| total.market_cost).sum::<Euro>()),
        right(totals.iter().map(|total| total.variable_fee).sum::<Euro>()),
        right(totals.iter().map(|total| total.fixed_fee).sum::<Euro>()),
        right(totals.iter().map(|total| total.grid_base_fee).sum::<Euro>()),
        right(totals.iter().map(|total| total.grid_work_fee).sum::<Euro>()),
        right(total_cost).add_attribute(Attribute::Bold),
        right(FormattedOption(
            (consumption > KilowattHours::ZERO).then(|| FormattedCents(total_cost / consumption)),
        )),
    ]);
    table
}

pub fn build_overview_table(overview: &Overview) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", ""]);
    let rows: [(&str, String); 12] = [
        ("From", overview.range.start.to_string()),
        ("Until", overview.range.end.to_string()),
        ("Intervals", overview.n_intervals.to_string()),
        ("Total consumption", overview.total_consumption.to_string()),
        ("Mean per interval", overview.mean_consumption.to_string()),
        ("Min per interval", overview.min_consumption.to_string()),
        ("Max per interval", overview.max_consumption.to_string()),
        ("Months", overview.n_months.to_string()),
        ("Total cost", overview.total_cost.to_string()),
        ("Monthly consumption", overview.monthly_consumption.to_string()),
        ("Monthly cost", overview.monthly_cost.to_string()),
        ("Average price", FormattedOption(overview.average_price.map(FormattedCents)).to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name).add_attribute(Attribute::Dim), right(value)]);
    }
    table
}

pub fn build_profile_table(profile: &ConsumptionProfile) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Time".to_owned(),
        "Selected".to_owned(),
        format!("All data ×{:.3}", profile.scaling_factor),
    ]);
    for slot in &profile.slots {
        table.add_row(vec![
            Cell::new(slot.time.format("%H:%M")),
            right(slot.selected).fg(if slot.selected > slot.reference {
                Color::Red
            } else {
                Color::Green
            }),
            right(slot.reference).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_peak_table(comparison: &PeakComparison) -> Table {
    let windows =
        comparison.windows.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    let mut table = new_table();
    table.set_header(vec!["Hours", "Windows", "Consumption", "Share"]);
    table.add_row(vec![
        Cell::new("Expensive").fg(Color::Red),
        Cell::new(windows).add_attribute(Attribute::Dim),
        right(comparison.expensive),
        right(FormattedOption(comparison.expensive_share.map(FormattedPercentage))),
    ]);
    table.add_row(vec![
        Cell::new("Cheap").fg(Color::Green),
        Cell::new("the rest").add_attribute(Attribute::Dim),
        right(comparison.cheap),
        right(FormattedOption(comparison.cheap_share.map(FormattedPercentage))),
    ]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        right(comparison.total).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    table
}

pub fn build_costs_table(records: &[CostedRecord]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Date",
        "Start",
        "Consumption",
        "Price",
        "Market",
        "Fee",
        "Total",
        "Grid work",
    ]);
    for record in records {
        let timestamp = record.merged.timestamp;
        table.add_row(vec![
            Cell::new(timestamp.format("%Y-%m-%d")).add_attribute(Attribute::Dim),
            Cell::new(timestamp.format("%H:%M")),
            right(record.merged.consumption),
            right(record.merged.price).fg(if record.merged.price.0 < 0.0 {
                Color::Green
            } else {
                Color::Reset
            }),
            right(record.market_cost),
            right(record.variable_fee).add_attribute(Attribute::Dim),
            right(record.total_cost),
            right(record.grid_work_fee).add_attribute(Attribute::Dim),
        ]);
    }
    table
}
