use chrono::Local;

use crate::{
    core::ConsumptionRecord,
    ingest::{
        clock::WallClock,
        deduplicate,
        number::{parse_decimal, parse_epoch_seconds},
        table::Table,
    },
    prelude::*,
    quantity::energy::KilowattHours,
};

/// Column bindings of the metering point export.
#[must_use]
#[derive(Clone, Debug)]
pub struct ConsumptionSchema {
    /// Interval start as local wall-clock time, written as Unix epoch seconds.
    pub timestamp: String,

    /// Interval consumption in kilowatt-hours, decimal comma allowed.
    pub consumption: String,
}

impl ConsumptionSchema {
    pub const DEFAULT_TIMESTAMP_COLUMN: &'static str = "Timestamp";
    pub const DEFAULT_CONSUMPTION_COLUMN: &'static str = "Verbrauch";

    /// Map the raw table onto consumption records.
    ///
    /// Timestamps resolve on the local clock the same way the price times do.
    /// Rows without a usable timestamp or with a missing, negative or non-finite
    /// consumption are dropped. Repeated timestamps keep their first row.
    #[instrument(skip_all)]
    pub fn parse(&self, table: &Table) -> Result<Vec<ConsumptionRecord>> {
        let timestamp_column = table.column(&self.timestamp)?;
        let consumption_column = table.column(&self.consumption)?;

        let mut clock = WallClock::new(Local);
        let mut records = Vec::with_capacity(table.len());
        let mut n_dropped = 0_usize;
        for row in table.rows() {
            let timestamp = row
                .get(timestamp_column)
                .and_then(parse_epoch_seconds)
                .and_then(|time| clock.resolve(time));
            let consumption = row
                .get(consumption_column)
                .and_then(parse_decimal)
                .filter(|value| *value >= 0.0);
            if let (Some(timestamp), Some(consumption)) = (timestamp, consumption) {
                records.push(ConsumptionRecord { timestamp, consumption: KilowattHours(consumption) });
            } else {
                trace!(row.line, "dropping an unusable consumption row");
                n_dropped += 1;
            }
        }
        if n_dropped != 0 {
            warn!(n_dropped, "dropped unusable consumption rows");
        }

        let n_duplicates = deduplicate(&mut records, |record| record.timestamp);
        if n_duplicates != 0 {
            warn!(n_duplicates, "dropped repeated consumption timestamps");
        }
        info!(n_records = records.len(), "parsed consumption");
        Ok(records)
    }
}

impl Default for ConsumptionSchema {
    fn default() -> Self {
        Self {
            timestamp: Self::DEFAULT_TIMESTAMP_COLUMN.to_owned(),
            consumption: Self::DEFAULT_CONSUMPTION_COLUMN.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{DateTime, NaiveDateTime, TimeZone};

    use super::*;

    /// Local instant of the wall-clock time encoded in the epoch seconds.
    fn local(seconds: i64) -> DateTime<Local> {
        let time = DateTime::from_timestamp(seconds, 0).unwrap().naive_utc();
        Local.from_local_datetime(&time).earliest().unwrap()
    }

    #[test]
    fn test_parse() -> Result {
        let table = Table::from_rows(
            &["Zählpunkt", "Timestamp", "Verbrauch"],
            &[
                &["AT001", "1704067200", "0,125"],
                &["AT001", "1704068100", "0.25"],
                &["AT001", "1704069000", "1"],
            ],
        );
        let records = ConsumptionSchema::default().parse(&table)?;
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].timestamp, local(1_704_067_200));
        assert_abs_diff_eq!(records[0].consumption.0, 0.125);
        assert_abs_diff_eq!(records[1].consumption.0, 0.25);
        assert_abs_diff_eq!(records[2].consumption.0, 1.0);
        Ok(())
    }

    #[test]
    fn test_timestamp_is_local_wall_clock() -> Result {
        let table = Table::from_rows(
            &["datum", "Timestamp", "Verbrauch"],
            &[&["05.07.2025 00:00", "1751673600", "0,135"]],
        );
        let records = ConsumptionSchema::default().parse(&table)?;
        let expected = NaiveDateTime::parse_from_str("05.07.2025 00:00", "%d.%m.%Y %H:%M")?;
        assert_eq!(records[0].timestamp.naive_local(), expected);
        Ok(())
    }

    #[test]
    fn test_unusable_rows_are_dropped() -> Result {
        let table = Table::from_rows(
            &["Timestamp", "Verbrauch"],
            &[
                &["1704067200", "0,1"],
                &["", "0,2"],
                &["not a timestamp", "0,3"],
                &["1704068100", ""],
                &["1704069000", "abc"],
                &["1704069900", "-0,5"],
                &["1704070800", "NaN"],
                &["1704071700", "0,4"],
            ],
        );
        let records = ConsumptionSchema::default().parse(&table)?;
        let timestamps: Vec<_> = records.iter().map(|record| record.timestamp).collect();
        assert_eq!(timestamps, [local(1_704_067_200), local(1_704_071_700)]);
        Ok(())
    }

    #[test]
    fn test_sorted_and_deduplicated() -> Result {
        let table = Table::from_rows(
            &["Timestamp", "Verbrauch"],
            &[&["1704068100", "2"], &["1704067200", "1"], &["1704068100", "3"]],
        );
        let records = ConsumptionSchema::default().parse(&table)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp, local(1_704_067_200));
        assert_abs_diff_eq!(records[1].consumption.0, 2.0);
        Ok(())
    }

    #[test]
    fn test_custom_bindings() -> Result {
        let table = Table::from_rows(&["time", "kwh"], &[&["1704067200", "0,5"]]);
        let schema =
            ConsumptionSchema { timestamp: "time".to_owned(), consumption: "kwh".to_owned() };
        assert_eq!(schema.parse(&table)?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_column() {
        let table = Table::from_rows(&["Timestamp", "Consumption"], &[]);
        let error = ConsumptionSchema::default().parse(&table).unwrap_err();
        assert!(error.to_string().contains("`Verbrauch`"), "{error:#}");
    }
}
