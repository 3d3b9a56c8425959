use chrono::{Local, NaiveDateTime};

use crate::{
    core::PriceRecord,
    ingest::{clock::WallClock, deduplicate, number::parse_decimal, table::Table},
    prelude::*,
    quantity::price::MegawattHourPrice,
};

/// Column bindings of the day-ahead auction export.
#[must_use]
#[derive(Clone, Debug)]
pub struct PriceSchema {
    /// Interval start as local wall-clock time, `dd.mm.YYYY HH:MM:SS`.
    ///
    /// The export prefixes the first header with a byte-order mark, which is ignored when binding.
    pub time: String,

    /// Auction price in €/MWh, decimal comma allowed.
    pub price: String,
}

impl PriceSchema {
    pub const DEFAULT_TIME_COLUMN: &'static str = "Zeit von [CET/CEST]";
    pub const DEFAULT_PRICE_COLUMN: &'static str = "Preis MC Auktion [EUR/MWh]";

    const TIME_FORMATS: [&'static str; 2] = ["%d.%m.%Y %H:%M:%S", "%d.%m.%Y %H:%M"];

    /// Map the raw table onto price records.
    ///
    /// Rows with an unreadable time or a blank price are dropped.
    /// A price that is present but not a number fails the whole file.
    #[instrument(skip_all)]
    pub fn parse(&self, table: &Table) -> Result<Vec<PriceRecord>> {
        let time_column = table.column(&self.time)?;
        let price_column = table.column(&self.price)?;

        let mut clock = WallClock::new(Local);
        let mut records = Vec::with_capacity(table.len());
        let mut n_dropped = 0_usize;
        for row in table.rows() {
            let Some(time) = row.get(time_column).and_then(Self::parse_time) else {
                trace!(row.line, "dropping a price row without a usable time");
                n_dropped += 1;
                continue;
            };
            let Some(raw_price) = row.get(price_column) else {
                trace!(row.line, "dropping a price row without a price");
                n_dropped += 1;
                continue;
            };
            let price = parse_decimal(raw_price).with_context(|| {
                format!("`{}` on line {}: `{raw_price}` is not a number", self.price, row.line)
            })?;
            let Some(timestamp) = clock.resolve(time) else {
                warn!(%time, row.line, "skipping a wall-clock time that does not exist locally");
                n_dropped += 1;
                continue;
            };
            records.push(PriceRecord { timestamp, price: MegawattHourPrice(price) });
        }
        if n_dropped != 0 {
            warn!(n_dropped, "dropped unusable price rows");
        }

        let n_duplicates = deduplicate(&mut records, |record| record.timestamp);
        if n_duplicates != 0 {
            warn!(n_duplicates, "dropped repeated price timestamps");
        }
        info!(n_records = records.len(), "parsed prices");
        Ok(records)
    }

    fn parse_time(text: &str) -> Option<NaiveDateTime> {
        Self::TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    }
}

impl Default for PriceSchema {
    fn default() -> Self {
        Self {
            time: Self::DEFAULT_TIME_COLUMN.to_owned(),
            price: Self::DEFAULT_PRICE_COLUMN.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{DateTime, TimeZone};

    use super::*;

    const HEADERS: [&str; 3] =
        ["\u{feff}Zeit von [CET/CEST]", "Zeit bis [CET/CEST]", "Preis MC Auktion [EUR/MWh]"];

    fn local(text: &str) -> DateTime<Local> {
        Local
            .from_local_datetime(&NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M").unwrap())
            .earliest()
            .unwrap()
    }

    #[test]
    fn test_parse_with_bom() -> Result {
        let table = Table::from_rows(
            &HEADERS,
            &[
                &["01.01.2025 00:00:00", "01.01.2025 00:15:00", "101,23"],
                &["01.01.2025 00:15:00", "01.01.2025 00:30:00", "-5,5"],
            ],
        );
        let records = PriceSchema::default().parse(&table)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp, local("2025-01-01 00:00"));
        assert_abs_diff_eq!(records[0].price.0, 101.23);
        assert_eq!(records[1].timestamp, local("2025-01-01 00:15"));
        assert_abs_diff_eq!(records[1].price.0, -5.5);
        Ok(())
    }

    #[test]
    fn test_parse_without_bom() -> Result {
        let table = Table::from_rows(
            &["Zeit von [CET/CEST]", "Preis MC Auktion [EUR/MWh]"],
            &[&["31.12.2024 23:45", "87"]],
        );
        let records = PriceSchema::default().parse(&table)?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, local("2024-12-31 23:45"));
        Ok(())
    }

    #[test]
    fn test_unusable_times_and_blank_prices_are_dropped() -> Result {
        let table = Table::from_rows(
            &HEADERS,
            &[
                &["garbage", "", "1,0"],
                &["01.01.2025 00:00:00", "", ""],
                &["01.01.2025 00:15:00", "", "2,0"],
            ],
        );
        let records = PriceSchema::default().parse(&table)?;
        assert_eq!(records.len(), 1);
        assert_abs_diff_eq!(records[0].price.0, 2.0);
        Ok(())
    }

    #[test]
    fn test_malformed_price_fails() {
        let table = Table::from_rows(&HEADERS, &[&["01.01.2025 00:00:00", "", "12,3,4"]]);
        let error = PriceSchema::default().parse(&table).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("`Preis MC Auktion [EUR/MWh]`"), "{message}");
        assert!(message.contains("line 2"), "{message}");
    }

    #[test]
    fn test_non_finite_price_fails() {
        for raw_price in ["NaN", "inf", "-inf"] {
            let table = Table::from_rows(&HEADERS, &[&["01.01.2025 00:00:00", "", raw_price]]);
            let message = PriceSchema::default().parse(&table).unwrap_err().to_string();
            assert!(message.contains("`Preis MC Auktion [EUR/MWh]`"), "{message}");
            assert!(message.contains("line 2"), "{message}");
        }
    }

    #[test]
    fn test_missing_column() {
        let table = Table::from_rows(&["Zeit von [CET/CEST]", "Preis"], &[]);
        let error = PriceSchema::default().parse(&table).unwrap_err();
        assert!(error.to_string().contains("`Preis MC Auktion [EUR/MWh]`"), "{error:#}");
    }
}
