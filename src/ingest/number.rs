use chrono::{DateTime, NaiveDateTime};

/// Parse a number written with either a decimal comma (`0,125`) or a decimal point (`0.125`).
///
/// `NaN` and infinities are rejected.
#[must_use]
pub fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.replace(',', ".").parse().ok().filter(|value: &f64| value.is_finite())
}

/// Parse a wall-clock time written as Unix epoch seconds.
///
/// The metering export encodes the local date and time as if it were UTC,
/// so `1751673600` reads as `2025-07-05 00:00` on the local clock.
/// The seconds are an integer or a whole decimal number.
#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub fn parse_epoch_seconds(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    let seconds = match text.parse::<i64>() {
        Ok(seconds) => seconds,
        Err(_) => {
            let seconds = parse_decimal(text)?;
            if seconds.fract() != 0.0 || seconds.abs() > 1e15 {
                return None;
            }
            seconds as i64
        }
    };
    DateTime::from_timestamp(seconds, 0).map(|timestamp| timestamp.naive_utc())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn time(text: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_decimal_comma() {
        assert_abs_diff_eq!(parse_decimal("0,125").unwrap(), 0.125);
        assert_abs_diff_eq!(parse_decimal(" -12,5 ").unwrap(), -12.5);
    }

    #[test]
    fn test_decimal_point() {
        assert_abs_diff_eq!(parse_decimal("97.31").unwrap(), 97.31);
        assert_abs_diff_eq!(parse_decimal("3").unwrap(), 3.0);
    }

    #[test]
    fn test_decimal_garbage() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("n/a"), None);
        assert_eq!(parse_decimal("1.234,5"), None);
    }

    #[test]
    fn test_decimal_non_finite() {
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("-inf"), None);
        assert_eq!(parse_decimal("infinity"), None);
    }

    #[test]
    fn test_epoch_seconds() {
        let expected = time("2024-01-01 00:00");
        assert_eq!(parse_epoch_seconds("1704067200"), Some(expected));
        assert_eq!(parse_epoch_seconds("1704067200.0"), Some(expected));
        assert_eq!(parse_epoch_seconds("1704067200,0"), Some(expected));
    }

    #[test]
    fn test_epoch_seconds_are_wall_clock() {
        assert_eq!(parse_epoch_seconds("1751673600"), Some(time("2025-07-05 00:00")));
    }

    #[test]
    fn test_epoch_seconds_garbage() {
        assert_eq!(parse_epoch_seconds(""), None);
        assert_eq!(parse_epoch_seconds("01.01.2024"), None);
        assert_eq!(parse_epoch_seconds("1704067200.5"), None);
    }
}
