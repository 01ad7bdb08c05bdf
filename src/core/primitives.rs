use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{TickError, TickResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> TickResult<f64> {
    value.to_f64().ok_or_else(|| {
        TickError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Whole seconds since the unix epoch, floored.
#[must_use]
pub fn datetime_to_unix_seconds(time: NaiveDateTime) -> i64 {
    time.and_utc().timestamp()
}

pub fn unix_seconds_to_datetime(seconds: i64) -> TickResult<NaiveDateTime> {
    chrono::DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| TickError::CalendarOverflow(format!("{seconds} s since epoch")))
}

#[must_use]
pub fn date_at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Rounds to `decimals` fractional digits.
///
/// Values whose scaled magnitude is beyond the exact-integer range of `f64`
/// carry no representable digits at that position and are returned as-is.
#[must_use]
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }
    let rounded = scaled.round() / factor;
    // Normalize negative zero so labels never read "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Evenly spaced values from `start` to `stop` inclusive, `count` points.
///
/// The last point is pinned to `stop` so accumulated error never moves the
/// end of the span.
#[must_use]
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / ((count - 1) as f64);
            let mut values: Vec<f64> = (0..count).map(|i| start + step * (i as f64)).collect();
            values[count - 1] = stop;
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{linspace, round_to_decimals};
    use approx::assert_relative_eq;

    #[test]
    fn rounding_absorbs_accumulated_float_noise() {
        assert_eq!(round_to_decimals(0.1 + 0.2, 9), 0.3);
        assert_eq!(round_to_decimals(-0.000_000_000_1, 9), 0.0);
        assert!(round_to_decimals(-0.000_000_000_1, 9).is_sign_positive());
    }

    #[test]
    fn rounding_leaves_huge_values_untouched() {
        assert_eq!(round_to_decimals(1.234_567e300, 15), 1.234_567e300);
    }

    #[test]
    fn linspace_pins_both_ends() {
        let values = linspace(0.0, 0.3, 4);
        assert_eq!(values.len(), 4);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[3], 0.3);
        assert_relative_eq!(values[1], 0.1, epsilon = 1e-12);
    }
}
