use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::Serialize;

use crate::error::{TickError, TickResult};

/// Calendar field a tick interval counts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CalendarUnit {
    Second,
    Minute,
    Hour,
    Day,
    /// Sunday-started weeks, stepped in days.
    Week,
    Month,
    Year,
}

impl CalendarUnit {
    fn code(self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Minute => "m",
            Self::Hour => "h",
            Self::Day => "d",
            Self::Week => "w",
            Self::Month => "b",
            Self::Year => "y",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "s" => Self::Second,
            "m" => Self::Minute,
            "h" => Self::Hour,
            "d" => Self::Day,
            "w" => Self::Week,
            "b" => Self::Month,
            "y" => Self::Year,
            _ => return None,
        })
    }
}

/// A tick spacing of `multiple` calendar units, e.g. 15 minutes or 2 weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarInterval {
    pub unit: CalendarUnit,
    pub multiple: u32,
}

const fn interval(unit: CalendarUnit, multiple: u32) -> CalendarInterval {
    CalendarInterval { unit, multiple }
}

/// Candidate intervals from finest to coarsest, each with the factor by which
/// it divides the tick count of the previous entry.
pub const INTERVAL_TABLE: [(CalendarInterval, f64); 31] = [
    (interval(CalendarUnit::Second, 1), 1.0),
    (interval(CalendarUnit::Second, 5), 5.0),
    (interval(CalendarUnit::Second, 15), 3.0),
    (interval(CalendarUnit::Second, 30), 2.0),
    (interval(CalendarUnit::Minute, 1), 2.0),
    (interval(CalendarUnit::Minute, 5), 5.0),
    (interval(CalendarUnit::Minute, 15), 3.0),
    (interval(CalendarUnit::Minute, 30), 2.0),
    (interval(CalendarUnit::Hour, 1), 2.0),
    (interval(CalendarUnit::Hour, 3), 3.0),
    (interval(CalendarUnit::Hour, 6), 2.0),
    (interval(CalendarUnit::Hour, 12), 2.0),
    (interval(CalendarUnit::Day, 1), 2.0),
    (interval(CalendarUnit::Week, 1), 7.0),
    (interval(CalendarUnit::Week, 2), 2.0),
    (interval(CalendarUnit::Month, 1), 2.174),
    (interval(CalendarUnit::Month, 3), 3.0),
    (interval(CalendarUnit::Month, 6), 2.0),
    (interval(CalendarUnit::Year, 1), 2.0),
    (interval(CalendarUnit::Year, 2), 2.0),
    (interval(CalendarUnit::Year, 5), 2.5),
    (interval(CalendarUnit::Year, 10), 2.0),
    (interval(CalendarUnit::Year, 20), 2.0),
    (interval(CalendarUnit::Year, 50), 2.5),
    (interval(CalendarUnit::Year, 100), 2.0),
    (interval(CalendarUnit::Year, 200), 2.0),
    (interval(CalendarUnit::Year, 500), 2.5),
    (interval(CalendarUnit::Year, 1000), 2.0),
    (interval(CalendarUnit::Year, 2000), 2.0),
    (interval(CalendarUnit::Year, 5000), 2.5),
    (interval(CalendarUnit::Year, 10000), 2.0),
];

fn overflow(what: impl fmt::Display) -> TickError {
    TickError::CalendarOverflow(what.to_string())
}

fn at_time(date: NaiveDate, hour: u32, minute: u32, second: u32) -> TickResult<NaiveDateTime> {
    NaiveTime::from_hms_opt(hour, minute, second)
        .map(|time| date.and_time(time))
        .ok_or_else(|| overflow(format!("{hour:02}:{minute:02}:{second:02}")))
}

impl CalendarInterval {
    #[must_use]
    pub const fn new(unit: CalendarUnit, multiple: u32) -> Self {
        Self { unit, multiple }
    }

    /// Number of base units one tick step spans (weeks step in days).
    #[must_use]
    pub fn step_units(self) -> i64 {
        let multiple = i64::from(self.multiple.max(1));
        match self.unit {
            CalendarUnit::Week => multiple * 7,
            _ => multiple,
        }
    }

    /// Truncates `time` down to the start of its unit.
    pub fn truncate(self, time: NaiveDateTime) -> TickResult<NaiveDateTime> {
        let date = time.date();
        match self.unit {
            CalendarUnit::Second => at_time(date, time.hour(), time.minute(), time.second()),
            CalendarUnit::Minute => at_time(date, time.hour(), time.minute(), 0),
            CalendarUnit::Hour => at_time(date, time.hour(), 0, 0),
            CalendarUnit::Day => at_time(date, 0, 0, 0),
            CalendarUnit::Week => {
                let days_back = i64::from(date.weekday().num_days_from_sunday());
                let sunday = date
                    .checked_sub_signed(TimeDelta::days(days_back))
                    .ok_or_else(|| overflow(date))?;
                at_time(sunday, 0, 0, 0)
            }
            CalendarUnit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                .ok_or_else(|| overflow(date))
                .and_then(|start| at_time(start, 0, 0, 0)),
            CalendarUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)
                .ok_or_else(|| overflow(date))
                .and_then(|start| at_time(start, 0, 0, 0)),
        }
    }

    /// Moves `time` by `units` base units (days for weeks); negative moves back.
    pub fn advance(self, time: NaiveDateTime, units: i64) -> TickResult<NaiveDateTime> {
        let delta = match self.unit {
            CalendarUnit::Second => TimeDelta::try_seconds(units),
            CalendarUnit::Minute => TimeDelta::try_minutes(units),
            CalendarUnit::Hour => TimeDelta::try_hours(units),
            CalendarUnit::Day | CalendarUnit::Week => TimeDelta::try_days(units),
            CalendarUnit::Month => return shift_months(time, units),
            CalendarUnit::Year => {
                let months = units.checked_mul(12).ok_or_else(|| overflow(units))?;
                return shift_months(time, months);
            }
        };
        delta
            .and_then(|delta| time.checked_add_signed(delta))
            .ok_or_else(|| overflow(format!("{time} + {units} {:?}", self.unit)))
    }

    /// First tick at or before `lower`.
    ///
    /// Weeks start on Sunday. Other units back up until their calendar field
    /// (second of minute, hour of day, zero-based month, year, ...) is a
    /// multiple of the interval's multiple.
    pub fn aligned_start(self, lower: NaiveDateTime) -> TickResult<NaiveDateTime> {
        let start = self.truncate(lower)?;
        let field = match self.unit {
            CalendarUnit::Week => return Ok(start),
            CalendarUnit::Second => i64::from(start.second()),
            CalendarUnit::Minute => i64::from(start.minute()),
            CalendarUnit::Hour => i64::from(start.hour()),
            CalendarUnit::Day => i64::from(start.day()),
            CalendarUnit::Month => i64::from(start.month0()),
            CalendarUnit::Year => i64::from(start.year()),
        };
        let back = field.rem_euclid(i64::from(self.multiple.max(1)));
        self.advance(start, -back)
    }
}

fn shift_months(time: NaiveDateTime, months: i64) -> TickResult<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).map_err(|_| overflow(months))?;
    let shifted = if months >= 0 {
        time.checked_add_months(Months::new(magnitude))
    } else {
        time.checked_sub_months(Months::new(magnitude))
    };
    shifted.ok_or_else(|| overflow(format!("{time} + {months} months")))
}

impl fmt::Display for CalendarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.multiple == 1 {
            f.write_str(self.unit.code())
        } else {
            write!(f, "{}{}", self.multiple, self.unit.code())
        }
    }
}

impl FromStr for CalendarInterval {
    type Err = TickError;

    /// Parses interval codes such as `s`, `15m`, `3h`, `2w`, `6b` (months) or `50y`.
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let invalid = || TickError::InvalidData(format!("unknown calendar interval `{code}`"));
        let split = code.len().checked_sub(1).ok_or_else(invalid)?;
        if !code.is_char_boundary(split) {
            return Err(invalid());
        }
        let (multiple, unit) = code.split_at(split);
        let unit = CalendarUnit::from_code(unit).ok_or_else(invalid)?;
        let multiple = if multiple.is_empty() {
            1
        } else {
            multiple.parse::<u32>().map_err(|_| invalid())?
        };
        if multiple == 0 {
            return Err(invalid());
        }
        Ok(Self { unit, multiple })
    }
}
