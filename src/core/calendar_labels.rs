use chrono::{Datelike, NaiveDateTime};

use crate::core::calendar_interval::CalendarUnit;
use crate::core::primitives::datetime_to_unix_seconds;

/// strftime patterns used for one tick unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LabelPatterns {
    /// First tick of the axis.
    first: &'static str,
    /// Tick where the next-higher calendar field changed.
    rollover: &'static str,
    /// Any other tick.
    short: &'static str,
    /// Shared context taken from the first tick.
    suffix: Option<&'static str>,
}

fn label_patterns(unit: CalendarUnit) -> LabelPatterns {
    let (first, rollover, short, suffix) = match unit {
        CalendarUnit::Second => ("%Mm %Ss", "%Mm %Ss", "%Ss", Some("%Y/%m/%d %Hh")),
        CalendarUnit::Minute => ("%Hh %Mm", "%Hh %Mm", "%Mm", Some("%Y/%m/%d")),
        CalendarUnit::Hour => ("%a %d %Hh", "%a %d %Hh", "%Hh", Some("%Y/%m")),
        CalendarUnit::Day => ("%b %a %d", "%b %a %d", "%a %d", Some("%Y")),
        CalendarUnit::Week => ("%b %a %d", "%b %a %d", "%d", Some("%Y")),
        CalendarUnit::Month => ("%Y %b", "%Y", "%b", None),
        CalendarUnit::Year => ("%Y", "%Y", "%Y", None),
    };
    LabelPatterns {
        first,
        rollover,
        short,
        suffix,
    }
}

/// Value of the next-higher calendar field, used to detect rollovers.
fn context_key(unit: CalendarUnit, tick: NaiveDateTime) -> Option<i64> {
    let seconds = datetime_to_unix_seconds(tick);
    match unit {
        CalendarUnit::Second => Some(seconds.div_euclid(60)),
        CalendarUnit::Minute => Some(seconds.div_euclid(3_600)),
        CalendarUnit::Hour => Some(seconds.div_euclid(86_400)),
        CalendarUnit::Day | CalendarUnit::Week => {
            Some(i64::from(tick.year()) * 12 + i64::from(tick.month0()))
        }
        CalendarUnit::Month => Some(i64::from(tick.year())),
        CalendarUnit::Year => None,
    }
}

#[derive(Debug, Default)]
struct LabelFold {
    labels: Vec<String>,
    context: Option<i64>,
}

/// Context-sensitive labels for calendar majors.
///
/// The first tick gets the full label for its unit, later ticks only show the
/// field that changed unless the next-higher field rolled over since the
/// previous tick. The returned suffix carries the constant higher-order context.
#[must_use]
pub fn calendar_tick_labels(ticks: &[NaiveDateTime], unit: CalendarUnit) -> (Vec<String>, String) {
    let patterns = label_patterns(unit);
    let folded = ticks.iter().fold(
        LabelFold {
            labels: Vec::with_capacity(ticks.len()),
            context: None,
        },
        |mut state, tick| {
            let context = context_key(unit, *tick);
            let pattern = if state.labels.is_empty() {
                patterns.first
            } else if context != state.context {
                patterns.rollover
            } else {
                patterns.short
            };
            state.labels.push(tick.format(pattern).to_string());
            state.context = context;
            state
        },
    );

    let suffix = match (patterns.suffix, ticks.first()) {
        (Some(pattern), Some(first)) => first.format(pattern).to_string(),
        _ => String::new(),
    };
    (folded.labels, suffix)
}

#[cfg(test)]
mod tests {
    use super::calendar_tick_labels;
    use crate::core::calendar_interval::CalendarUnit;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, 0))
            .expect("valid datetime")
    }

    #[test]
    fn minute_axis_repeats_hour_on_rollover() {
        let ticks = [
            at(2024, 3, 5, 10, 30),
            at(2024, 3, 5, 10, 45),
            at(2024, 3, 5, 11, 0),
            at(2024, 3, 5, 11, 15),
        ];
        let (labels, suffix) = calendar_tick_labels(&ticks, CalendarUnit::Minute);
        assert_eq!(labels, vec!["10h 30m", "45m", "11h 00m", "15m"]);
        assert_eq!(suffix, "2024/03/05");
    }

    #[test]
    fn month_axis_shows_year_on_january() {
        let ticks = [
            at(2023, 10, 1, 0, 0),
            at(2024, 1, 1, 0, 0),
            at(2024, 4, 1, 0, 0),
        ];
        let (labels, suffix) = calendar_tick_labels(&ticks, CalendarUnit::Month);
        assert_eq!(labels, vec!["2023 Oct", "2024", "Apr"]);
        assert!(suffix.is_empty());
    }

    #[test]
    fn week_axis_names_month_when_it_changes() {
        let ticks = [
            at(2024, 2, 18, 0, 0),
            at(2024, 2, 25, 0, 0),
            at(2024, 3, 3, 0, 0),
        ];
        let (labels, suffix) = calendar_tick_labels(&ticks, CalendarUnit::Week);
        assert_eq!(labels, vec!["Feb Sun 18", "25", "Mar Sun 03"]);
        assert_eq!(suffix, "2024");
    }

    #[test]
    fn day_axis_names_month_on_the_first() {
        let ticks = [
            at(2024, 2, 28, 0, 0),
            at(2024, 2, 29, 0, 0),
            at(2024, 3, 1, 0, 0),
            at(2024, 3, 2, 0, 0),
        ];
        let (labels, suffix) = calendar_tick_labels(&ticks, CalendarUnit::Day);
        assert_eq!(labels, vec!["Feb Wed 28", "Thu 29", "Mar Fri 01", "Sat 02"]);
        assert_eq!(suffix, "2024");
    }

    #[test]
    fn second_axis_repeats_minute_on_rollover() {
        let base = at(2024, 3, 5, 10, 59);
        let ticks = [
            base + TimeDelta::seconds(50),
            base + TimeDelta::seconds(55),
            base + TimeDelta::seconds(60),
            base + TimeDelta::seconds(65),
        ];
        let (labels, suffix) = calendar_tick_labels(&ticks, CalendarUnit::Second);
        assert_eq!(labels, vec!["59m 50s", "55s", "00m 00s", "05s"]);
        assert_eq!(suffix, "2024/03/05 10h");
    }

    #[test]
    fn empty_ticks_have_no_labels() {
        let (labels, suffix) = calendar_tick_labels(&[], CalendarUnit::Hour);
        assert!(labels.is_empty());
        assert!(suffix.is_empty());
    }
}
