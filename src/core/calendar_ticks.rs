//! Nice tick placement for calendar data.
//!
//! Works like the numeric engine but in calendar units: the interval is chosen
//! from [`INTERVAL_TABLE`], ticks are stepped with calendar arithmetic and
//! minor ticks are spread evenly in elapsed seconds.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::core::calendar_interval::{CalendarInterval, CalendarUnit, INTERVAL_TABLE};
use crate::core::calendar_labels::calendar_tick_labels;
use crate::core::primitives::{datetime_to_unix_seconds, linspace, unix_seconds_to_datetime};
use crate::core::range::ProcessedRange;
use crate::core::tick_plan::{TickEngine, TickPlan, reconcile_caps, without_majors};
use crate::error::{TickError, TickResult};

/// Fraction of a tick interval the data must keep from the outermost ticks
/// before one more interval is added on that side.
pub const CALENDAR_SLACK_FRACTION: f64 = 1.0 / 3.0;

/// Upper bound on generated ticks, reached only with explicitly forced intervals.
pub const MAX_CALENDAR_TICKS: usize = 100_000;

/// What the calendar engine reads from a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDomain {
    pub limits: (NaiveDateTime, NaiveDateTime),
    pub capped: (bool, bool),
    pub data_extent: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl CalendarDomain {
    #[must_use]
    pub fn new(limits: (NaiveDateTime, NaiveDateTime)) -> Self {
        Self {
            limits,
            capped: (false, false),
            data_extent: Some(limits),
        }
    }

    #[must_use]
    pub fn with_capped(mut self, lower: bool, upper: bool) -> Self {
        self.capped = (lower, upper);
        self
    }

    #[must_use]
    pub fn with_data_extent(
        mut self,
        data_extent: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> Self {
        self.data_extent = data_extent;
        self
    }

    /// Whole seconds between the limits; must be positive to place ticks.
    #[must_use]
    pub fn span_seconds(&self) -> i64 {
        datetime_to_unix_seconds(self.limits.1) - datetime_to_unix_seconds(self.limits.0)
    }

    fn checked_span_seconds(&self) -> TickResult<i64> {
        let seconds = self.span_seconds();
        if seconds <= 0 {
            return Err(TickError::DegenerateSpan { seconds });
        }
        Ok(seconds)
    }
}

impl From<&ProcessedRange<NaiveDateTime>> for CalendarDomain {
    fn from(range: &ProcessedRange<NaiveDateTime>) -> Self {
        Self {
            limits: range.limits,
            capped: range.capped,
            data_extent: range.data_extent(),
        }
    }
}

/// Chooses the table interval whose tick count over the span is closest to
/// `requested`, comparing `ln(count) / ln(requested)` against one.
///
/// A request for a single tick is scored as a request for two, since the
/// ratio is undefined at one.
pub fn nice_calendar_interval(
    domain: &CalendarDomain,
    requested: usize,
) -> TickResult<CalendarInterval> {
    if requested == 0 {
        return Err(TickError::InvalidTickCount(requested));
    }
    let span = domain.checked_span_seconds()? as f64;
    let target = (requested.max(2) as f64).ln();

    let mut count = span;
    let mut best: Option<(CalendarInterval, f64)> = None;
    for (interval, divisor) in INTERVAL_TABLE {
        count /= divisor;
        let score = (1.0 - count.ln() / target).abs();
        if best.is_none_or(|(_, best_score)| score < best_score) {
            best = Some((interval, score));
        }
    }

    best.map(|(interval, _)| interval)
        .ok_or_else(|| TickError::InvalidData("calendar interval table is empty".to_owned()))
}

/// Lower limit truncated to the interval's unit, upper limit truncated and
/// advanced by one unit.
pub fn nice_calendar_endpoints(
    domain: &CalendarDomain,
    interval: CalendarInterval,
) -> TickResult<(NaiveDateTime, NaiveDateTime)> {
    let (lower, upper) = domain.limits;
    let start = interval.truncate(lower)?;
    let one_unit = match interval.unit {
        CalendarUnit::Week => 7,
        _ => 1,
    };
    let stop = interval.advance(interval.truncate(upper)?, one_unit)?;
    Ok((start, stop))
}

/// Major ticks for an explicit interval, before cap reconciliation.
///
/// Ticks start at the aligned start and step until reaching the upper limit.
/// When the data leaves less than [`CALENDAR_SLACK_FRACTION`] of an interval
/// of slack beyond the first or last tick, one more interval is added there.
pub fn calendar_major_ticks(
    domain: &CalendarDomain,
    interval: CalendarInterval,
) -> TickResult<Vec<NaiveDateTime>> {
    domain.checked_span_seconds()?;
    let (lower, upper) = domain.limits;
    let step = interval.step_units();

    let mut ticks = vec![interval.aligned_start(lower)?];
    let mut last = ticks[0];
    while last < upper {
        if ticks.len() >= MAX_CALENDAR_TICKS {
            return Err(TickError::TooManyTicks {
                max: MAX_CALENDAR_TICKS,
            });
        }
        last = interval.advance(last, step)?;
        ticks.push(last);
    }

    let Some((data_min, data_max)) = domain.data_extent else {
        return Ok(ticks);
    };
    let (first, last) = (ticks[0], ticks[ticks.len() - 1]);
    let last_interval = if ticks.len() >= 2 {
        datetime_to_unix_seconds(last) - datetime_to_unix_seconds(ticks[ticks.len() - 2])
    } else {
        0
    };
    if last_interval <= 0 {
        return Ok(ticks);
    }

    let leading = datetime_to_unix_seconds(data_min) - datetime_to_unix_seconds(first);
    let trailing = datetime_to_unix_seconds(last) - datetime_to_unix_seconds(data_max);
    let leading_fraction = leading as f64 / last_interval as f64;
    let trailing_fraction = trailing as f64 / last_interval as f64;
    if leading_fraction > 0.0 && leading_fraction <= CALENDAR_SLACK_FRACTION {
        ticks.insert(0, interval.advance(first, -step)?);
    }
    if trailing_fraction > 0.0 && trailing_fraction <= CALENDAR_SLACK_FRACTION {
        ticks.push(interval.advance(last, step)?);
    }
    Ok(ticks)
}

/// How the span between majors is subdivided for a given interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinorSubdivision {
    /// Minor ticks coincide with the majors, leaving no distinct minors.
    None,
    /// Evenly split each major gap in elapsed seconds.
    Even(u32),
    /// Month-based majors take minors from a finer month interval.
    Months(u32),
}

/// Subdivision rule for the minors between majors of `interval`.
///
/// Single units split by a fixed count per unit (months have none). Multiples
/// divisible by three are split more coarsely for seconds, minutes and hours;
/// decade-scale years split by their leading digit like numeric steps.
#[must_use]
pub fn minor_subdivision(interval: CalendarInterval) -> MinorSubdivision {
    let multiple = interval.multiple.max(1);
    let parts = if multiple == 1 {
        match interval.unit {
            CalendarUnit::Second => Some(5),
            CalendarUnit::Minute | CalendarUnit::Hour | CalendarUnit::Day => Some(4),
            CalendarUnit::Week => Some(7),
            CalendarUnit::Month => None,
            CalendarUnit::Year => Some(4),
        }
    } else {
        match interval.unit {
            CalendarUnit::Second | CalendarUnit::Minute if multiple % 3 == 0 => Some(multiple / 5),
            CalendarUnit::Hour if multiple % 3 == 0 => Some(multiple / 3),
            CalendarUnit::Year if multiple >= 10 => {
                let leading = multiple / 10_u32.pow(multiple.ilog10());
                Some(match leading {
                    1 => 5,
                    2 => 4,
                    other => other,
                })
            }
            _ => Some(multiple),
        }
    };

    match (interval.unit, parts) {
        (_, None) => MinorSubdivision::None,
        (CalendarUnit::Month, Some(parts)) => MinorSubdivision::Months((parts / 3).max(1)),
        (_, Some(parts)) => MinorSubdivision::Even(parts.max(1)),
    }
}

/// Minor ticks for raw (uncapped) majors.
pub fn calendar_minor_ticks(
    domain: &CalendarDomain,
    majors: &[NaiveDateTime],
    interval: CalendarInterval,
) -> TickResult<Vec<NaiveDateTime>> {
    match minor_subdivision(interval) {
        MinorSubdivision::None => Ok(majors.to_vec()),
        MinorSubdivision::Months(multiple) => {
            let finer = CalendarInterval::new(CalendarUnit::Month, multiple);
            let ticks = calendar_major_ticks(domain, finer)?;
            Ok(reconcile_caps(ticks, domain.limits, domain.capped))
        }
        MinorSubdivision::Even(parts) => {
            let (Some(&first), Some(&last)) = (majors.first(), majors.last()) else {
                return Ok(Vec::new());
            };
            let count = parts as usize * (majors.len() - 1) + 1;
            linspace(
                datetime_to_unix_seconds(first) as f64,
                datetime_to_unix_seconds(last) as f64,
                count,
            )
            .into_iter()
            .map(|seconds| unix_seconds_to_datetime(seconds.floor() as i64))
            .collect()
        }
    }
}

/// Capped majors and de-duplicated capped minors for an explicit interval.
pub fn calendar_tick_values(
    domain: &CalendarDomain,
    interval: CalendarInterval,
) -> TickResult<(Vec<NaiveDateTime>, Vec<NaiveDateTime>)> {
    let majors = calendar_major_ticks(domain, interval)?;
    let minors = calendar_minor_ticks(domain, &majors, interval)?;
    let majors = reconcile_caps(majors, domain.limits, domain.capped);
    let minors = reconcile_caps(minors, domain.limits, domain.capped);
    let minors = without_majors(minors, &majors, |a, b| a == b);
    Ok((majors, minors))
}

/// Full calendar plan: interval selection, ticks, labels, suffix and limits.
pub fn calendar_tick_plan(
    domain: &CalendarDomain,
    requested: usize,
) -> TickResult<TickPlan<NaiveDateTime>> {
    let interval = nice_calendar_interval(domain, requested)?;
    let (majors, minors) = calendar_tick_values(domain, interval)?;
    let (labels, suffix) = calendar_tick_labels(&majors, interval.unit);
    debug!(
        %interval,
        span_seconds = domain.span_seconds(),
        major_count = majors.len(),
        minor_count = minors.len(),
        "calendar ticks"
    );
    TickPlan::assemble(majors, minors, labels, suffix)
}

/// Calendar implementation of [`TickEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarTickEngine {
    pub domain: CalendarDomain,
}

impl CalendarTickEngine {
    #[must_use]
    pub fn new(domain: CalendarDomain) -> Self {
        Self { domain }
    }
}

impl TickEngine for CalendarTickEngine {
    type Value = NaiveDateTime;

    fn tick_plan(&self, requested: usize) -> TickResult<TickPlan<NaiveDateTime>> {
        calendar_tick_plan(&self.domain, requested)
    }
}
