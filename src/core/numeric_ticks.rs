//! Nice tick placement for discrete and continuous data.
//!
//! The pipeline is `nice_interval` -> `nice_endpoints` -> `nice_major_ticks`
//! -> `nice_minor_ticks`, followed by cap reconciliation and label scaling to
//! an engineering exponent.

use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::primitives::{linspace, round_to_decimals};
use crate::core::range::ProcessedRange;
use crate::core::tick_plan::{TickEngine, TickPlan, reconcile_caps, without_majors};
use crate::error::{TickError, TickResult};

pub const DEFAULT_BASES: [f64; 3] = [1.0, 2.0, 5.0];

/// Fraction of a step the data must keep from a snapped endpoint before the
/// endpoint is pushed out by one more step.
pub const BOUNDARY_SLACK_FRACTION: f64 = 1.0 / 3.0;

const ENDPOINT_DECIMALS: i32 = 15;
const TICK_DECIMALS: i32 = 9;
const GRID_PHASE_DECIMALS: i32 = 5;
const LABEL_DECIMALS: i32 = 5;

/// Minor ticks closer than this fraction of a step to a major are the same tick.
const DEDUP_STEP_FRACTION: f64 = 1e-9;

/// Tuning knobs of the numeric engine.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTickOptions {
    /// Candidate leading digits for the step, tried in order.
    pub bases: SmallVec<[f64; 3]>,
    /// Value an endpoint collapses onto when the data sits far from it on one side.
    pub origin: f64,
}

impl Default for NumericTickOptions {
    fn default() -> Self {
        Self {
            bases: SmallVec::from_buf(DEFAULT_BASES),
            origin: 0.0,
        }
    }
}

impl NumericTickOptions {
    /// Replaces the candidate bases; non-finite and non-positive entries are ignored.
    #[must_use]
    pub fn with_bases(mut self, bases: impl IntoIterator<Item = f64>) -> Self {
        let bases: SmallVec<[f64; 3]> = bases
            .into_iter()
            .filter(|base| base.is_finite() && *base > 0.0)
            .collect();
        if !bases.is_empty() {
            self.bases = bases;
        }
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: f64) -> Self {
        self.origin = origin;
        self
    }
}

/// What the numeric engine reads from a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericDomain {
    pub limits: (f64, f64),
    pub capped: (bool, bool),
    /// Extremes of the working data, `None` when limits filtered out every value.
    pub data_extent: Option<(f64, f64)>,
}

impl NumericDomain {
    #[must_use]
    pub fn new(limits: (f64, f64)) -> Self {
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
    pub fn with_data_extent(mut self, data_extent: Option<(f64, f64)>) -> Self {
        self.data_extent = data_extent;
        self
    }
}

impl From<&ProcessedRange<f64>> for NumericDomain {
    fn from(range: &ProcessedRange<f64>) -> Self {
        Self {
            limits: range.limits,
            capped: range.capped,
            data_extent: range.data_extent(),
        }
    }
}

impl From<&ProcessedRange<i64>> for NumericDomain {
    fn from(range: &ProcessedRange<i64>) -> Self {
        Self {
            limits: (range.limits.0 as f64, range.limits.1 as f64),
            capped: range.capped,
            data_extent: range
                .data_extent()
                .map(|(min, max)| (min as f64, max as f64)),
        }
    }
}

/// Picks the step whose `base x 10^k` lies closest to `span / requested` on a
/// log scale. Ties keep the earliest base.
#[must_use]
pub fn nice_interval(limits: (f64, f64), requested: usize, bases: &[f64]) -> f64 {
    let bases = if bases.is_empty() {
        &DEFAULT_BASES[..]
    } else {
        bases
    };
    let nominal = (limits.1 - limits.0) / requested as f64;

    let mut best: Option<(f64, f64, f64)> = None;
    for &base in bases {
        let power = (nominal / base).log10();
        let distance = (power - power.round()).abs();
        if best.is_none_or(|(_, _, best_distance)| distance < best_distance) {
            best = Some((base, power, distance));
        }
    }

    match best {
        Some((base, power, _)) => base * 10_f64.powi(power.round() as i32),
        None => nominal,
    }
}

/// Snaps the limits outward onto the step grid.
///
/// A bound equal to `origin`, or lying on the same side of it as the other
/// bound at less than half the other's distance, collapses onto `origin`.
/// Unaligned bounds are rounded outward and pushed one more step out when the
/// data comes within [`BOUNDARY_SLACK_FRACTION`] of a step of them.
#[must_use]
pub fn nice_endpoints(domain: &NumericDomain, step: f64, origin: f64) -> (f64, f64) {
    let (mut lower, mut upper) = domain.limits;
    let (lower_rel, upper_rel) = (lower - origin, upper - origin);
    let snap_lower = lower == origin || (lower_rel > 0.0 && upper_rel > 2.0 * lower_rel);
    let snap_upper = upper == origin || (upper_rel < 0.0 && lower_rel < 2.0 * upper_rel);
    if snap_lower {
        lower = origin;
    }
    if snap_upper {
        upper = origin;
    }

    let slack = step * BOUNDARY_SLACK_FRACTION;
    if !is_on_grid(lower, step) {
        lower -= lower.rem_euclid(step);
        if let Some((data_min, _)) = domain.data_extent {
            if data_min < lower + slack {
                lower -= step;
            }
        }
    }
    if !is_on_grid(upper, step) {
        upper += step - upper.rem_euclid(step);
        if let Some((_, data_max)) = domain.data_extent {
            if data_max > upper - slack {
                upper += step;
            }
        }
    }

    (
        round_to_decimals(lower, ENDPOINT_DECIMALS),
        round_to_decimals(upper, ENDPOINT_DECIMALS),
    )
}

fn is_on_grid(value: f64, step: f64) -> bool {
    let phase = round_to_decimals(value.rem_euclid(step) / step, GRID_PHASE_DECIMALS);
    phase == 0.0 || phase == 1.0
}

/// Steps from `lower` by `step` until reaching `upper`.
#[must_use]
pub fn nice_major_ticks(lower: f64, upper: f64, step: f64) -> Vec<f64> {
    let mut ticks = vec![lower];
    let mut last = lower;
    while last < upper {
        let mut next = round_to_decimals(last + step, TICK_DECIMALS);
        if next <= last {
            next = last + step;
        }
        if next <= last {
            warn!(last, step, upper, "tick accumulation stalled; closing at upper endpoint");
            ticks.push(upper);
            break;
        }
        ticks.push(next);
        last = next;
    }
    ticks
}

/// Subdivision count between two majors for a given step.
///
/// Leading digit 1 splits in five, 2 in four, anything else by the digit itself.
#[must_use]
pub fn minor_multiplier(step: f64) -> usize {
    // Halves go to the even digit, so a 2.5 leading step splits like a 2.
    let leading = (step / 10_f64.powf(step.log10().floor())).round_ties_even();
    match leading as usize {
        1 => 5,
        2 => 4,
        other => other.max(2),
    }
}

/// Evenly subdivides the full major span.
#[must_use]
pub fn nice_minor_ticks(majors: &[f64], step: f64) -> Vec<f64> {
    let (Some(&first), Some(&last)) = (majors.first(), majors.last()) else {
        return Vec::new();
    };
    let count = minor_multiplier(step) * (majors.len() - 1) + 1;
    debug_assert!(
        majors.len() < 2 || count > majors.len(),
        "minor subdivision must be finer than the majors"
    );
    linspace(first, last, count)
}

/// Formats majors against a shared engineering exponent.
///
/// Returns the labels and the suffix (`E3`, `E-6`, ...), empty when no
/// scaling applies.
#[must_use]
pub fn nice_tick_labels(majors: &[f64]) -> (Vec<String>, String) {
    let max_abs = majors
        .iter()
        .map(|value| OrderedFloat(value.abs()))
        .max()
        .map_or(0.0, |value| value.0);
    let adj_power = if max_abs > 0.0 && max_abs.is_finite() {
        -3 * (max_abs.log10() / 3.0).floor() as i32
    } else {
        0
    };

    let labels = majors
        .iter()
        .map(|value| {
            let scaled = if adj_power < 0 {
                value / 10_f64.powi(-adj_power)
            } else {
                value * 10_f64.powi(adj_power)
            };
            round_to_decimals(scaled, LABEL_DECIMALS).to_string()
        })
        .collect();
    let suffix = if adj_power != 0 {
        format!("E{}", -adj_power)
    } else {
        String::new()
    };
    (labels, suffix)
}

/// Major and minor tick positions, caps applied, minors de-duplicated.
pub fn numeric_tick_values(
    domain: &NumericDomain,
    requested: usize,
    options: &NumericTickOptions,
) -> TickResult<(Vec<f64>, Vec<f64>)> {
    if requested == 0 {
        return Err(TickError::InvalidTickCount(requested));
    }
    let (lower, upper) = domain.limits;
    if !lower.is_finite() || !upper.is_finite() {
        return Err(TickError::InvalidData("limits must be finite".to_owned()));
    }
    if lower == upper {
        return Ok((vec![lower], Vec::new()));
    }
    if !(upper - lower).is_finite() {
        return Err(TickError::InvalidData(format!(
            "span {lower}..{upper} overflows f64"
        )));
    }

    let step = nice_interval(domain.limits, requested, &options.bases);
    if !step.is_finite() || step <= 0.0 {
        return Err(TickError::InvalidData(format!(
            "no finite tick step for span {lower}..{upper}"
        )));
    }
    let (start, stop) = nice_endpoints(domain, step, options.origin);
    if !start.is_finite() || !stop.is_finite() {
        return Err(TickError::InvalidData(format!(
            "snapped endpoints of {lower}..{upper} overflow f64"
        )));
    }
    let majors = nice_major_ticks(start, stop, step);
    let minors = nice_minor_ticks(&majors, step);

    let majors = reconcile_caps(majors, domain.limits, domain.capped);
    let minors = reconcile_caps(minors, domain.limits, domain.capped);
    let tolerance = step * DEDUP_STEP_FRACTION;
    let minors = without_majors(minors, &majors, |a, b| (a - b).abs() <= tolerance);

    debug!(
        step,
        start,
        stop,
        major_count = majors.len(),
        minor_count = minors.len(),
        "numeric ticks"
    );
    Ok((majors, minors))
}

/// Full numeric plan: ticks, labels, suffix and display limits.
pub fn numeric_tick_plan(
    domain: &NumericDomain,
    requested: usize,
    options: &NumericTickOptions,
) -> TickResult<TickPlan<f64>> {
    let (majors, minors) = numeric_tick_values(domain, requested, options)?;
    let (labels, suffix) = nice_tick_labels(&majors);
    TickPlan::assemble(majors, minors, labels, suffix)
}

/// Numeric implementation of [`TickEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTickEngine {
    pub domain: NumericDomain,
    pub options: NumericTickOptions,
}

impl NumericTickEngine {
    #[must_use]
    pub fn new(domain: NumericDomain) -> Self {
        Self {
            domain,
            options: NumericTickOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: NumericTickOptions) -> Self {
        self.options = options;
        self
    }
}

impl TickEngine for NumericTickEngine {
    type Value = f64;

    fn tick_plan(&self, requested: usize) -> TickResult<TickPlan<f64>> {
        numeric_tick_plan(&self.domain, requested, &self.options)
    }
}
