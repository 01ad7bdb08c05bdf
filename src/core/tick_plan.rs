use serde::Serialize;

use crate::core::range::extent;
use crate::error::{TickError, TickResult};

/// Major/minor tick positions and labels computed for one axis.
///
/// `tick_labels` is index-aligned with `major_ticks`; `minor_ticks` never
/// shares a value with `major_ticks`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickPlan<T> {
    pub major_ticks: Vec<T>,
    pub minor_ticks: Vec<T>,
    pub tick_labels: Vec<String>,
    pub suffix: String,
    pub display_limits: (T, T),
}

impl<T: Copy + PartialOrd> TickPlan<T> {
    pub(crate) fn assemble(
        major_ticks: Vec<T>,
        minor_ticks: Vec<T>,
        tick_labels: Vec<String>,
        suffix: String,
    ) -> TickResult<Self> {
        let display_limits = extent(&major_ticks)
            .ok_or_else(|| TickError::InvalidData("tick plan has no major ticks".to_owned()))?;
        Ok(Self {
            major_ticks,
            minor_ticks,
            tick_labels,
            suffix,
            display_limits,
        })
    }
}

/// Tick placement for one ordered series variant.
pub trait TickEngine {
    type Value: Copy + PartialOrd;

    /// Computes a fresh plan aiming for roughly `requested` major ticks.
    fn tick_plan(&self, requested: usize) -> TickResult<TickPlan<Self::Value>>;
}

/// Pins generated ticks to capped bounds.
///
/// For a capped lower bound every tick at or below it is replaced by the bound
/// itself, placed first; the upper bound mirrors this at the end.
pub(crate) fn reconcile_caps<T: Copy + PartialOrd>(
    mut ticks: Vec<T>,
    limits: (T, T),
    capped: (bool, bool),
) -> Vec<T> {
    let (lower, upper) = limits;
    if capped.0 {
        ticks.retain(|tick| *tick > lower);
        ticks.insert(0, lower);
    }
    if capped.1 {
        ticks.retain(|tick| *tick < upper);
        ticks.push(upper);
    }
    ticks
}

/// Drops every minor tick that coincides with a major one.
pub(crate) fn without_majors<T: Copy>(
    minors: Vec<T>,
    majors: &[T],
    same: impl Fn(&T, &T) -> bool,
) -> Vec<T> {
    minors
        .into_iter()
        .filter(|minor| !majors.iter().any(|major| same(minor, major)))
        .collect()
}
