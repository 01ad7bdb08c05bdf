use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::core::{
    CalendarDomain, CalendarTickEngine, NumericDomain, NumericTickEngine, NumericTickOptions,
    SeriesData, TickEngine, TickPlan, ValueSeries,
};
use crate::error::{TickError, TickResult};

/// Tick plan of an axis, by the kind of values it positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "plan", rename_all = "snake_case")]
pub enum AxisTicks {
    Numeric(TickPlan<f64>),
    Calendar(TickPlan<NaiveDateTime>),
}

impl AxisTicks {
    #[must_use]
    pub fn tick_labels(&self) -> &[String] {
        match self {
            Self::Numeric(plan) => &plan.tick_labels,
            Self::Calendar(plan) => &plan.tick_labels,
        }
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        match self {
            Self::Numeric(plan) => &plan.suffix,
            Self::Calendar(plan) => &plan.suffix,
        }
    }

    #[must_use]
    pub fn major_count(&self) -> usize {
        match self {
            Self::Numeric(plan) => plan.major_ticks.len(),
            Self::Calendar(plan) => plan.major_ticks.len(),
        }
    }

    #[must_use]
    pub fn minor_count(&self) -> usize {
        match self {
            Self::Numeric(plan) => plan.minor_ticks.len(),
            Self::Calendar(plan) => plan.minor_ticks.len(),
        }
    }

    #[must_use]
    pub fn as_numeric(&self) -> Option<&TickPlan<f64>> {
        match self {
            Self::Numeric(plan) => Some(plan),
            Self::Calendar(_) => None,
        }
    }

    #[must_use]
    pub fn as_calendar(&self) -> Option<&TickPlan<NaiveDateTime>> {
        match self {
            Self::Calendar(plan) => Some(plan),
            Self::Numeric(_) => None,
        }
    }
}

/// Everything a renderer needs to draw one axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisConfig {
    /// Series label, followed by ` (suffix)` when the ticks share a suffix.
    pub label: String,
    pub ticks: AxisTicks,
}

impl AxisConfig {
    pub fn to_json_string(&self) -> TickResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Computes axis ticks for `series` aiming for about `requested` major ticks.
pub fn compute_axis_config(series: &ValueSeries, requested: usize) -> TickResult<AxisConfig> {
    compute_axis_config_with_options(series, requested, &NumericTickOptions::default())
}

/// Like [`compute_axis_config`] with explicit numeric engine options.
///
/// The options are ignored for calendar series.
pub fn compute_axis_config_with_options(
    series: &ValueSeries,
    requested: usize,
    options: &NumericTickOptions,
) -> TickResult<AxisConfig> {
    let ticks = match series.data() {
        SeriesData::Discrete(range) => AxisTicks::Numeric(
            NumericTickEngine::new(NumericDomain::from(range))
                .with_options(options.clone())
                .tick_plan(requested)?,
        ),
        SeriesData::Continuous(range) => AxisTicks::Numeric(
            NumericTickEngine::new(NumericDomain::from(range))
                .with_options(options.clone())
                .tick_plan(requested)?,
        ),
        SeriesData::Calendar(range) => AxisTicks::Calendar(
            CalendarTickEngine::new(CalendarDomain::from(range)).tick_plan(requested)?,
        ),
        SeriesData::Categorical(_) => {
            return Err(TickError::NotOrderable {
                variant: series.variant(),
            });
        }
    };

    let label = if ticks.suffix().is_empty() {
        series.label().to_owned()
    } else {
        format!("{} ({})", series.label(), ticks.suffix())
    };
    debug!(
        variant = ?series.variant(),
        requested,
        major_count = ticks.major_count(),
        minor_count = ticks.minor_count(),
        "axis config"
    );
    Ok(AxisConfig { label, ticks })
}
