//! chart-ticks: nice axis ticks for numeric and calendar data.
//!
//! A raw value sequence is classified into a [`core::ValueSeries`], limited
//! and capped per its [`core::SeriesConfig`], and handed to the numeric or
//! calendar tick engine. [`api::compute_axis_config`] bundles the result into
//! what a renderer needs: axis label, major/minor ticks, tick labels and
//! display limits.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{AxisConfig, AxisTicks, compute_axis_config};
pub use error::{TickError, TickResult};
