pub mod calendar_interval;
pub mod calendar_labels;
pub mod calendar_ticks;
pub mod config;
pub mod numeric_ticks;
pub mod primitives;
pub mod range;
pub mod series;
pub mod tick_plan;
pub mod values;

pub use calendar_interval::{CalendarInterval, CalendarUnit, INTERVAL_TABLE};
pub use calendar_labels::calendar_tick_labels;
pub use calendar_ticks::{
    CalendarDomain, CalendarTickEngine, MinorSubdivision, calendar_major_ticks,
    calendar_minor_ticks, calendar_tick_plan, calendar_tick_values, minor_subdivision,
    nice_calendar_endpoints, nice_calendar_interval,
};
pub use config::{Limit, SeriesConfig, SeriesConfigUpdate};
pub use numeric_ticks::{
    NumericDomain, NumericTickEngine, NumericTickOptions, nice_endpoints, nice_interval,
    nice_major_ticks, nice_minor_ticks, nice_tick_labels, numeric_tick_plan, numeric_tick_values,
};
pub use range::{ProcessedRange, process_range};
pub use series::{SeriesData, ValueSeries};
pub use tick_plan::{TickEngine, TickPlan};
pub use values::{ClassifiedValues, RawValue, SeriesVariant, classify};
