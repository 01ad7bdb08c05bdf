mod axis_config;
mod axis_density;

pub use axis_config::{
    AxisConfig, AxisTicks, compute_axis_config, compute_axis_config_with_options,
};
pub use axis_density::{
    DEFAULT_MAX_REQUESTED_TICKS, requested_tick_count, requested_tick_count_in_grid,
};
