/// Upper bound applied by [`requested_tick_count`].
pub const DEFAULT_MAX_REQUESTED_TICKS: usize = 64;

/// Converts an axis extent and a tick density into a requested tick count.
///
/// `extent` and `ticks_per_unit` share a unit (inches, centimetres, pixels...).
/// Degenerate inputs fall back to a single tick.
#[must_use]
pub fn requested_tick_count(extent: f64, ticks_per_unit: f64) -> usize {
    requested_tick_count_clamped(extent, ticks_per_unit, 1, DEFAULT_MAX_REQUESTED_TICKS)
}

/// Tick count for one cell of a grid of subplots sharing `figure_extent`.
#[must_use]
pub fn requested_tick_count_in_grid(figure_extent: f64, cells: usize, ticks_per_unit: f64) -> usize {
    if cells == 0 {
        return 1;
    }
    requested_tick_count(figure_extent / cells as f64, ticks_per_unit)
}

fn requested_tick_count_clamped(
    extent: f64,
    ticks_per_unit: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !extent.is_finite() || extent <= 0.0 {
        return min_ticks;
    }
    if !ticks_per_unit.is_finite() || ticks_per_unit <= 0.0 {
        return min_ticks;
    }

    let raw = (extent * ticks_per_unit).round() as usize;
    raw.clamp(min_ticks, max_ticks.max(min_ticks))
}
