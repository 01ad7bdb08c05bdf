use std::cmp::Ordering;

use crate::error::{TickError, TickResult};

/// Working values of an ordered series after limits were applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedRange<T> {
    pub values: Vec<T>,
    pub limits: (T, T),
    pub capped: (bool, bool),
}

impl<T: Copy + PartialOrd> ProcessedRange<T> {
    /// Smallest and largest working value, `None` when every value was dropped.
    #[must_use]
    pub fn data_extent(&self) -> Option<(T, T)> {
        extent(&self.values)
    }
}

pub(crate) fn extent<T: Copy + PartialOrd>(values: &[T]) -> Option<(T, T)> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().fold((*first, *first), |(min, max), value| {
        let min = if value.partial_cmp(&min) == Some(Ordering::Less) {
            *value
        } else {
            min
        };
        let max = if value.partial_cmp(&max) == Some(Ordering::Greater) {
            *value
        } else {
            max
        };
        (min, max)
    }))
}

/// Applies optional bounds to a value sequence.
///
/// Per bound: a capped limit clamps out-of-range values onto the limit, an
/// uncapped one drops them. The lower bound is applied before the upper one.
/// Unset limits resolve to the extreme of the remaining values.
pub fn process_range<T: Copy + PartialOrd + std::fmt::Debug>(
    values: &[T],
    limits: (Option<T>, Option<T>),
    capped: (bool, bool),
) -> TickResult<ProcessedRange<T>> {
    let (lower, upper) = limits;
    if let (Some(lower), Some(upper)) = (lower, upper) {
        if lower > upper {
            return Err(TickError::InvalidLimit(format!(
                "lower limit {lower:?} exceeds upper limit {upper:?}"
            )));
        }
    }

    let mut working = values.to_vec();
    if let Some(lower) = lower {
        apply_bound(&mut working, lower, capped.0, |value, limit| value < limit);
    }
    if let Some(upper) = upper {
        apply_bound(&mut working, upper, capped.1, |value, limit| value > limit);
    }

    let resolved = match (lower, upper) {
        (Some(lower), Some(upper)) => (lower, upper),
        _ => {
            let (min, max) = extent(&working).ok_or(TickError::EmptySeries)?;
            (lower.unwrap_or(min), upper.unwrap_or(max))
        }
    };

    Ok(ProcessedRange {
        values: working,
        limits: resolved,
        capped,
    })
}

fn apply_bound<T: Copy + PartialOrd>(
    working: &mut Vec<T>,
    limit: T,
    capped: bool,
    beyond: impl Fn(&T, &T) -> bool,
) {
    if capped {
        for value in working.iter_mut() {
            if beyond(value, &limit) {
                *value = limit;
            }
        }
    } else {
        working.retain(|value| !beyond(value, &limit));
    }
}

#[cfg(test)]
mod tests {
    use super::process_range;
    use crate::error::TickError;

    #[test]
    fn uncapped_limits_drop_out_of_range_values() {
        let processed =
            process_range(&[-5.0, 1.0, 4.0, 12.0], (Some(0.0), Some(10.0)), (false, false))
                .expect("process");
        assert_eq!(processed.values, vec![1.0, 4.0]);
        assert_eq!(processed.limits, (0.0, 10.0));
    }

    #[test]
    fn capped_limits_clamp_out_of_range_values() {
        let processed =
            process_range(&[-5, 1, 4, 12], (Some(0), Some(10)), (true, true)).expect("process");
        assert_eq!(processed.values, vec![0, 1, 4, 10]);
        assert_eq!(processed.data_extent(), Some((0, 10)));
    }

    #[test]
    fn unset_limit_follows_post_drop_extreme() {
        let processed =
            process_range(&[-5, 1, 4, 12], (Some(0), None), (false, false)).expect("process");
        assert_eq!(processed.limits, (0, 12));
    }

    #[test]
    fn fully_dropped_series_without_explicit_limits_is_reported() {
        let result = process_range(&[1, 2, 3], (Some(10), None), (false, false));
        assert!(matches!(result, Err(TickError::EmptySeries)));
    }

    #[test]
    fn explicit_limits_survive_an_emptied_series() {
        let processed =
            process_range(&[1, 2, 3], (Some(10), Some(20)), (false, false)).expect("process");
        assert!(processed.values.is_empty());
        assert_eq!(processed.limits, (10, 20));
        assert_eq!(processed.data_extent(), None);
    }

    #[test]
    fn inverted_explicit_limits_are_rejected() {
        let result = process_range(&[1, 2, 3], (Some(3), Some(1)), (false, false));
        assert!(matches!(result, Err(TickError::InvalidLimit(_))));
    }
}
