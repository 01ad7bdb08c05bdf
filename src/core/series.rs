use std::borrow::Cow;

use chrono::NaiveDateTime;
use tracing::trace;

use crate::core::config::{Limit, SeriesConfig, SeriesConfigUpdate};
use crate::core::range::{ProcessedRange, process_range};
use crate::core::values::{ClassifiedValues, RawValue, SeriesVariant, classify};
use crate::error::{TickError, TickResult};

/// Variant-specific payload of a [`ValueSeries`].
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesData {
    Discrete(ProcessedRange<i64>),
    Continuous(ProcessedRange<f64>),
    Calendar(ProcessedRange<NaiveDateTime>),
    Categorical(Vec<String>),
}

/// Immutable, classified wrapper around a flattened value sequence.
///
/// Limits and cap flags are resolved once on construction. Changing the
/// configuration goes through [`ValueSeries::reconfigure`], which builds a new
/// series from the unfiltered source values.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSeries {
    config: SeriesConfig,
    source: ClassifiedValues,
    data: SeriesData,
}

impl ValueSeries {
    /// Classifies `values` and applies `config`.
    pub fn new(values: &[RawValue], config: SeriesConfig) -> TickResult<Self> {
        Self::from_classified(classify(values)?, config)
    }

    pub fn from_integers(values: &[i64], config: SeriesConfig) -> TickResult<Self> {
        Self::from_classified(ClassifiedValues::Discrete(values.to_vec()), config)
    }

    pub fn from_floats(values: &[f64], config: SeriesConfig) -> TickResult<Self> {
        if values.iter().any(|value| !value.is_finite()) {
            return Err(TickError::InvalidData("values must be finite".to_owned()));
        }
        Self::from_classified(ClassifiedValues::Continuous(values.to_vec()), config)
    }

    pub fn from_datetimes(values: &[NaiveDateTime], config: SeriesConfig) -> TickResult<Self> {
        Self::from_classified(ClassifiedValues::Calendar(values.to_vec()), config)
    }

    pub fn from_classified(source: ClassifiedValues, config: SeriesConfig) -> TickResult<Self> {
        let data = build_data(&source, &config)?;
        trace!(
            variant = ?source.variant(),
            source_count = source.len(),
            label = %config.label,
            "build value series"
        );
        Ok(Self {
            config,
            source,
            data,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.config.label
    }

    #[must_use]
    pub fn variant(&self) -> SeriesVariant {
        self.source.variant()
    }

    #[must_use]
    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &SeriesData {
        &self.data
    }

    /// Cap flags; always `(false, false)` for categorical data.
    #[must_use]
    pub fn capped(&self) -> (bool, bool) {
        match &self.data {
            SeriesData::Discrete(range) => range.capped,
            SeriesData::Continuous(range) => range.capped,
            SeriesData::Calendar(range) => range.capped,
            SeriesData::Categorical(_) => (false, false),
        }
    }

    /// Merges `update` into this series' config.
    ///
    /// Returns the series itself when the merged config is unchanged, otherwise
    /// a freshly processed series.
    pub fn reconfigure(&self, update: &SeriesConfigUpdate) -> TickResult<Cow<'_, Self>> {
        let merged = update.merged_into(&self.config);
        if merged == self.config {
            return Ok(Cow::Borrowed(self));
        }
        Self::from_classified(self.source.clone(), merged).map(Cow::Owned)
    }

    /// Combines several series sharing one axis into a single series.
    ///
    /// Working values are concatenated. The lowest lower limit and the highest
    /// upper limit win, each bringing its own cap flag (ties keep the first
    /// lower and the last upper). Distinct non-empty labels are joined with
    /// `", "` in first-seen order. All inputs must share one variant.
    pub fn merge(series: &[&ValueSeries]) -> TickResult<Self> {
        let (first, rest) = series.split_first().ok_or(TickError::EmptySeries)?;
        let variant = first.variant();
        if let Some(other) = rest.iter().find(|other| other.variant() != variant) {
            return Err(TickError::TypeMismatch {
                expected: variant.name(),
                found: other.variant().name(),
            });
        }

        let label = merged_label(series);
        let merged = match first.data() {
            SeriesData::Discrete(_) => {
                let ranges = ranges_of(series, |data| match data {
                    SeriesData::Discrete(range) => Some(range),
                    _ => None,
                });
                let merged = MergedRange::from_ranges(&ranges)?;
                let config = merged.config(label, Limit::Integer);
                Self::from_classified(ClassifiedValues::Discrete(merged.values), config)?
            }
            SeriesData::Continuous(_) => {
                let ranges = ranges_of(series, |data| match data {
                    SeriesData::Continuous(range) => Some(range),
                    _ => None,
                });
                let merged = MergedRange::from_ranges(&ranges)?;
                let config = merged.config(label, Limit::Float);
                Self::from_classified(ClassifiedValues::Continuous(merged.values), config)?
            }
            SeriesData::Calendar(_) => {
                let ranges = ranges_of(series, |data| match data {
                    SeriesData::Calendar(range) => Some(range),
                    _ => None,
                });
                let merged = MergedRange::from_ranges(&ranges)?;
                let config = merged.config(label, Limit::DateTime);
                Self::from_classified(ClassifiedValues::Calendar(merged.values), config)?
            }
            SeriesData::Categorical(_) => {
                let values = series
                    .iter()
                    .filter_map(|each| match each.data() {
                        SeriesData::Categorical(values) => Some(values.iter().cloned()),
                        _ => None,
                    })
                    .flatten()
                    .collect();
                Self::from_classified(
                    ClassifiedValues::Categorical(values),
                    SeriesConfig::new().with_label(label),
                )?
            }
        };

        trace!(
            variant = ?variant,
            inputs = series.len(),
            label = %merged.label(),
            "merge value series"
        );
        Ok(merged)
    }
}

fn merged_label(series: &[&ValueSeries]) -> String {
    let mut labels: Vec<&str> = Vec::with_capacity(series.len());
    for label in series.iter().map(|each| each.label()) {
        if !label.is_empty() && !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels.join(", ")
}

fn ranges_of<'a, T>(
    series: &[&'a ValueSeries],
    pick: impl Fn(&'a SeriesData) -> Option<&'a ProcessedRange<T>>,
) -> Vec<&'a ProcessedRange<T>> {
    series.iter().filter_map(|each| pick(each.data())).collect()
}

struct MergedRange<T> {
    values: Vec<T>,
    lower: (T, bool),
    upper: (T, bool),
}

impl<T: Copy + PartialOrd> MergedRange<T> {
    fn from_ranges(ranges: &[&ProcessedRange<T>]) -> TickResult<Self> {
        let (first, rest) = ranges.split_first().ok_or(TickError::EmptySeries)?;
        let mut merged = Self {
            values: first.values.clone(),
            lower: (first.limits.0, first.capped.0),
            upper: (first.limits.1, first.capped.1),
        };
        for range in rest {
            merged.values.extend_from_slice(&range.values);
            if range.limits.0 < merged.lower.0 {
                merged.lower = (range.limits.0, range.capped.0);
            }
            if range.limits.1 >= merged.upper.0 {
                merged.upper = (range.limits.1, range.capped.1);
            }
        }
        Ok(merged)
    }

    fn config(&self, label: String, limit: impl Fn(T) -> Limit) -> SeriesConfig {
        SeriesConfig::new()
            .with_label(label)
            .with_limits(Some(limit(self.lower.0)), Some(limit(self.upper.0)))
            .with_capped(self.lower.1, self.upper.1)
    }
}

fn resolve_limits<T>(
    limits: &(Option<Limit>, Option<Limit>),
    convert: impl Fn(&Limit) -> TickResult<T>,
) -> TickResult<(Option<T>, Option<T>)> {
    let lower = limits.0.as_ref().map(&convert).transpose()?;
    let upper = limits.1.as_ref().map(&convert).transpose()?;
    Ok((lower, upper))
}

fn build_data(source: &ClassifiedValues, config: &SeriesConfig) -> TickResult<SeriesData> {
    let data = match source {
        ClassifiedValues::Discrete(values) => SeriesData::Discrete(process_range(
            values,
            resolve_limits(&config.limits, Limit::to_discrete)?,
            config.capped,
        )?),
        ClassifiedValues::Continuous(values) => SeriesData::Continuous(process_range(
            values,
            resolve_limits(&config.limits, Limit::to_continuous)?,
            config.capped,
        )?),
        ClassifiedValues::Calendar(values) => SeriesData::Calendar(process_range(
            values,
            resolve_limits(&config.limits, Limit::to_calendar)?,
            config.capped,
        )?),
        ClassifiedValues::Categorical(values) => {
            if config.limits.0.is_some() || config.limits.1.is_some() {
                return Err(TickError::InvalidLimit(
                    "categorical series do not accept limits".to_owned(),
                ));
            }
            SeriesData::Categorical(values.clone())
        }
    };
    Ok(data)
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{SeriesData, ValueSeries};
    use crate::core::config::{SeriesConfig, SeriesConfigUpdate};

    #[test]
    fn unchanged_update_returns_the_same_series() {
        let series = ValueSeries::from_integers(&[1, 5, 9], SeriesConfig::new().with_label("n"))
            .expect("series");
        let same = series
            .reconfigure(&SeriesConfigUpdate::new().label("n"))
            .expect("reconfigure");
        assert!(matches!(same, Cow::Borrowed(_)));
    }

    #[test]
    fn widening_limits_recovers_previously_dropped_values() {
        let series = ValueSeries::from_integers(
            &[1, 5, 9],
            SeriesConfig::new().with_upper_limit(6_i64),
        )
        .expect("series");
        let widened = series
            .reconfigure(&SeriesConfigUpdate::new().limits(None, None))
            .expect("reconfigure");
        let SeriesData::Discrete(range) = widened.data() else {
            panic!("expected discrete data");
        };
        assert_eq!(range.values, vec![1, 5, 9]);
        assert_eq!(range.limits, (1, 9));
    }
}
