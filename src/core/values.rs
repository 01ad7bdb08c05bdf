use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::{date_at_midnight, decimal_to_f64};
use crate::error::{TickError, TickResult};

/// A single untyped input element, as handed over by a data loader.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
    Boolean(bool),
}

impl RawValue {
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::Text(_) => "text",
            Self::Boolean(_) => "boolean",
        }
    }

    fn to_text(&self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Decimal(value) => value.to_string(),
            Self::Date(value) => value.to_string(),
            Self::DateTime(value) => value.to_string(),
            Self::Text(value) => value.clone(),
            Self::Boolean(value) => value.to_string(),
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// The four shapes a value sequence can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesVariant {
    /// Integer data.
    Discrete,
    /// Floating-point data.
    Continuous,
    /// Timestamps.
    Calendar,
    /// Text labels without an ordering.
    Categorical,
}

impl SeriesVariant {
    #[must_use]
    pub fn is_ordered(self) -> bool {
        !matches!(self, Self::Categorical)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Discrete => "discrete",
            Self::Continuous => "continuous",
            Self::Calendar => "calendar",
            Self::Categorical => "categorical",
        }
    }
}

/// A flattened sequence after classification, holding one concrete element type.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedValues {
    Discrete(Vec<i64>),
    Continuous(Vec<f64>),
    Calendar(Vec<NaiveDateTime>),
    Categorical(Vec<String>),
}

impl ClassifiedValues {
    #[must_use]
    pub fn variant(&self) -> SeriesVariant {
        match self {
            Self::Discrete(_) => SeriesVariant::Discrete,
            Self::Continuous(_) => SeriesVariant::Continuous,
            Self::Calendar(_) => SeriesVariant::Calendar,
            Self::Categorical(_) => SeriesVariant::Categorical,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Discrete(values) => values.len(),
            Self::Continuous(values) => values.len(),
            Self::Calendar(values) => values.len(),
            Self::Categorical(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct ElementKinds {
    integer: bool,
    float: bool,
    text: bool,
    date: bool,
    datetime: bool,
    first_calendar: Option<&'static str>,
}

impl ElementKinds {
    fn scan(values: &[RawValue]) -> TickResult<Self> {
        let mut kinds = Self::default();
        for value in values {
            match value {
                RawValue::Integer(_) => kinds.integer = true,
                RawValue::Float(_) | RawValue::Decimal(_) => kinds.float = true,
                RawValue::Text(_) => kinds.text = true,
                RawValue::Date(_) => {
                    kinds.date = true;
                    kinds.first_calendar.get_or_insert("date");
                }
                RawValue::DateTime(_) => {
                    kinds.datetime = true;
                    kinds.first_calendar.get_or_insert("datetime");
                }
                RawValue::Boolean(_) => {
                    return Err(TickError::UnsupportedType {
                        found: value.type_name(),
                    });
                }
            }
        }
        Ok(kinds)
    }
}

/// Assigns a flattened sequence to exactly one [`SeriesVariant`].
///
/// Text dominates every other element type; floats dominate integers. A
/// calendar sequence must resolve to a single granularity (all dates or all
/// datetimes), and may not be mixed with numbers.
pub fn classify(values: &[RawValue]) -> TickResult<ClassifiedValues> {
    let kinds = ElementKinds::scan(values)?;

    let classified = if kinds.text {
        ClassifiedValues::Categorical(values.iter().map(RawValue::to_text).collect())
    } else if kinds.date || kinds.datetime {
        if kinds.integer || kinds.float {
            return Err(TickError::UnsupportedType {
                found: "calendar mixed with numeric",
            });
        }
        if kinds.date && kinds.datetime {
            let expected = kinds.first_calendar.unwrap_or("date");
            let found = if expected == "date" { "datetime" } else { "date" };
            return Err(TickError::TypeMismatch { expected, found });
        }
        ClassifiedValues::Calendar(
            values
                .iter()
                .filter_map(|value| match value {
                    RawValue::Date(date) => Some(date_at_midnight(*date)),
                    RawValue::DateTime(datetime) => Some(*datetime),
                    _ => None,
                })
                .collect(),
        )
    } else if kinds.float || !kinds.integer {
        let mut floats = Vec::with_capacity(values.len());
        for value in values {
            let float = match value {
                RawValue::Integer(value) => *value as f64,
                RawValue::Float(value) => *value,
                RawValue::Decimal(value) => decimal_to_f64(*value, "value")?,
                other => {
                    return Err(TickError::UnsupportedType {
                        found: other.type_name(),
                    });
                }
            };
            if !float.is_finite() {
                return Err(TickError::InvalidData("values must be finite".to_owned()));
            }
            floats.push(float);
        }
        ClassifiedValues::Continuous(floats)
    } else {
        ClassifiedValues::Discrete(
            values
                .iter()
                .filter_map(|value| match value {
                    RawValue::Integer(value) => Some(*value),
                    _ => None,
                })
                .collect(),
        )
    };

    trace!(
        count = classified.len(),
        variant = ?classified.variant(),
        "classify values"
    );
    Ok(classified)
}
