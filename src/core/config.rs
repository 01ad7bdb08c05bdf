use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{date_at_midnight, decimal_to_f64};
use crate::error::{TickError, TickResult};

/// A configured axis bound, resolved against the series' unit on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// ISO-8601 text (`2024`, `2024-03`, `2024-03-05`, `2024-03-05T10:30:00`),
    /// only meaningful for calendar series.
    Text(String),
}

impl Limit {
    pub(crate) fn to_discrete(&self) -> TickResult<i64> {
        let invalid = || TickError::InvalidLimit(format!("{self:?} is not an integer bound"));
        match self {
            Self::Integer(value) => Ok(*value),
            // `to_i64` refuses values outside the i64 range instead of saturating.
            Self::Float(value) if value.fract() == 0.0 => value.to_i64().ok_or_else(invalid),
            Self::Decimal(value) if value.fract().is_zero() => value.to_i64().ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }

    pub(crate) fn to_continuous(&self) -> TickResult<f64> {
        let value = match self {
            Self::Integer(value) => *value as f64,
            Self::Float(value) => *value,
            Self::Decimal(value) => decimal_to_f64(*value, "limit")?,
            _ => {
                return Err(TickError::InvalidLimit(format!(
                    "{self:?} is not a numeric bound"
                )));
            }
        };
        if !value.is_finite() {
            return Err(TickError::InvalidLimit("limit must be finite".to_owned()));
        }
        Ok(value)
    }

    pub(crate) fn to_calendar(&self) -> TickResult<NaiveDateTime> {
        match self {
            Self::Date(date) => Ok(date_at_midnight(*date)),
            Self::DateTime(datetime) => Ok(*datetime),
            Self::Text(text) => parse_calendar_text(text),
            _ => Err(TickError::InvalidLimit(format!(
                "{self:?} is not a calendar bound"
            ))),
        }
    }
}

fn parse_calendar_text(text: &str) -> TickResult<NaiveDateTime> {
    let text = text.trim();
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, pattern) {
            return Ok(datetime);
        }
    }

    // Coarser forms resolve to the start of the period they name.
    let padded = match text.matches('-').count() {
        0 => format!("{text}-01-01"),
        1 => format!("{text}-01"),
        _ => text.to_owned(),
    };
    NaiveDate::parse_from_str(&padded, "%Y-%m-%d")
        .map(date_at_midnight)
        .map_err(|err| TickError::InvalidLimit(format!("cannot parse `{text}`: {err}")))
}

impl From<i64> for Limit {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Limit {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for Limit {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<NaiveDate> for Limit {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for Limit {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<&str> for Limit {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Construction-time options of a [`crate::core::ValueSeries`].
///
/// An unset limit falls back to the data's own extreme. A capped bound clamps
/// out-of-range values onto the limit; an uncapped one drops them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    pub label: String,
    pub limits: (Option<Limit>, Option<Limit>),
    pub capped: (bool, bool),
}

impl SeriesConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_limits(mut self, lower: Option<Limit>, upper: Option<Limit>) -> Self {
        self.limits = (lower, upper);
        self
    }

    #[must_use]
    pub fn with_lower_limit(mut self, lower: impl Into<Limit>) -> Self {
        self.limits.0 = Some(lower.into());
        self
    }

    #[must_use]
    pub fn with_upper_limit(mut self, upper: impl Into<Limit>) -> Self {
        self.limits.1 = Some(upper.into());
        self
    }

    #[must_use]
    pub fn with_capped(mut self, lower: bool, upper: bool) -> Self {
        self.capped = (lower, upper);
        self
    }

    /// Parses a config from JSON, e.g.
    /// `{"label": "Price", "limits": [{"float": 0.0}, null], "capped": [true, false]}`.
    pub fn from_json_str(json: &str) -> TickResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Partial overrides merged into an existing series' config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfigUpdate {
    pub label: Option<String>,
    pub limits: Option<(Option<Limit>, Option<Limit>)>,
    pub capped: Option<(bool, bool)>,
}

impl SeriesConfigUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn limits(mut self, lower: Option<Limit>, upper: Option<Limit>) -> Self {
        self.limits = Some((lower, upper));
        self
    }

    #[must_use]
    pub fn capped(mut self, lower: bool, upper: bool) -> Self {
        self.capped = Some((lower, upper));
        self
    }

    #[must_use]
    pub fn merged_into(&self, base: &SeriesConfig) -> SeriesConfig {
        SeriesConfig {
            label: self.label.clone().unwrap_or_else(|| base.label.clone()),
            limits: self.limits.clone().unwrap_or_else(|| base.limits.clone()),
            capped: self.capped.unwrap_or(base.capped),
        }
    }
}
