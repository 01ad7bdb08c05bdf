use thiserror::Error;

use crate::core::SeriesVariant;

pub type TickResult<T> = Result<T, TickError>;

#[derive(Debug, Error)]
pub enum TickError {
    #[error("unsupported value type: {found}")]
    UnsupportedType { found: &'static str },

    #[error("mismatched value kinds: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("calendar span must be > 0 seconds, got {seconds}")]
    DegenerateSpan { seconds: i64 },

    #[error("series has no values to derive limits from")]
    EmptySeries,

    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    #[error("requested tick count must be >= 1, got {0}")]
    InvalidTickCount(usize),

    #[error("{variant:?} series has no ordering to place ticks on")]
    NotOrderable { variant: SeriesVariant },

    #[error("calendar arithmetic out of range: {0}")]
    CalendarOverflow(String),

    #[error("tick generation exceeded {max} ticks")]
    TooManyTicks { max: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid series config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
