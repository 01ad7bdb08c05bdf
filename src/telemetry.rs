//! Telemetry helpers for hosts embedding `chart-ticks`.
//!
//! Tick engines only emit `tracing` events (`debug` for chosen steps and
//! intervals, `trace` for classification, `warn` for stalled accumulation);
//! installing a subscriber is left to the host.

/// Environment variable read by [`init_default_tracing`], in `EnvFilter` syntax.
pub const LOG_ENV_VAR: &str = "CHART_TICKS_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "chart_ticks=warn";

/// Installs a compact stderr subscriber filtered by [`LOG_ENV_VAR`].
///
/// Returns `false` without the `telemetry` feature or when the host already
/// set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
