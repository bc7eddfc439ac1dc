//! Opt-in `tracing` setup for hosts embedding `cartesian-chart`.
//!
//! Layout passes log at `debug`, per-axis separator sync at `trace`, and
//! recovered problems (labeler failures, aborted passes) at `warn`. Hosts with
//! their own subscriber can ignore this module entirely.

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "cartesian_chart=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is off or a global subscriber
/// is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`] with an explicit fallback directive, e.g.
/// `"cartesian_chart=trace"` to follow separator sync.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
