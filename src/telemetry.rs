//! Telemetry helpers for applications embedding `binplot`.
//!
//! Events emitted by the crate, by level:
//!
//! - `warn`: every `PrecedenceWarning` (an active bin error option discarding
//!   caller error arrays, or explicit horizontal errors lifting x-error
//!   suppression), tagged with the series `name`.
//! - `debug`: series construction (`bins`, `overlay`, `filled`) and each
//!   accepted fill (`bins`, `scale`).
//! - `trace`: frame projection of the histogram and the error overlay,
//!   `set_errors` calls and every presented frame with its primitive counts.
//!
//! The helper below installs a compact `fmt` subscriber filtered at `warn`
//! unless `RUST_LOG` says otherwise. Hosts with their own subscriber can skip
//! it; all events go through the global `tracing` dispatcher.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
