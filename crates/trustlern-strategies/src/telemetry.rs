//! Logging shim for the `telemetry` feature.
//!
//! With the feature, events go through `tracing`. Without it, warnings are
//! written to stderr and everything else is dropped.

use trustlern_core::Decision;

#[cfg(feature = "telemetry")]
pub(crate) fn warn(msg: &str) {
    tracing::warn!("{msg}");
}

#[cfg(not(feature = "telemetry"))]
pub(crate) fn warn(msg: &str) {
    eprintln!("warning: {msg}");
}

#[cfg(feature = "telemetry")]
pub(crate) fn table_loaded(source: &str, entries: usize) {
    tracing::info!(source, entries, "probability table loaded");
}

#[cfg(not(feature = "telemetry"))]
pub(crate) fn table_loaded(_source: &str, _entries: usize) {}

#[cfg(feature = "telemetry")]
pub(crate) fn decided(strategy: &str, rounds_played: usize, decision: Decision) {
    tracing::debug!(
        strategy,
        rounds_played,
        decision = decision.as_u8(),
        "strategy decided"
    );
}

#[cfg(not(feature = "telemetry"))]
pub(crate) fn decided(_strategy: &str, _rounds_played: usize, _decision: Decision) {}

#[cfg(feature = "telemetry")]
pub(crate) fn threshold(strategy: &str, observed: f64, limit: f64) {
    tracing::debug!(strategy, observed, limit, "threshold check");
}

#[cfg(not(feature = "telemetry"))]
pub(crate) fn threshold(_strategy: &str, _observed: f64, _limit: f64) {}
