//! Process-wide tracing/logging setup.
//!
//! Library crates only emit `tracing` events; binaries and test harnesses call
//! [`init`] once to decide where those events go.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogConfig::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;
