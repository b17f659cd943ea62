//! Fail-safe observability events.
//!
//! Every path that resolves a surprise (unknown role, matrix drift, invalid
//! module id) to "deny" or "unscoped" reports here so the condition is
//! visible in structured logs and countable, not just silently denied.

use std::sync::atomic::{AtomicU64, Ordering};

use eduerp_core::ModuleId;

use crate::Role;

static FAIL_SAFE_DENIALS: AtomicU64 = AtomicU64::new(0);

/// Total fail-safe events recorded by this process (monotonic).
pub fn fail_safe_denials() -> u64 {
    FAIL_SAFE_DENIALS.load(Ordering::Relaxed)
}

fn bump() {
    FAIL_SAFE_DENIALS.fetch_add(1, Ordering::Relaxed);
}

/// A role with no access matrix entry was asked about.
pub fn missing_matrix_entry(role: Role, module: Option<ModuleId>) {
    bump();
    tracing::warn!(
        role = %role,
        module = module.map(|m| m.as_str()),
        "role has no access matrix entry; denying"
    );
}

/// A role string outside the closed role set reached an access check.
pub fn unknown_role(raw: &str) {
    bump();
    tracing::warn!(role = raw, "unknown role; denying");
}

/// A module string outside the closed module set reached a decision point.
pub fn invalid_module(raw: &str, source: &'static str) {
    bump();
    tracing::warn!(module = raw, source, "invalid module id; failing closed");
}
