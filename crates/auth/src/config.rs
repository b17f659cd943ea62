//! Policy source selection.
//!
//! `EDUERP_ACCESS_POLICY` points at a JSON policy document; when unset the
//! compiled-in standard tables are used. A configured file that cannot be
//! loaded is an error, never a silent fallback.

use std::path::Path;

use anyhow::Context;

use crate::policy::AccessPolicy;

pub const POLICY_PATH_ENV: &str = "EDUERP_ACCESS_POLICY";

/// Load a policy document from disk.
pub fn load_from_file(path: &Path) -> anyhow::Result<AccessPolicy> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading access policy from {}", path.display()))?;
    AccessPolicy::from_json(&json).with_context(|| format!("parsing access policy from {}", path.display()))
}

/// Resolve the process policy from the environment.
pub fn load_from_env() -> anyhow::Result<AccessPolicy> {
    match std::env::var_os(POLICY_PATH_ENV) {
        Some(path) => {
            let path = Path::new(&path);
            let policy = load_from_file(path)?;
            tracing::info!(path = %path.display(), "loaded access policy override");
            Ok(policy)
        }
        None => Ok(AccessPolicy::standard().clone()),
    }
}
