use serde::Serialize;

use eduerp_core::ModuleId;

use crate::policy::{AccessPolicy, DecisionRule, ModuleAccessSummary};
use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of a role/module access decision.
///
/// This structure provides transparent, debuggable information about why
/// a module was reachable or not for a role.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub role: Role,
    pub module: ModuleId,

    /// Whether access was granted.
    pub granted: bool,

    /// Which table decided.
    pub rule: DecisionRule,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// Roles that would be granted this module under the same policy.
    pub permitted_roles: Vec<Role>,
}

/// Explain why `role` may or may not enter `module`.
///
/// Pure: unlike [`AccessPolicy::has_module_access`], no diagnostic is emitted
/// for a missing matrix entry; the explanation itself reports it.
pub fn explain_module_access(policy: &AccessPolicy, role: Role, module: ModuleId) -> AccessExplanation {
    let decision = policy.decide(role, module);
    let module_name = policy.module_display_name(module);

    let reason = match decision.rule {
        DecisionRule::MissingEntry => format!(
            "Role '{}' has no access matrix entry; denied by default",
            role
        ),
        DecisionRule::SpecialRule => {
            let description = policy
                .special_rule()
                .map(|r| r.description.as_str())
                .unwrap_or_default();
            if decision.granted {
                format!("{} is governed by an override rule that admits '{}': {}", module_name, role, description)
            } else {
                format!("{} is governed by an override rule that excludes '{}': {}", module_name, role, description)
            }
        }
        DecisionRule::Wildcard => format!("Role '{}' is granted every module", role),
        DecisionRule::Listed => format!("{} is listed for role '{}'", module_name, role),
        DecisionRule::NotListed => format!("{} is not listed for role '{}'", module_name, role),
    };

    AccessExplanation {
        role,
        module,
        granted: decision.granted,
        rule: decision.rule,
        reason,
        permitted_roles: policy.roles_with_access(module),
    }
}

/// Per-role audit line.
#[derive(Debug, Clone, Serialize)]
pub struct RoleAccessReport {
    pub role: Role,
    pub display_name: &'static str,
    pub summary: ModuleAccessSummary,
    /// Module inside which this role sees every module, if any.
    pub universal_access_in: Option<ModuleId>,
}

/// Complete view of the policy for auditing, one line per role.
pub fn access_report(policy: &AccessPolicy) -> Vec<RoleAccessReport> {
    Role::ALL
        .iter()
        .map(|role| RoleAccessReport {
            role: *role,
            display_name: policy.role_display_name(*role),
            summary: policy.access_summary(*role),
            universal_access_in: ModuleId::ALL
                .iter()
                .copied()
                .find(|m| policy.can_access_all_modules_in_context(*role, *m)),
        })
        .collect()
}
