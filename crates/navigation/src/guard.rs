//! Route guard: checks every page entry before it renders.
//!
//! Two independent checks must both pass: the route's own role list and the
//! module matrix. Both honor institution/principal equivalence.

use serde::{Deserialize, Serialize};

use eduerp_auth::{AccessPolicy, AuthenticatedUser, Role, diagnostics, role_list_allows};
use eduerp_core::ModuleId;

/// Access requirements declared by a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequirement {
    #[serde(default)]
    pub allowed_roles: Option<Vec<Role>>,
    /// Raw module id as declared in the route table; validated on every check.
    #[serde(default)]
    pub module: Option<String>,
}

impl RouteRequirement {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn for_roles(mut self, roles: impl Into<Vec<Role>>) -> Self {
        self.allowed_roles = Some(roles.into());
        self
    }

    pub fn in_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenialReason {
    /// The route's role list does not include the user's role.
    RoleNotAllowed,
    /// The role may not enter the route's module.
    ModuleAccessDenied { module: ModuleId },
    /// The route declares a module id outside the closed set.
    InvalidModule { module: String },
}

/// Data for the access-denied view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDenied {
    pub role: Role,
    pub reason: DenialReason,
    /// Roles that would pass both checks for this route.
    pub permitted_roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    Deny(AccessDenied),
    RedirectToLogin,
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

fn role_passes(policy: &AccessPolicy, requirement: &RouteRequirement, module: Option<ModuleId>, role: Role) -> bool {
    let listed = requirement
        .allowed_roles
        .as_deref()
        .is_none_or(|roles| role_list_allows(roles, role));
    listed && module.is_none_or(|m| policy.decide(role, m).granted)
}

/// Decide whether the user may open a route.
///
/// - No authenticated user: redirect to login.
/// - Invalid module id: deny (fails closed).
/// - Otherwise both the role list and module access must pass.
pub fn guard_route(
    policy: &AccessPolicy,
    user: Option<&AuthenticatedUser>,
    requirement: &RouteRequirement,
) -> GuardDecision {
    let Some(user) = user else {
        return GuardDecision::RedirectToLogin;
    };
    let role = user.role;

    let module = match requirement.module.as_deref() {
        None => None,
        Some(raw) if policy.is_valid_module_id(raw) => ModuleId::parse(raw),
        Some(raw) => {
            diagnostics::invalid_module(raw, "route_guard");
            return GuardDecision::Deny(AccessDenied {
                role,
                reason: DenialReason::InvalidModule { module: raw.to_string() },
                permitted_roles: Vec::new(),
            });
        }
    };

    let permitted_roles = || {
        Role::ALL
            .iter()
            .copied()
            .filter(|r| role_passes(policy, requirement, module, *r))
            .collect::<Vec<_>>()
    };

    if let Some(roles) = requirement.allowed_roles.as_deref() {
        if !role_list_allows(roles, role) {
            tracing::debug!(principal = %user.principal_id, role = %role, "route denied: role not listed");
            return GuardDecision::Deny(AccessDenied {
                role,
                reason: DenialReason::RoleNotAllowed,
                permitted_roles: permitted_roles(),
            });
        }
    }

    if let Some(module) = module {
        if !policy.has_module_access(role, module) {
            tracing::debug!(
                principal = %user.principal_id,
                role = %role,
                module = %module,
                "route denied: no module access"
            );
            return GuardDecision::Deny(AccessDenied {
                role,
                reason: DenialReason::ModuleAccessDenied { module },
                permitted_roles: permitted_roles(),
            });
        }
    }

    GuardDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduerp_auth::PrincipalId;
    use uuid::Uuid;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(PrincipalId::from_uuid(Uuid::now_v7()), role)
    }

    fn check(role: Role, requirement: &RouteRequirement) -> GuardDecision {
        guard_route(AccessPolicy::standard(), Some(&user(role)), requirement)
    }

    #[test]
    fn unauthenticated_is_redirected() {
        let restricted = RouteRequirement::open().for_roles([Role::SuperAdmin]).in_module("master-setup");
        for requirement in [RouteRequirement::open(), restricted] {
            let decision = guard_route(AccessPolicy::standard(), None, &requirement);
            assert_eq!(decision, GuardDecision::RedirectToLogin);
        }
    }

    #[test]
    fn open_routes_allow_any_authenticated_role() {
        for role in Role::ALL {
            assert!(check(*role, &RouteRequirement::open()).is_allowed());
        }
    }

    #[test]
    fn module_route_requires_module_access() {
        let req = RouteRequirement::open().in_module("master-setup");
        assert!(check(Role::SuperAdmin, &req).is_allowed());

        let GuardDecision::Deny(denied) = check(Role::Admin, &req) else {
            panic!("expected denial");
        };
        assert_eq!(denied.reason, DenialReason::ModuleAccessDenied { module: ModuleId::MasterSetup });
        assert_eq!(denied.permitted_roles, vec![Role::SuperAdmin]);
    }

    #[test]
    fn role_list_and_module_must_both_pass() {
        let req = RouteRequirement::open()
            .for_roles([Role::Admin, Role::Parent])
            .in_module("examination");

        assert!(check(Role::Admin, &req).is_allowed());

        // Listed, but parent has no module grants.
        let GuardDecision::Deny(denied) = check(Role::Parent, &req) else {
            panic!("expected denial");
        };
        assert_eq!(denied.reason, DenialReason::ModuleAccessDenied { module: ModuleId::Examination });
        assert_eq!(denied.permitted_roles, vec![Role::Admin]);

        // Module accessible, but not listed.
        let GuardDecision::Deny(denied) = check(Role::Faculty, &req) else {
            panic!("expected denial");
        };
        assert_eq!(denied.reason, DenialReason::RoleNotAllowed);
    }

    #[test]
    fn guard_role_list_honors_equivalence() {
        let as_institution = RouteRequirement::open().for_roles([Role::Institution]).in_module("academic-operation");
        let as_principal = RouteRequirement::open().for_roles([Role::Principal]).in_module("academic-operation");

        for role in [Role::Institution, Role::Principal] {
            assert!(check(role, &as_institution).is_allowed());
            assert!(check(role, &as_principal).is_allowed());
        }

        let GuardDecision::Deny(denied) = check(Role::Hod, &as_institution) else {
            panic!("expected denial");
        };
        assert_eq!(denied.permitted_roles, vec![Role::Institution, Role::Principal]);
    }

    #[test]
    fn invalid_module_fails_closed_even_for_super_admin() {
        let req = RouteRequirement::open().in_module("teleportation");
        let GuardDecision::Deny(denied) = check(Role::SuperAdmin, &req) else {
            panic!("expected denial");
        };
        assert_eq!(
            denied.reason,
            DenialReason::InvalidModule {
                module: "teleportation".to_string()
            }
        );
        assert!(denied.permitted_roles.is_empty());
    }

    #[test]
    fn decision_serializes_for_the_denied_view() {
        let req = RouteRequirement::open().in_module("finance-accounts");
        let json = serde_json::to_value(check(Role::Student, &req)).unwrap();
        assert_eq!(json["decision"], "deny");
        assert_eq!(json["reason"]["kind"], "module_access_denied");
        assert_eq!(json["reason"]["module"], "finance-accounts");
        assert_eq!(json["permitted_roles"], serde_json::json!(["super-admin", "admin"]));
    }

    #[test]
    fn requirements_deserialize_from_route_tables() {
        let req: RouteRequirement =
            serde_json::from_str(r#"{ "allowed_roles": ["hod"], "module": "lms" }"#).unwrap();
        assert_eq!(req, RouteRequirement::open().for_roles([Role::Hod]).in_module("lms"));
    }
}
