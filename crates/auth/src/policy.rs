//! Access matrix engine: the single source of truth for "may role R enter module M".

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use eduerp_core::ModuleId;

use crate::catalog::ModuleCatalog;
use crate::diagnostics;
use crate::matrix::{AccessMatrix, ModuleGrant, SpecialModuleRule};
use crate::roles::Role;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("malformed access policy: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("access matrix has no entry for role(s): {0}")]
    MissingRoleEntries(String),
}

/// Which rule decided an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    /// No matrix entry for the role (fail-safe deny).
    MissingEntry,
    /// The module's override rule decided.
    SpecialRule,
    /// The role holds the wildcard grant.
    Wildcard,
    /// The module is listed for the role.
    Listed,
    /// The module is not listed for the role.
    NotListed,
}

/// Outcome of a single role/module check, before any diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub granted: bool,
    pub rule: DecisionRule,
}

/// Derived access figures for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleAccessSummary {
    /// Priority-ordered.
    pub accessible: Vec<ModuleId>,
    /// Priority-ordered.
    pub restricted: Vec<ModuleId>,
    pub access_percentage: u8,
}

/// On-disk/JSON form of a policy.
#[derive(Debug, Deserialize)]
struct PolicyDocument {
    matrix: AccessMatrix,
    #[serde(default)]
    special_rule: Option<SpecialModuleRule>,
    #[serde(default)]
    catalog: Option<ModuleCatalog>,
}

/// Immutable bundle of the access tables plus the queries over them.
///
/// Build one per process (see [`AccessPolicy::standard`]) and pass it by
/// reference; tests construct alternates with [`AccessPolicy::new`].
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    matrix: AccessMatrix,
    special_rule: Option<SpecialModuleRule>,
    catalog: ModuleCatalog,
}

impl AccessPolicy {
    pub fn new(matrix: AccessMatrix, special_rule: Option<SpecialModuleRule>, catalog: ModuleCatalog) -> Self {
        Self {
            matrix,
            special_rule,
            catalog,
        }
    }

    /// Process-wide standard tables, built on first use.
    pub fn standard() -> &'static AccessPolicy {
        static STANDARD: OnceLock<AccessPolicy> = OnceLock::new();
        STANDARD.get_or_init(|| {
            AccessPolicy::new(
                AccessMatrix::standard(),
                Some(SpecialModuleRule::master_setup()),
                ModuleCatalog::standard(),
            )
        })
    }

    /// Parse a policy document.
    ///
    /// Unlike [`AccessPolicy::new`], this rejects a matrix that is missing any
    /// role: configuration drift is caught at load time. An omitted catalog
    /// means the standard one.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let doc: PolicyDocument = serde_json::from_str(json)?;

        let missing = doc.matrix.missing_roles();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|r| r.as_str()).collect();
            return Err(PolicyError::MissingRoleEntries(names.join(", ")));
        }

        Ok(Self::new(
            doc.matrix,
            doc.special_rule,
            doc.catalog.unwrap_or_else(ModuleCatalog::standard),
        ))
    }

    pub fn matrix(&self) -> &AccessMatrix {
        &self.matrix
    }

    pub fn special_rule(&self) -> Option<&SpecialModuleRule> {
        self.special_rule.as_ref()
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    /// Matrix entries that apply to `role`, honoring institution/principal
    /// equivalence. Empty means the role is unknown to this matrix.
    fn grants_for(&self, role: Role) -> Vec<&ModuleGrant> {
        Role::ALL
            .iter()
            .filter(|r| r.matches(role))
            .filter_map(|r| self.matrix.grant(*r))
            .collect()
    }

    /// Evaluate a check without emitting diagnostics.
    pub fn decide(&self, role: Role, module: ModuleId) -> Decision {
        let grants = self.grants_for(role);
        if grants.is_empty() {
            return Decision {
                granted: false,
                rule: DecisionRule::MissingEntry,
            };
        }

        if let Some(rule) = self.special_rule.as_ref().filter(|r| r.governs(module)) {
            return Decision {
                granted: rule.allows(role),
                rule: DecisionRule::SpecialRule,
            };
        }

        if grants.iter().any(|g| matches!(g, ModuleGrant::All)) {
            return Decision {
                granted: true,
                rule: DecisionRule::Wildcard,
            };
        }

        if grants.iter().any(|g| g.contains(module)) {
            Decision {
                granted: true,
                rule: DecisionRule::Listed,
            }
        } else {
            Decision {
                granted: false,
                rule: DecisionRule::NotListed,
            }
        }
    }

    pub fn has_module_access(&self, role: Role, module: ModuleId) -> bool {
        let decision = self.decide(role, module);
        if decision.rule == DecisionRule::MissingEntry {
            diagnostics::missing_matrix_entry(role, Some(module));
        }
        decision.granted
    }

    /// Access check for a role string from outside the typed boundary.
    pub fn has_module_access_str(&self, raw_role: &str, module: ModuleId) -> bool {
        match raw_role.parse::<Role>() {
            Ok(role) => self.has_module_access(role, module),
            Err(_) => {
                diagnostics::unknown_role(raw_role);
                false
            }
        }
    }

    pub fn is_valid_module_id(&self, candidate: &str) -> bool {
        eduerp_core::is_valid_module_id(candidate)
    }

    /// The escape hatch: only the override module's universal-access role,
    /// and only while inside that module.
    pub fn can_access_all_modules_in_context(&self, role: Role, current: ModuleId) -> bool {
        self.special_rule
            .as_ref()
            .is_some_and(|rule| rule.governs(current) && rule.grants_universal_access(role))
    }

    pub fn accessible_modules(&self, role: Role) -> BTreeSet<ModuleId> {
        if self.grants_for(role).is_empty() {
            diagnostics::missing_matrix_entry(role, None);
            return BTreeSet::new();
        }

        ModuleId::ALL
            .iter()
            .copied()
            .filter(|m| self.decide(role, *m).granted)
            .collect()
    }

    pub fn restricted_modules(&self, role: Role) -> BTreeSet<ModuleId> {
        let accessible = self.accessible_modules(role);
        ModuleId::ALL
            .iter()
            .copied()
            .filter(|m| !accessible.contains(m))
            .collect()
    }

    pub fn access_summary(&self, role: Role) -> ModuleAccessSummary {
        let accessible = self.accessible_modules(role);
        let restricted: Vec<ModuleId> = ModuleId::ALL
            .iter()
            .copied()
            .filter(|m| !accessible.contains(m))
            .collect();

        let total = accessible.len() + restricted.len();
        let access_percentage = if total == 0 {
            0
        } else {
            (100.0 * accessible.len() as f64 / total as f64).round() as u8
        };

        ModuleAccessSummary {
            accessible: self.sort_modules_by_priority(accessible),
            restricted: self.sort_modules_by_priority(restricted),
            access_percentage,
        }
    }

    pub fn module_category(&self, module: ModuleId) -> &str {
        self.catalog.category(module)
    }

    pub fn module_priority(&self, module: ModuleId) -> u32 {
        self.catalog.priority(module)
    }

    pub fn module_display_name(&self, module: ModuleId) -> &str {
        self.catalog.display_name(module)
    }

    pub fn role_display_name(&self, role: Role) -> &'static str {
        role.display_name()
    }

    pub fn sort_modules_by_priority(&self, modules: impl IntoIterator<Item = ModuleId>) -> Vec<ModuleId> {
        let mut modules: Vec<ModuleId> = modules.into_iter().collect();
        self.catalog.sort_by_priority(&mut modules);
        modules
    }

    /// Accessible modules grouped by category, each group priority-ordered.
    pub fn modules_by_category(&self, role: Role) -> BTreeMap<String, Vec<ModuleId>> {
        let mut groups: BTreeMap<String, Vec<ModuleId>> = BTreeMap::new();
        for module in self.accessible_modules(role) {
            groups
                .entry(self.module_category(module).to_string())
                .or_default()
                .push(module);
        }
        for modules in groups.values_mut() {
            self.catalog.sort_by_priority(modules);
        }
        groups
    }

    /// Every role that may enter `module`.
    pub fn roles_with_access(&self, module: ModuleId) -> Vec<Role> {
        Role::ALL
            .iter()
            .copied()
            .filter(|r| self.decide(*r, module).granted)
            .collect()
    }
}
