//! Scope resolution: which single module, if any, a navigation request is locked to.
//!
//! Resolution never grants access. It only picks the module whose menu is
//! shown; menu filtering and the route guard still check permission on every
//! item and page.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use eduerp_auth::{AccessPolicy, Role, diagnostics};
use eduerp_core::ModuleId;

/// Context carried on a navigation event by whatever triggered it.
///
/// Both fields must be present (and `scoped_to_module` true) for the context
/// to apply; anything partial is ignored in favor of URL inference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplicitContext {
    #[serde(default)]
    pub scoped_to_module: Option<bool>,
    #[serde(default)]
    pub selected_module: Option<String>,
}

impl ExplicitContext {
    pub fn scoped_to(module: impl Into<String>) -> Self {
        Self {
            scoped_to_module: Some(true),
            selected_module: Some(module.into()),
        }
    }
}

/// A single navigation event: current path plus optional carried context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
    pub context: Option<ExplicitContext>,
}

impl NavigationRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: ExplicitContext) -> Self {
        self.context = Some(context);
        self
    }
}

/// Resolved scope of one navigation event.
///
/// Created per event and consumed once. A scoped value always carries a
/// valid module id and its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationScope {
    Unscoped,
    Scoped {
        module_id: ModuleId,
        display_name: String,
    },
}

impl NavigationScope {
    pub fn is_scoped(&self) -> bool {
        matches!(self, NavigationScope::Scoped { .. })
    }

    pub fn module_id(&self) -> Option<ModuleId> {
        match self {
            NavigationScope::Scoped { module_id, .. } => Some(*module_id),
            NavigationScope::Unscoped => None,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            NavigationScope::Scoped { display_name, .. } => Some(display_name.as_str()),
            NavigationScope::Unscoped => None,
        }
    }
}

/// Flat wire shape consumed by the rendering layer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NavigationScopeView<'a> {
    is_scoped: bool,
    module_id: Option<ModuleId>,
    display_name: Option<&'a str>,
}

impl Serialize for NavigationScope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NavigationScopeView {
            is_scoped: self.is_scoped(),
            module_id: self.module_id(),
            display_name: self.display_name(),
        }
        .serialize(serializer)
    }
}

/// Whether menu filtering is restricted to one module for a given role.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScopeLock {
    /// Everything the role can see.
    Free,
    /// Only items of this module plus module-less items.
    Locked(ModuleId),
}

impl ScopeLock {
    /// Whether an item belonging to `module` (None = cross-cutting) passes the lock.
    pub fn admits(&self, module: Option<ModuleId>) -> bool {
        match (self, module) {
            (ScopeLock::Free, _) | (_, None) => true,
            (ScopeLock::Locked(scoped), Some(module)) => *scoped == module,
        }
    }
}

/// First-segment aliases consulted before the general alias mapping.
///
/// Values are raw module id strings and are validated on every use, so a
/// bad entry degrades to an unscoped view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn standard() -> Self {
        Self::empty()
            .with_alias("lms", "lms")
            .with_alias("academics", "academic-operation")
            .with_alias("exams", "examination")
            .with_alias("master", "master-setup")
    }

    pub fn with_alias(mut self, segment: impl Into<String>, module: impl Into<String>) -> Self {
        self.entries.insert(segment.into(), module.into());
        self
    }

    pub fn get(&self, segment: &str) -> Option<&str> {
        self.entries.get(segment).map(String::as_str)
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// General alias mapping for first path segments not in the alias table.
///
/// Accepts canonical module ids plus the short and plural forms used in
/// routes. Input is expected lowercase.
pub fn module_id_for_alias(segment: &str) -> Option<&'static str> {
    if let Some(module) = ModuleId::parse(segment) {
        return Some(module.as_str());
    }

    let id = match segment {
        "academic" | "academic-operations" => "academic-operation",
        "learning" | "courses" => "lms",
        "exam" | "examinations" => "examination",
        "setup" | "master-data" => "master-setup",
        "admissions" => "admission",
        "students" | "sis" => "student-information",
        "fees" | "fee" => "fee-management",
        "finance" | "accounts" => "finance-accounts",
        "hr" | "payroll" => "hr-payroll",
        "assets" => "inventory",
        "messages" | "notices" => "communication",
        "reports" | "analytics" => "reports-analytics",
        "placements" | "training" => "placement",
        _ => return None,
    };
    Some(id)
}

/// First non-empty path segment, lowercased, ignoring query and fragment.
fn first_segment(path: &str) -> Option<String> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/')
        .find(|s| !s.is_empty())
        .map(|s| s.to_ascii_lowercase())
}

/// Turns navigation requests into scopes using the injected policy tables.
#[derive(Debug, Clone)]
pub struct ScopeResolver<'a> {
    policy: &'a AccessPolicy,
    aliases: AliasTable,
}

impl<'a> ScopeResolver<'a> {
    pub fn new(policy: &'a AccessPolicy) -> Self {
        Self::with_aliases(policy, AliasTable::standard())
    }

    pub fn with_aliases(policy: &'a AccessPolicy, aliases: AliasTable) -> Self {
        Self { policy, aliases }
    }

    pub fn policy(&self) -> &'a AccessPolicy {
        self.policy
    }

    /// Resolve a request: explicit context first, then the URL path.
    pub fn resolve(&self, request: &NavigationRequest) -> NavigationScope {
        if let Some(scope) = request.context.as_ref().and_then(|ctx| self.from_context(ctx)) {
            return scope;
        }
        self.resolve_path(&request.path)
    }

    /// Resolve from the URL path alone.
    pub fn resolve_path(&self, path: &str) -> NavigationScope {
        let Some(segment) = first_segment(path) else {
            return NavigationScope::Unscoped;
        };

        let candidate = self
            .aliases
            .get(&segment)
            .or_else(|| module_id_for_alias(&segment));

        match candidate {
            Some(raw) => self.scoped(raw, "url_alias"),
            None => NavigationScope::Unscoped,
        }
    }

    fn from_context(&self, ctx: &ExplicitContext) -> Option<NavigationScope> {
        match (ctx.scoped_to_module, ctx.selected_module.as_deref()) {
            (Some(true), Some(selected)) if self.policy.is_valid_module_id(selected) => {
                Some(self.scoped(selected, "explicit_context"))
            }
            (Some(true), Some(selected)) => {
                tracing::debug!(module = selected, "ignoring explicit context with unknown module");
                None
            }
            _ => None,
        }
    }

    /// Build a scoped result, re-validating the id; anything invalid is unscoped.
    fn scoped(&self, raw: &str, source: &'static str) -> NavigationScope {
        match ModuleId::parse(raw) {
            Some(module_id) => NavigationScope::Scoped {
                module_id,
                display_name: self.policy.module_display_name(module_id).to_string(),
            },
            None => {
                diagnostics::invalid_module(raw, source);
                NavigationScope::Unscoped
            }
        }
    }

    /// Whether `role` is locked into the scope's module or free to see
    /// everything it may access (unscoped, or inside the escape hatch).
    pub fn lock(&self, role: Role, scope: &NavigationScope) -> ScopeLock {
        match scope.module_id() {
            Some(module) if !self.policy.can_access_all_modules_in_context(role, module) => {
                ScopeLock::Locked(module)
            }
            _ => ScopeLock::Free,
        }
    }
}
