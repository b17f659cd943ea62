//! `eduerp-navigation`: scoped navigation over the authorization core.
//!
//! - [`scope`] decides which module a navigation event is locked to.
//! - [`menu`] filters the static menu tree per render.
//! - [`guard`] decides whether a page may render at all.
//!
//! Scope resolution and permission checks are kept apart: a scope never
//! widens what the role may see, it only narrows the menu.

pub mod guard;
pub mod menu;
pub mod scope;

pub use guard::{AccessDenied, DenialReason, GuardDecision, RouteRequirement, guard_route};
pub use menu::{MenuFilter, MenuNode, MenuTarget, routes_of};
pub use scope::{
    AliasTable, ExplicitContext, NavigationRequest, NavigationScope, ScopeLock, ScopeResolver, module_id_for_alias,
};
