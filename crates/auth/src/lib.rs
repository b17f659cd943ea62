//! `eduerp-auth`: pure role/module authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP, storage and rendering.
//! Every decision is a pure function of the injected [`AccessPolicy`] tables
//! plus the caller's role; surprises fail closed and are reported through
//! [`diagnostics`].

pub mod authorize;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod matrix;
pub mod policy;
pub mod principal;
pub mod roles;
pub mod user;

pub use authorize::{AccessExplanation, RoleAccessReport, access_report, explain_module_access};
pub use catalog::{ModuleCatalog, ModuleInfo};
pub use matrix::{AccessMatrix, ModuleGrant, SpecialModuleRule};
pub use policy::{AccessPolicy, Decision, DecisionRule, ModuleAccessSummary, PolicyError};
pub use principal::PrincipalId;
pub use roles::{Role, role_display_name_str, role_list_allows};
pub use user::AuthenticatedUser;
