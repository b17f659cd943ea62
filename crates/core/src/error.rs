//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Only boundary parsing produces these. Access decisions themselves never
/// fail: a denial is an outcome, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. not a member of a closed set).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A role string did not name a known role.
    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_role(role: impl Into<String>) -> Self {
        Self::UnknownRole(role.into())
    }
}
