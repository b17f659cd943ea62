use core::str::FromStr;

use serde::{Deserialize, Serialize};

use eduerp_core::DomainError;

/// Permission class of the acting user (closed set).
///
/// Supplied by the authentication layer and immutable for a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Institution,
    Principal,
    Hod,
    Faculty,
    Staff,
    Student,
    Parent,
}

impl Role {
    pub const ALL: &'static [Role] = &[
        Role::SuperAdmin,
        Role::Admin,
        Role::Institution,
        Role::Principal,
        Role::Hod,
        Role::Faculty,
        Role::Staff,
        Role::Student,
        Role::Parent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super-admin",
            Role::Admin => "admin",
            Role::Institution => "institution",
            Role::Principal => "principal",
            Role::Hod => "hod",
            Role::Faculty => "faculty",
            Role::Staff => "staff",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Administrator",
            Role::Admin => "Administrator",
            Role::Institution => "Institution",
            Role::Principal => "Principal",
            Role::Hod => "Head of Department",
            Role::Faculty => "Faculty",
            Role::Staff => "Staff",
            Role::Student => "Student",
            Role::Parent => "Parent",
        }
    }

    /// Whether a role-list entry `self` admits a user acting as `other`.
    ///
    /// `institution` and `principal` are interchangeable for every access
    /// decision; all other roles only match themselves.
    pub fn matches(&self, other: Role) -> bool {
        *self == other
            || matches!(
                (self, other),
                (Role::Institution, Role::Principal) | (Role::Principal, Role::Institution)
            )
    }
}

/// Role-list membership with institution/principal equivalence.
///
/// Every permission check that consults a list of roles goes through here.
pub fn role_list_allows(allowed: &[Role], role: Role) -> bool {
    allowed.iter().any(|r| r.matches(role))
}

/// Display name for an unvalidated role string; unknown roles render as-is.
pub fn role_display_name_str(raw: &str) -> &str {
    match raw.parse::<Role>() {
        Ok(role) => role.display_name(),
        Err(_) => raw,
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DomainError::unknown_role(s))
    }
}
