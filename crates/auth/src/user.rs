use serde::{Deserialize, Serialize};

use crate::{PrincipalId, Role};

/// The signed-in user as handed over by the login layer.
///
/// Tokens and session lifetimes are handled upstream. If this value exists,
/// the user is authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub principal_id: PrincipalId,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn new(principal_id: PrincipalId, role: Role) -> Self {
        Self { principal_id, role }
    }
}
