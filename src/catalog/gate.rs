use serde::Serialize;

use super::error::{CatalogError, CatalogResult};

/// Caller identity as established by the token layer. `user_id == 0` means
/// no verified identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
}

impl Identity {
    pub const ANONYMOUS: Identity = Identity { user_id: 0 };

    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}

/// Proof that an identity passed the gate. Only [`require`] builds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    user_id: i64,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> i64 {
        self.user_id
    }
}

/// Rejects the zero identity (and any negative id) with `Unauthorized`.
pub fn require(identity: &Identity) -> CatalogResult<AuthenticatedUser> {
    if identity.user_id <= 0 {
        tracing::debug!(stage = "gate.require", user_id = identity.user_id, "rejected caller without identity");
        return Err(CatalogError::Unauthorized);
    }
    Ok(AuthenticatedUser {
        user_id: identity.user_id,
    })
}
