use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{self, PasswordError};
use crate::auth::{generate_jwt, Claims};
use crate::catalog::validation;
use crate::catalog::{gate, CatalogError, CatalogResult, Identity};

/// A stored user. `password` holds the Argon2 hash and never leaves the
/// service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<UserRecord> for UserProfile {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(email)]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    #[validate(length(min = 8))]
    pub new_password: String,

    #[serde(default)]
    #[validate(length(min = 8))]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_at: i64,
    pub user: UserProfile,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> CatalogResult<Option<UserRecord>>;

    async fn find_by_id(&self, id: i64) -> CatalogResult<Option<UserRecord>>;

    /// Returns the number of rows touched.
    async fn update_password(&self, id: i64, password_hash: &str) -> CatalogResult<u64>;
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    jwt_secret: String,
    jwt_expiry_hours: u64,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, jwt_secret: impl Into<String>, jwt_expiry_hours: u64) -> Self {
        Self {
            store,
            jwt_secret: jwt_secret.into(),
            jwt_expiry_hours,
        }
    }

    /// Unknown email and wrong password fail the same way.
    pub async fn login(&self, request: LoginRequest) -> CatalogResult<LoginResponse> {
        validation::validate(&request)?;

        let user = match self.store.find_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                tracing::info!(stage = "user.login", "login for unknown email");
                return Err(CatalogError::Unauthorized);
            }
        };

        match password::verify_password(&request.password, &user.password) {
            Ok(()) => {}
            Err(PasswordError::Mismatch) => {
                tracing::info!(stage = "user.login", user_id = user.id, "wrong password");
                return Err(CatalogError::Unauthorized);
            }
            Err(e) => {
                tracing::error!(stage = "user.login", user_id = user.id, error = %e, "stored hash unusable");
                return Err(CatalogError::Unauthorized);
            }
        }

        let claims = Claims::new(user.id, user.email.clone(), self.jwt_expiry_hours);
        let access_token = generate_jwt(&claims, &self.jwt_secret).map_err(|e| {
            tracing::error!(stage = "user.login", error = %e, "token generation failed");
            CatalogError::storage(e)
        })?;

        Ok(LoginResponse {
            access_token,
            expires_at: claims.exp,
            user: user.into(),
        })
    }

    pub async fn profile(&self, identity: Identity) -> CatalogResult<UserProfile> {
        let caller = gate::require(&identity)?;
        match self.store.find_by_id(caller.user_id()).await? {
            Some(user) => Ok(user.into()),
            None => Err(CatalogError::NotFound(format!("user {} not found", caller.user_id()))),
        }
    }

    pub async fn update_password(&self, identity: Identity, request: UpdatePasswordRequest) -> CatalogResult<()> {
        let caller = gate::require(&identity)?;
        validation::validate(&request)?;

        if request.new_password != request.confirm_password {
            return Err(CatalogError::Validation("confirm_password must match new_password".to_string()));
        }

        let hash = password::hash_password(&request.new_password).map_err(|e| {
            tracing::error!(stage = "user.update_password", error = %e, "hashing failed");
            CatalogError::storage(e)
        })?;

        let touched = self.store.update_password(caller.user_id(), &hash).await.map_err(|e| {
            tracing::error!(stage = "user.update_password", user_id = caller.user_id(), error = %e, "update failed");
            e
        })?;
        if touched == 0 {
            return Err(CatalogError::NotFound(format!("user {} not found", caller.user_id())));
        }

        tracing::info!(user_id = caller.user_id(), "password updated");
        Ok(())
    }
}
