use async_trait::async_trait;
use sqlx::PgPool;

use crate::catalog::CatalogResult;
use crate::database::models::UserRow;
use crate::services::{UserRecord, UserStore};

/// Postgres-backed [`UserStore`].
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the id of the user with `email`, inserting it first if absent.
    /// An existing user keeps its name and password.
    pub async fn first_or_create(&self, name: &str, email: &str, password_hash: &str) -> CatalogResult<(i64, bool)> {
        if let Some(existing) = self.find_by_email(email).await? {
            return Ok((existing.id, false));
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) \
             ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok((id, true))
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> CatalogResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, name, email, password FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(stage = "users.find_by_email", error = %e, "database call failed");
                e
            })?;
        Ok(row.map(UserRecord::from))
    }

    async fn find_by_id(&self, id: i64) -> CatalogResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, name, email, password FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(stage = "users.find_by_id", error = %e, "database call failed");
                e
            })?;
        Ok(row.map(UserRecord::from))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> CatalogResult<u64> {
        let result = sqlx::query("UPDATE users SET password = $1, updated_at = now() WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(stage = "users.update_password", error = %e, "database call failed");
                e
            })?;
        Ok(result.rows_affected())
    }
}
