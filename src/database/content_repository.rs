use async_trait::async_trait;
use sqlx::PgPool;

use crate::catalog::{CatalogError, CatalogResult, ContentDraft, ContentPage, ContentQuery, ContentRecord, ContentStore};
use crate::database::manager::DatabaseError;
use crate::database::models::ContentRow;
use crate::database::query_builder::{self, QueryBuilder};
use crate::filter::{Filter, SqlParam, SqlResult};

/// Postgres-backed [`ContentStore`].
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn log_failure(stage: &'static str, err: DatabaseError) -> CatalogError {
    tracing::error!(stage, error = %err, "database call failed");
    CatalogError::from(err)
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn list(&self, query: &ContentQuery) -> CatalogResult<ContentPage> {
        let filter = Filter::new(query)?;
        let count_sql = filter.to_count_sql();
        let page = QueryBuilder::<ContentRow>::new(filter.to_sql());

        let (total_rows, rows) = futures::try_join!(
            query_builder::count(&count_sql, &self.pool),
            page.select_all(&self.pool)
        )
        .map_err(|e| log_failure("store.list", e))?;

        Ok(ContentPage {
            records: rows.into_iter().map(ContentRecord::from).collect(),
            total_rows,
        })
    }

    async fn find_by_id(&self, id: i64) -> CatalogResult<Option<ContentRecord>> {
        let sql = SqlResult {
            query: format!("{} WHERE c.\"id\" = $1", Filter::select_prefix()),
            params: vec![SqlParam::Int(id)],
        };
        let row = QueryBuilder::<ContentRow>::new(sql)
            .select_optional(&self.pool)
            .await
            .map_err(|e| log_failure("store.find_by_id", e))?;
        Ok(row.map(ContentRecord::from))
    }

    async fn insert(&self, draft: &ContentDraft, created_by_id: i64) -> CatalogResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO contents (title, excerpt, description, image, tags, status, category_id, created_by_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
        )
        .bind(&draft.title)
        .bind(&draft.excerpt)
        .bind(&draft.description)
        .bind(draft.image.as_deref().unwrap_or_default())
        .bind(&draft.tags)
        .bind(&draft.status)
        .bind(draft.category_id)
        .bind(created_by_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| log_failure("store.insert", e.into()))?;
        Ok(id)
    }

    async fn update(&self, id: i64, draft: &ContentDraft) -> CatalogResult<u64> {
        let result = sqlx::query(
            "UPDATE contents SET title = $1, excerpt = $2, description = $3, image = COALESCE($4, image), \
             tags = $5, status = $6, category_id = $7, updated_at = now() WHERE id = $8",
        )
        .bind(&draft.title)
        .bind(&draft.excerpt)
        .bind(&draft.description)
        .bind(draft.image.as_deref())
        .bind(&draft.tags)
        .bind(&draft.status)
        .bind(draft.category_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| log_failure("store.update", e.into()))?;
        Ok(result.rows_affected())
    }

    async fn update_image(&self, id: i64, image: &str) -> CatalogResult<u64> {
        let result = sqlx::query("UPDATE contents SET image = $1, updated_at = now() WHERE id = $2")
            .bind(image)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| log_failure("store.update_image", e.into()))?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> CatalogResult<()> {
        sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| log_failure("store.delete", e.into()))?;
        Ok(())
    }
}
