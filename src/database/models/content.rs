use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::catalog::{AuthorSummary, CategorySummary, ContentRecord};

/// A `contents` row with its category and author LEFT JOINed in.
#[derive(Debug, Clone, FromRow)]
pub struct ContentRow {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
    pub description: String,
    pub image: String,
    pub tags: String,
    pub status: String,
    pub category_id: Option<i64>,
    pub created_by_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub category_ref_id: Option<i64>,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    pub author_ref_id: Option<i64>,
    pub author_name: Option<String>,
}

impl From<ContentRow> for ContentRecord {
    fn from(row: ContentRow) -> Self {
        let category = row.category_ref_id.map(|id| CategorySummary {
            id,
            title: row.category_title.unwrap_or_default(),
            slug: row.category_slug.unwrap_or_default(),
        });
        let author = row.author_ref_id.map(|id| AuthorSummary {
            id,
            name: row.author_name.unwrap_or_default(),
        });

        ContentRecord {
            id: row.id,
            title: row.title,
            excerpt: row.excerpt,
            description: row.description,
            image: row.image,
            tags: row.tags,
            status: row.status,
            category_id: row.category_id.unwrap_or(0),
            created_by_id: row.created_by_id.unwrap_or(0),
            created_at: row.created_at,
            category,
            author,
        }
    }
}
