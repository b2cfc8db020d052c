use async_trait::async_trait;

use super::error::CatalogResult;
use super::model::{ContentDraft, ContentRecord};
use super::query::{ContentColumn, QuerySpec, SortDirection};

/// Row predicate shared by the count and the page fetch of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    /// Case-insensitive substring of title, excerpt or description.
    pub search: String,
    /// Substring of status (not equality); empty matches everything.
    pub status: String,
    /// 0 means no category filter.
    pub category_id: i64,
}

/// One page of a listing as handed to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub filter: ContentFilter,
    pub order_by: ContentColumn,
    pub order_type: SortDirection,
    pub limit: i64,
    pub offset: i64,
}

impl From<&QuerySpec> for ContentQuery {
    fn from(wanted: &QuerySpec) -> Self {
        Self {
            filter: ContentFilter {
                search: wanted.search.clone(),
                status: wanted.status.clone(),
                category_id: wanted.category_id,
            },
            order_by: wanted.order_by,
            order_type: wanted.order_type,
            limit: wanted.limit,
            offset: wanted.offset(),
        }
    }
}

/// A page of records plus the row count of the whole filtered set.
#[derive(Debug, Clone, Default)]
pub struct ContentPage {
    pub records: Vec<ContentRecord>,
    pub total_rows: i64,
}

/// Persistence for content rows. Implementations must be safe to share
/// between concurrent requests.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Count the filtered set, then fetch the requested page of it with
    /// category and author joined.
    async fn list(&self, query: &ContentQuery) -> CatalogResult<ContentPage>;

    async fn find_by_id(&self, id: i64) -> CatalogResult<Option<ContentRecord>>;

    /// Returns the new row id.
    async fn insert(&self, draft: &ContentDraft, created_by_id: i64) -> CatalogResult<i64>;

    /// Returns the number of rows touched.
    async fn update(&self, id: i64, draft: &ContentDraft) -> CatalogResult<u64>;

    /// Returns the number of rows touched.
    async fn update_image(&self, id: i64, image: &str) -> CatalogResult<u64>;

    async fn delete(&self, id: i64) -> CatalogResult<()>;
}
