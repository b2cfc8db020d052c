use std::sync::Arc;

use super::error::{CatalogError, CatalogResult};
use super::model::Content;
use super::pagination::{self, Pagination};
use super::query::QuerySpec;
use super::store::{ContentQuery, ContentStore};

/// Result of a listing: the requested page and the size of the filtered set.
#[derive(Debug, Clone)]
pub struct ContentListing {
    pub items: Vec<Content>,
    pub total_rows: i64,
    pub total_pages: i64,
    pub page: i64,
    pub limit: i64,
}

impl ContentListing {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            total_records: self.total_rows,
            page: self.page,
            per_page: self.limit,
            total_pages: self.total_pages,
        }
    }
}

/// Read side of the catalog.
#[derive(Clone)]
pub struct ContentQueryExecutor {
    store: Arc<dyn ContentStore>,
}

impl ContentQueryExecutor {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, wanted: &QuerySpec) -> CatalogResult<ContentListing> {
        let query = ContentQuery::from(wanted);
        let page = self.store.list(&query).await.map_err(|e| {
            tracing::error!(stage = "executor.list", error = %e, "content listing failed");
            e
        })?;

        Ok(ContentListing {
            total_pages: pagination::total_pages(page.total_rows, wanted.limit),
            total_rows: page.total_rows,
            items: page.records.into_iter().map(Content::from).collect(),
            page: wanted.page,
            limit: wanted.limit,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> CatalogResult<Content> {
        match self.store.find_by_id(id).await {
            Ok(Some(record)) => Ok(Content::from(record)),
            Ok(None) => Err(CatalogError::NotFound(format!("content {} not found", id))),
            Err(e) => {
                tracing::error!(stage = "executor.get_by_id", id, error = %e, "content lookup failed");
                Err(e)
            }
        }
    }
}
