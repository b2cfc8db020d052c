//! In-memory stand-ins for Postgres and R2 used by unit and router tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::auth::password;
use crate::catalog::{
    AuthorSummary, CatalogError, CatalogResult, CategorySummary, ContentColumn, ContentDraft, ContentFilter,
    ContentPage, ContentQuery, ContentRecord, ContentStore, ObjectStore, SortDirection,
};
use crate::services::{UserRecord, UserStore};

/// A record created `minute` minutes after a fixed base time, tagged `news,tech`.
pub fn sample_record(id: i64, title: &str, status: &str, category_id: i64, author_id: i64, minute: i64) -> ContentRecord {
    ContentRecord {
        id,
        title: title.to_string(),
        excerpt: format!("{} excerpt", title),
        description: format!("{} description", title),
        image: "https://cdn.example.com/seed.jpg".to_string(),
        tags: "news,tech".to_string(),
        status: status.to_string(),
        category_id,
        created_by_id: author_id,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(minute),
        category: None,
        author: None,
    }
}

/// Content store with the same predicate semantics as the SQL one. Every
/// trait call bumps `calls()`, so it doubles as a storage spy.
#[derive(Default)]
pub struct InMemoryContentStore {
    rows: Mutex<Vec<ContentRecord>>,
    categories: Mutex<HashMap<i64, CategorySummary>>,
    authors: Mutex<HashMap<i64, AuthorSummary>>,
    calls: AtomicUsize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, record: ContentRecord) {
        self.rows.lock().unwrap().push(record);
    }

    pub fn add_category(&self, id: i64, title: &str, slug: &str) {
        self.categories.lock().unwrap().insert(
            id,
            CategorySummary {
                id,
                title: title.to_string(),
                slug: slug.to_string(),
            },
        );
    }

    pub fn add_author(&self, id: i64, name: &str) {
        self.authors.lock().unwrap().insert(
            id,
            AuthorSummary {
                id,
                name: name.to_string(),
            },
        );
    }

    pub fn get(&self, id: i64) -> Option<ContentRecord> {
        self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn check_writable(&self) -> CatalogResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CatalogError::Storage("write refused".to_string()));
        }
        Ok(())
    }

    fn joined(&self, record: &ContentRecord) -> ContentRecord {
        let mut record = record.clone();
        record.category = self.categories.lock().unwrap().get(&record.category_id).cloned();
        record.author = self.authors.lock().unwrap().get(&record.created_by_id).cloned();
        record
    }

    fn matches(filter: &ContentFilter, record: &ContentRecord) -> bool {
        let needle = filter.search.to_lowercase();
        let searched = needle.is_empty()
            || record.title.to_lowercase().contains(&needle)
            || record.excerpt.to_lowercase().contains(&needle)
            || record.description.to_lowercase().contains(&needle);
        let status = record.status.contains(&filter.status);
        let category = filter.category_id <= 0 || record.category_id == filter.category_id;
        searched && status && category
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn list(&self, query: &ContentQuery) -> CatalogResult<ContentPage> {
        self.touch();
        let mut matching: Vec<ContentRecord> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| Self::matches(&query.filter, r))
            .cloned()
            .collect();
        let total_rows = matching.len() as i64;

        matching.sort_by(|a, b| {
            let ordering = match query.order_by {
                ContentColumn::Id => a.id.cmp(&b.id),
                ContentColumn::Title => a.title.cmp(&b.title),
                ContentColumn::Excerpt => a.excerpt.cmp(&b.excerpt),
                ContentColumn::Status => a.status.cmp(&b.status),
                ContentColumn::CategoryId => a.category_id.cmp(&b.category_id),
                ContentColumn::CreatedById => a.created_by_id.cmp(&b.created_by_id),
                ContentColumn::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match query.order_type {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let records = matching
            .iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .map(|r| self.joined(r))
            .collect();

        Ok(ContentPage { records, total_rows })
    }

    async fn find_by_id(&self, id: i64) -> CatalogResult<Option<ContentRecord>> {
        self.touch();
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CatalogError::Storage("read refused".to_string()));
        }
        Ok(self.get(id).map(|r| self.joined(&r)))
    }

    async fn insert(&self, draft: &ContentDraft, created_by_id: i64) -> CatalogResult<i64> {
        self.touch();
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        rows.push(ContentRecord {
            id,
            title: draft.title.clone(),
            excerpt: draft.excerpt.clone(),
            description: draft.description.clone(),
            image: draft.image.clone().unwrap_or_default(),
            tags: draft.tags.clone(),
            status: draft.status.clone(),
            category_id: draft.category_id,
            created_by_id,
            created_at: Utc::now(),
            category: None,
            author: None,
        });
        Ok(id)
    }

    async fn update(&self, id: i64, draft: &ContentDraft) -> CatalogResult<u64> {
        self.touch();
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(0);
        };
        row.title = draft.title.clone();
        row.excerpt = draft.excerpt.clone();
        row.description = draft.description.clone();
        if let Some(image) = &draft.image {
            row.image = image.clone();
        }
        row.tags = draft.tags.clone();
        row.status = draft.status.clone();
        row.category_id = draft.category_id;
        Ok(1)
    }

    async fn update_image(&self, id: i64, image: &str) -> CatalogResult<u64> {
        self.touch();
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.image = image.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> CatalogResult<()> {
        self.touch();
        self.check_writable()?;
        self.rows.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

/// Object store kept in a map. `failing()` refuses every put.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    deleted: Mutex<Vec<String>>,
    fail_puts: bool,
}

impl MemoryObjectStore {
    pub fn failing() -> Self {
        Self {
            fail_puts: true,
            ..Self::default()
        }
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).map(|(bytes, _)| bytes.clone())
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects.lock().unwrap().get(key).map(|(_, ct)| ct.clone())
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> CatalogResult<()> {
        if self.fail_puts {
            return Err(CatalogError::Upload("bucket unavailable".to_string()));
        }
        let bytes = tokio::fs::read(path).await.map_err(CatalogError::upload)?;
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (bytes, content_type.to_string()));
        Ok(())
    }

    async fn presign_put(&self, key: &str, expires_in: Duration) -> CatalogResult<String> {
        Ok(format!(
            "https://bucket.example.com/{}?X-Amz-Expires={}",
            key,
            expires_in.as_secs()
        ))
    }

    async fn delete(&self, key: &str) -> CatalogResult<()> {
        self.objects.lock().unwrap().remove(key);
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<i64, UserRecord>>,
}

impl InMemoryUserStore {
    /// Stores the user with `plain_password` hashed.
    pub fn add(&self, id: i64, name: &str, email: &str, plain_password: &str) {
        let hash = password::hash_password(plain_password).unwrap();
        self.users.lock().unwrap().insert(
            id,
            UserRecord {
                id,
                name: name.to_string(),
                email: email.to_string(),
                password: hash,
            },
        );
    }

    pub fn password_hash(&self, id: i64) -> Option<String> {
        self.users.lock().unwrap().get(&id).map(|u| u.password.clone())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> CatalogResult<Option<UserRecord>> {
        Ok(self.users.lock().unwrap().values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> CatalogResult<Option<UserRecord>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> CatalogResult<u64> {
        match self.users.lock().unwrap().get_mut(&id) {
            Some(user) => {
                user.password = password_hash.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
