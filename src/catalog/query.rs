use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::{CatalogError, CatalogResult};

/// Status every public listing is pinned to.
pub const PUBLISHED: &str = "PUBLISH";

/// Which listing a request belongs to; decides the default page size and
/// whether the status filter is forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    Admin,
    Public,
}

/// Columns a listing may be ordered by. Anything else is rejected because
/// the column name ends up in the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentColumn {
    Id,
    Title,
    Excerpt,
    Status,
    CategoryId,
    CreatedById,
    CreatedAt,
}

impl ContentColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentColumn::Id => "id",
            ContentColumn::Title => "title",
            ContentColumn::Excerpt => "excerpt",
            ContentColumn::Status => "status",
            ContentColumn::CategoryId => "category_id",
            ContentColumn::CreatedById => "created_by_id",
            ContentColumn::CreatedAt => "created_at",
        }
    }
}

impl FromStr for ContentColumn {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(ContentColumn::Id),
            "title" => Ok(ContentColumn::Title),
            "excerpt" => Ok(ContentColumn::Excerpt),
            "status" => Ok(ContentColumn::Status),
            "category_id" => Ok(ContentColumn::CategoryId),
            "created_by_id" => Ok(ContentColumn::CreatedById),
            "created_at" => Ok(ContentColumn::CreatedAt),
            other => Err(CatalogError::invalid_parameter(
                "orderBy",
                format!("unknown column '{}'", other),
            )),
        }
    }
}

impl fmt::Display for ContentColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(CatalogError::invalid_parameter(
                "orderType",
                format!("expected ASC or DESC, got '{}'", s),
            ))
        }
    }
}

/// Page sizes handed to the normalizer; built from `ListingConfig` at startup.
#[derive(Debug, Clone, Copy)]
pub struct ListingDefaults {
    pub admin_limit: i64,
    pub public_limit: i64,
    pub max_limit: Option<i64>,
}

impl Default for ListingDefaults {
    fn default() -> Self {
        Self {
            admin_limit: 10,
            public_limit: 6,
            max_limit: Some(100),
        }
    }
}

impl ListingDefaults {
    fn default_limit(&self, mode: ListingMode) -> i64 {
        match mode {
            ListingMode::Admin => self.admin_limit,
            ListingMode::Public => self.public_limit,
        }
    }
}

/// A normalized listing request. Every field already holds its default, so
/// consumers never see a missing value or a non-positive page or limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub limit: i64,
    pub page: i64,
    pub order_by: ContentColumn,
    pub order_type: SortDirection,
    pub search: String,
    pub status: String,
    pub category_id: i64,
}

impl QuerySpec {
    /// Turns raw query-string parameters into a `QuerySpec`.
    ///
    /// Recognised keys: `page`, `limit`, `orderBy`, `orderType`, `search`,
    /// `categoryID`, and `status` (admin listings only). Empty values count as
    /// absent. A numeric value that does not parse fails the whole call.
    pub fn normalize(
        params: &HashMap<String, String>,
        mode: ListingMode,
        defaults: &ListingDefaults,
    ) -> CatalogResult<Self> {
        let default_limit = defaults.default_limit(mode);

        let page = match parse_int(params, "page")? {
            Some(page) if page >= 1 => page,
            _ => 1,
        };

        let mut limit = match parse_int(params, "limit")? {
            Some(limit) if limit >= 1 => limit,
            _ => default_limit,
        };
        if let Some(max) = defaults.max_limit {
            if limit > max {
                tracing::warn!(requested = limit, max, "listing limit capped");
                limit = max;
            }
        }

        if !super::pagination::offset_fits(page, limit) {
            return Err(CatalogError::invalid_parameter("page", format!("'{}' is out of range", page)));
        }

        let order_by = match param(params, "orderBy") {
            Some(column) => column.parse()?,
            None => ContentColumn::CreatedAt,
        };

        let order_type = match param(params, "orderType") {
            Some(direction) => direction.parse()?,
            None => SortDirection::Desc,
        };

        let category_id = parse_int(params, "categoryID")?.unwrap_or(0);

        let status = match mode {
            ListingMode::Public => PUBLISHED.to_string(),
            ListingMode::Admin => param(params, "status").unwrap_or_default().to_string(),
        };

        Ok(Self {
            limit,
            page,
            order_by,
            order_type,
            search: param(params, "search").unwrap_or_default().to_string(),
            status,
            category_id,
        })
    }

    pub fn offset(&self) -> i64 {
        super::pagination::offset(self.page, self.limit)
    }
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

fn parse_int(params: &HashMap<String, String>, key: &str) -> CatalogResult<Option<i64>> {
    match param(params, key) {
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| CatalogError::invalid_parameter(key, format!("'{}' is not a number", raw))),
        None => Ok(None),
    }
}
