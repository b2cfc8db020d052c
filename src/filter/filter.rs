use crate::catalog::ContentQuery;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterOrderInfo, SqlResult};

const CONTENT_ALIAS: &str = "c";

/// Columns of a listing row. Joined values are aliased so a missing
/// category or author comes back as NULLs rather than dropping the row.
const SELECT_COLUMNS: &str = "c.\"id\", c.\"title\", c.\"excerpt\", c.\"description\", c.\"image\", c.\"tags\", \
c.\"status\", c.\"category_id\", c.\"created_by_id\", c.\"created_at\", \
cat.\"id\" AS category_ref_id, cat.\"title\" AS category_title, cat.\"slug\" AS category_slug, \
u.\"id\" AS author_ref_id, u.\"name\" AS author_name";

const FROM_CLAUSE: &str = "FROM \"contents\" c \
LEFT JOIN \"categories\" cat ON cat.\"id\" = c.\"category_id\" \
LEFT JOIN \"users\" u ON u.\"id\" = c.\"created_by_id\"";

/// Page and count statements for one content listing.
pub struct Filter<'a> {
    query: &'a ContentQuery,
    order: FilterOrderInfo,
}

impl<'a> Filter<'a> {
    pub fn new(query: &'a ContentQuery) -> Result<Self, FilterError> {
        if query.limit < 0 {
            return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string()));
        }
        if query.offset < 0 {
            return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string()));
        }
        Ok(Self {
            query,
            order: FilterOrderInfo {
                column: query.order_by,
                sort: query.order_type,
            },
        })
    }

    /// Columns and joins shared by listings and single-row lookups.
    pub fn select_prefix() -> String {
        format!("SELECT {} {}", SELECT_COLUMNS, FROM_CLAUSE)
    }

    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.query.filter, CONTENT_ALIAS);
        let query = [
            Self::select_prefix(),
            format!("WHERE {}", where_clause),
            FilterOrder::generate(&self.order, CONTENT_ALIAS),
            format!("LIMIT {} OFFSET {}", self.query.limit, self.query.offset),
        ]
        .join(" ");

        SqlResult { query, params }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.query.filter, CONTENT_ALIAS);
        SqlResult {
            query: format!(
                "SELECT COUNT(*) AS count FROM \"contents\" {} WHERE {}",
                CONTENT_ALIAS, where_clause
            ),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ContentColumn, ContentFilter, SortDirection};
    use crate::filter::SqlParam;

    fn query() -> ContentQuery {
        ContentQuery {
            filter: ContentFilter {
                search: String::new(),
                status: "PUBLISH".into(),
                category_id: 0,
            },
            order_by: ContentColumn::Title,
            order_type: SortDirection::Asc,
            limit: 6,
            offset: 12,
        }
    }

    #[test]
    fn page_query_orders_then_limits() {
        let query = query();
        let sql = Filter::new(&query).unwrap().to_sql();
        assert!(sql.query.starts_with("SELECT c.\"id\""));
        assert!(sql.query.contains("LEFT JOIN \"categories\" cat"));
        assert!(sql.query.contains("LEFT JOIN \"users\" u"));
        assert!(sql
            .query
            .ends_with("WHERE c.\"status\" LIKE $1 ORDER BY c.\"title\" ASC LIMIT 6 OFFSET 12"));
        assert_eq!(sql.params, vec![SqlParam::Text("%PUBLISH%".into())]);
    }

    #[test]
    fn count_query_shares_the_predicate() {
        let query = query();
        let filter = Filter::new(&query).unwrap();
        let count = filter.to_count_sql();
        assert_eq!(
            count.query,
            "SELECT COUNT(*) AS count FROM \"contents\" c WHERE c.\"status\" LIKE $1"
        );
        assert_eq!(count.params, filter.to_sql().params);
    }

    #[test]
    fn negative_paging_is_refused() {
        let mut query = query();
        query.offset = -6;
        assert!(matches!(Filter::new(&query), Err(FilterError::InvalidOffset(_))));
    }
}
