use crate::catalog::ContentFilter;

use super::types::{FilterOp, FilterWhereInfo, SqlParam};

pub struct FilterWhere {
    param_values: Vec<SqlParam>,
    param_index: usize,
    conditions: Vec<FilterWhereInfo>,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
            conditions: vec![],
        }
    }

    /// Returns the WHERE body (without the keyword) and its bound values.
    ///
    /// Empty search and status match every row, so they add no predicate.
    pub fn generate(filter: &ContentFilter, alias: &str) -> (String, Vec<SqlParam>) {
        let mut filter_where = Self::new(0);
        filter_where.parse(filter);
        filter_where.build(alias)
    }

    fn parse(&mut self, filter: &ContentFilter) {
        if !filter.search.is_empty() {
            self.conditions.push(FilterWhereInfo {
                columns: vec!["title", "excerpt", "description"],
                operator: FilterOp::ILike,
                data: SqlParam::Text(like_pattern(&filter.search)),
            });
        }
        if !filter.status.is_empty() {
            self.conditions.push(FilterWhereInfo {
                columns: vec!["status"],
                operator: FilterOp::Like,
                data: SqlParam::Text(like_pattern(&filter.status)),
            });
        }
        if filter.category_id > 0 {
            self.conditions.push(FilterWhereInfo {
                columns: vec!["category_id"],
                operator: FilterOp::Eq,
                data: SqlParam::Int(filter.category_id),
            });
        }
    }

    fn build(&mut self, alias: &str) -> (String, Vec<SqlParam>) {
        let conditions = std::mem::take(&mut self.conditions);
        let mut sql_conditions = vec![];
        for condition in conditions {
            let placeholder = self.param(condition.data);
            let parts: Vec<String> = condition
                .columns
                .iter()
                .map(|column| format!("{}.\"{}\" {} {}", alias, column, condition.operator.to_sql(), placeholder))
                .collect();
            if parts.len() > 1 {
                sql_conditions.push(format!("({})", parts.join(" OR ")));
            } else {
                sql_conditions.extend(parts);
            }
        }
        let where_clause = if sql_conditions.is_empty() {
            "1=1".to_string()
        } else {
            sql_conditions.join(" AND ")
        };
        (where_clause, std::mem::take(&mut self.param_values))
    }

    fn param(&mut self, value: SqlParam) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// `%needle%` with LIKE wildcards in the needle escaped.
fn like_pattern(needle: &str) -> String {
    let escaped = needle.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{}%", escaped)
}
