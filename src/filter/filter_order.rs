use super::types::FilterOrderInfo;

pub struct FilterOrder;

impl FilterOrder {
    pub fn generate(info: &FilterOrderInfo, alias: &str) -> String {
        format!("ORDER BY {}.\"{}\" {}", alias, info.column.as_str(), info.sort.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ContentColumn, SortDirection};

    #[test]
    fn order_clause_uses_quoted_column() {
        let info = FilterOrderInfo {
            column: ContentColumn::CreatedAt,
            sort: SortDirection::Desc,
        };
        assert_eq!(FilterOrder::generate(&info, "c"), "ORDER BY c.\"created_at\" DESC");
    }
}
