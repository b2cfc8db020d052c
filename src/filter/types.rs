use crate::catalog::{ContentColumn, SortDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Like,
    ILike,
}

impl FilterOp {
    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Like => "LIKE",
            FilterOp::ILike => "ILIKE",
        }
    }
}

/// A bound value. Content listings only ever bind integers and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

/// One predicate. Several columns share one placeholder and are OR-ed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterWhereInfo {
    pub columns: Vec<&'static str>,
    pub operator: FilterOp,
    pub data: SqlParam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOrderInfo {
    pub column: ContentColumn,
    pub sort: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
