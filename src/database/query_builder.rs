use std::marker::PhantomData;

use sqlx::{self, postgres::PgArguments, postgres::PgRow, FromRow, PgPool, Row};

use crate::database::manager::DatabaseError;
use crate::filter::{SqlParam, SqlResult};

/// Runs a generated statement, binding its parameters in order.
pub struct QueryBuilder<T> {
    sql: SqlResult,
    _phantom: PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(sql: SqlResult) -> Self {
        Self {
            sql,
            _phantom: PhantomData,
        }
    }

    pub async fn select_all(&self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let mut q = sqlx::query_as::<_, T>(&self.sql.query);
        for p in self.sql.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn select_optional(&self, pool: &PgPool) -> Result<Option<T>, DatabaseError> {
        let mut q = sqlx::query_as::<_, T>(&self.sql.query);
        for p in self.sql.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let row = q.fetch_optional(pool).await?;
        Ok(row)
    }
}

/// Runs a `SELECT COUNT(*) AS count ...` statement.
pub async fn count(sql: &SqlResult, pool: &PgPool) -> Result<i64, DatabaseError> {
    let mut q = sqlx::query(&sql.query);
    for p in sql.params.iter() {
        q = bind_param_query(q, p);
    }
    let row = q.fetch_one(pool).await?;
    let count: i64 = row.try_get("count")?;
    Ok(count)
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q SqlParam,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        SqlParam::Int(i) => q.bind(*i),
        SqlParam::Text(s) => q.bind(s.as_str()),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q SqlParam,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        SqlParam::Int(i) => q.bind(*i),
        SqlParam::Text(s) => q.bind(s.as_str()),
    }
}
