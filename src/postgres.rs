//! PostgreSQL statement executor
//!
//! Binds JSON parameter values as native PostgreSQL scalars where possible;
//! arrays and objects are bound as JSON documents.

use crate::executor::{ExecutorError, StatementExecutor};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use std::marker::PhantomData;

/// Executor that decodes page rows into `T` via [`sqlx::FromRow`]
pub struct PgStatementExecutor<T> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for PgStatementExecutor<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PgStatementExecutor<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn bind_value<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    value: &'q Value,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else if let Some(f) = n.as_f64() {
                query.bind(f)
            } else {
                query.bind(n.to_string())
            }
        }
        Value::String(s) => query.bind(s.as_str()),
        Value::Array(_) | Value::Object(_) => query.bind(sqlx::types::Json(value)),
    }
}

#[async_trait]
impl<T> StatementExecutor for PgStatementExecutor<T>
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    type Row = T;

    async fn count(&self, sql: &str, parameters: &[Value]) -> Result<u64, ExecutorError> {
        trace_log!(sql, parameters = parameters.len(), "running count statement");
        let mut query = sqlx::query_as::<_, (i64,)>(sql);
        for value in parameters {
            query = bind_value(query, value);
        }

        let (total,) = query.fetch_one(&self.pool).await?;
        u64::try_from(total)
            .map_err(|_| ExecutorError::Decode(format!("negative row count: {}", total)))
    }

    async fn query(&self, sql: &str, parameters: &[Value]) -> Result<Vec<T>, ExecutorError> {
        trace_log!(sql, parameters = parameters.len(), "running page statement");
        let mut query = sqlx::query_as::<_, T>(sql);
        for value in parameters {
            query = bind_value(query, value);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }
}
