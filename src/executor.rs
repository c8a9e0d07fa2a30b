//! Statement execution seam
//!
//! The pagination engine only produces text and values; an executor runs
//! them. Implementations own their connection handling, cancellation and
//! timeouts.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

/// Runs count and page statements produced by a pagination strategy
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Decoded row type returned by [`StatementExecutor::query`]
    type Row: Send;

    /// Run a `SELECT COUNT(*)` statement and return the single count
    async fn count(&self, sql: &str, parameters: &[Value]) -> Result<u64, ExecutorError>;

    /// Run a page statement and decode every row
    async fn query(&self, sql: &str, parameters: &[Value]) -> Result<Vec<Self::Row>, ExecutorError>;
}
