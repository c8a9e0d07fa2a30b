//! Error types for the pagehaus crate
//!
//! This module contains all error types that can be returned by pagehaus operations.

use crate::executor::ExecutorError;
use config::ConfigError;
use dialect_engine::PaginationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagehausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error("failed to count rows: {0}")]
    Count(#[source] ExecutorError),

    #[error("failed to query page: {0}")]
    Query(#[source] ExecutorError),

    #[error("No statement executor configured: {0}")]
    MissingExecutor(String),
}
