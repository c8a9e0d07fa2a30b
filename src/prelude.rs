//! Convenience re-exports for common pagehaus usage
//!
//! # Example
//!
//! ```rust
//! use pagehaus::prelude::*;
//!
//! let request = PaginationRequest::new("users").page(2).page_size(10);
//! let plan = PaginationStrategy::new(Dialect::SqlServer).paginate(&request).unwrap();
//! assert!(plan.page_statement.ends_with("OFFSET 10 ROWS FETCH NEXT 10 ROWS ONLY"));
//! ```

// Core pagehaus components
pub use crate::core::Pagehaus;
pub use crate::errors::PagehausError;
pub use crate::executor::{ExecutorError, StatementExecutor};
pub use crate::paginator::{Page, Paginator};
pub use crate::postgres::PgStatementExecutor;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DatabaseConfig, PaginationConfig};

// Builders and the pagination engine
pub use clause_builder::{BuilderError, Filter, Ordering, Predicate, SortOrder};
pub use dialect_engine::{
    classify, ClauseProfile, EngineOptions, PageWindow, PaginationError, PaginationRequest,
    PaginationResult, PaginationStrategy,
};
pub use type_mapping::{Dialect, PlaceholderStyle};

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use serde_json::{json, Value};
pub use sqlx;
pub use tokio;

// Commonly used sqlx types
pub use sqlx::{FromRow, PgPool};
