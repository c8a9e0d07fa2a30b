//! # Pagehaus
//!
//! Dialect-aware predicate building and pagination for SQL databases.
//! Statements are planned for MySQL-family, PostgreSQL, SQL Server and Oracle
//! dialects; a PostgreSQL executor is bundled for running them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagehaus::prelude::*;
//!
//! #[derive(Debug, sqlx::FromRow)]
//! pub struct User {
//!     pub id: i64,
//!     pub name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let pagehaus = Pagehaus::connect(&config).await?;
//!
//!     let filter = pagehaus
//!         .predicate()
//!         .eq("status", "active")
//!         .like("name", "J%");
//!     let ordering = pagehaus.ordering().descending("created_at");
//!
//!     let request = PaginationRequest::new("users")
//!         .filter(filter)
//!         .ordering(&ordering)
//!         .page(2)
//!         .page_size(20);
//!
//!     let page = pagehaus.fetch_page::<User>(&request).await?;
//!     println!("{} of {} users", page.content.len(), page.total_elements);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod executor;
pub mod paginator;
pub mod postgres;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::Pagehaus;
pub use errors::PagehausError;
pub use executor::{ExecutorError, StatementExecutor};
pub use paginator::{Page, Paginator};
pub use postgres::PgStatementExecutor;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, PaginationConfig};

// Re-export internal crates used by the public API
pub use clause_builder;
pub use config;
pub use dialect_engine;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use serde_json;
pub use sqlx;
