//! Dialect Engine - count and page statement planning for pagehaus
//!
//! Given a table name, bare predicate or full `SELECT`, the engine produces a
//! count statement and a page statement for one SQL dialect. It performs no
//! I/O and holds no shared state; running the statements is left to an
//! executor.
//!
//! ```
//! use dialect_engine::{PaginationRequest, PaginationStrategy};
//! use type_mapping::Dialect;
//!
//! let request = PaginationRequest::new("SELECT * FROM users").page(2).page_size(10);
//! let result = PaginationStrategy::new(Dialect::MySql).paginate(&request).unwrap();
//! assert_eq!(result.count_statement, "SELECT COUNT(*) FROM users");
//! assert!(result.page_statement.ends_with("LIMIT 10 OFFSET 10"));
//! ```

pub mod classifier;
pub mod errors;
pub mod request;
pub mod strategy;

mod count;
mod scanner;
mod statement;

#[cfg(test)]
mod tests;

pub use classifier::{classify, ClauseProfile};
pub use errors::PaginationError;
pub use request::{PageWindow, PaginationRequest, PaginationResult};
pub use strategy::{
    paginate, EngineOptions, PaginationStrategy, DEFAULT_COUNT_ALIAS, DEFAULT_PAGE_SIZE,
};
