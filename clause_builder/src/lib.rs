//! Clause Builder - predicate and ordering construction for pagehaus
//!
//! This crate accumulates `WHERE` fragments with their positional values and
//! `ORDER BY` fragments without parsing SQL. Builders are permissive: invalid
//! input (empty fields, empty sequences, non-sequence values) is ignored
//! rather than reported, unless strict mode is requested.

pub mod errors;
pub mod filter;
pub mod ordering;
pub mod predicate;


pub use errors::BuilderError;
pub use filter::Filter;
pub use ordering::{Ordering, SortOrder};
pub use predicate::Predicate;
