//! Unified mapping between SQL dialects, parameter placeholders and values
//! This crate provides the dialect conventions used across the pagehaus ecosystem

pub mod dialect;
pub mod literal;
pub mod placeholder;

pub use dialect::{Dialect, LimitSyntax, ParseDialectError, PlaceholderStyle};
pub use literal::render_literal;
pub use placeholder::{count_placeholders, rewrite_placeholders};
