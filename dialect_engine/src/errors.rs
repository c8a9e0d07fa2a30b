use clause_builder::BuilderError;
use thiserror::Error;
use type_mapping::Dialect;

/// Configuration errors raised while building statements.
/// Nothing is sent downstream once one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Missing table name for bare predicate: {0}")]
    MissingTable(String),

    #[error("No FROM clause found in statement: {0}")]
    MissingFromClause(String),

    #[error("Invalid filter: {0}")]
    Filter(#[from] BuilderError),

    #[error("Locking clause cannot be paged on {dialect}: {statement}")]
    UnsupportedLocking { dialect: Dialect, statement: String },
}
