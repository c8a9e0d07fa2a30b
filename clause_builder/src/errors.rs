use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    #[error("{operation} ignored: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },

    #[error("Unsupported filter value for field '{field}': {kind}")]
    UnsupportedFilter { field: String, kind: &'static str },
}

impl BuilderError {
    pub fn rejected(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            reason: reason.into(),
        }
    }
}
