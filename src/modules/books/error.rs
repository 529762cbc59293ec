use thiserror::Error;

/// Catalog operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookOperation {
    List,
    Create,
    Update,
    Delete,
}

impl BookOperation {
    /// Message used when the store reports a failure without one.
    pub fn default_failure_message(self) -> &'static str {
        match self {
            BookOperation::List => "Failed to retrieve all the books.",
            BookOperation::Create => "Failed to add the book.",
            BookOperation::Update => "Failed to update the book.",
            BookOperation::Delete => "Failed to delete the book.",
        }
    }
}

/// Failure returned by every layer of the catalog pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookError {
    /// A business rule rejected the request before it reached the store.
    #[error("{0}")]
    Policy(String),

    /// The store failed while running `operation`.
    #[error("{message}")]
    Store {
        operation: BookOperation,
        message: String,
    },
}

impl BookError {
    pub fn policy(message: impl Into<String>) -> Self {
        Self::Policy(message.into())
    }

    pub fn is_policy(&self) -> bool {
        matches!(self, BookError::Policy(_))
    }
}
