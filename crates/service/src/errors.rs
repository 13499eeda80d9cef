use thiserror::Error;

use crate::fact::FactError;
use crate::product::repository::RepositoryError;

/// Coarse classification of a [`ServiceError`], inspected by callers instead
/// of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input violates an invariant; always client-fixable.
    Validation,
    /// The referenced entity does not exist.
    NotFound,
    /// The relational store failed.
    Storage,
    /// The external fact endpoint failed.
    Upstream,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("product with ID {0} not found")]
    NotFound(i32),
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        source: RepositoryError,
    },
    #[error("failed to get fact: {0}")]
    Upstream(#[from] FactError),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }

    pub fn storage(context: &'static str, source: RepositoryError) -> Self {
        Self::Storage { context, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Storage { .. } => ErrorKind::Storage,
            ServiceError::Upstream(_) => ErrorKind::Upstream,
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 1001,
            ErrorKind::NotFound => 1003,
            ErrorKind::Storage => 1200,
            ErrorKind::Upstream => 1300,
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(err: models::errors::ModelError) -> Self {
        match err {
            models::errors::ModelError::Validation(msg) => ServiceError::Validation(msg),
        }
    }
}
