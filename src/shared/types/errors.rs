use thiserror::Error;

use crate::domain::PostId;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("no post found for this postId")]
    PostNotFound { post_id: PostId },

    #[error("Validation: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::PostNotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl AppError {
    /// Whether this error is a missing post (read/update/delete of an absent id).
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Domain(e) if e.is_not_found())
    }
}

/// Result type for domain-level checks (builders, page requests)
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for store operations
pub type InfraResult<T> = Result<T, InfraError>;

/// Result type for application services
pub type AppResult<T> = Result<T, AppError>;
