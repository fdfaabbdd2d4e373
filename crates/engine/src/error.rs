//! The module contains the error the engine can throw.
//!
//! The errors callers most often need to tell apart are:
//!
//! - [`KeyNotFound`] thrown when an item is not found, or when a shared trip is
//!   looked up by a token that is not publicly visible.
//! - [`Forbidden`] thrown when the principal is known but the access check
//!   fails.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Forbidden`]: EngineError::Forbidden
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Limit reached: {0}")]
    LimitReached(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::LimitReached(a), Self::LimitReached(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
