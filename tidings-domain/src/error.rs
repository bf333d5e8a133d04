// Error types for the customer and product domain

use thiserror::Error;
use tidings_events::DispatchError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity}: {message}")]
    Validation {
        entity: &'static str,
        field: &'static str,
        message: &'static str,
    },

    #[error("Customer not found")]
    CustomerNotFound(String),

    #[error("Customer already exists: {0}")]
    CustomerAlreadyExists(String),

    #[error("Event dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}

pub type Result<T> = std::result::Result<T, DomainError>;

impl DomainError {
    pub(crate) fn validation(
        entity: &'static str,
        field: &'static str,
        message: &'static str,
    ) -> Self {
        DomainError::Validation {
            entity,
            field,
            message,
        }
    }
}
