use thiserror::Error;

use crate::directory::errors::DirectoryError;

pub mod auth;
pub mod customers;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Entity not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("Type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("Directory error: {0}")]
    Directory(DirectoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<DirectoryError> for ServiceError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Unauthenticated | DirectoryError::Api { status: 401, .. } => {
                ServiceError::Unauthorized
            }
            other => ServiceError::Directory(other),
        }
    }
}

impl ServiceError {
    /// Message the directory attached to the failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Directory(err) => err.server_message(),
            _ => None,
        }
    }
}
