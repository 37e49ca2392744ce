use serde::Deserialize;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Not signed in")]
    Unauthenticated,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

impl DirectoryError {
    /// Message supplied by the directory in the error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            DirectoryError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Builds an API error from a failed response body.
    ///
    /// Accepts both `{"message": ..}` and `{"data": {"message": ..}}` shapes.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct Nested {
            message: Option<String>,
        }

        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
            data: Option<Nested>,
        }

        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.data.and_then(|data| data.message).or(body.message))
            .filter(|message| !message.trim().is_empty());

        DirectoryError::Api { status, message }
    }
}

impl From<TypeConstraintError> for DirectoryError {
    fn from(val: TypeConstraintError) -> Self {
        DirectoryError::Validation(val.to_string())
    }
}
