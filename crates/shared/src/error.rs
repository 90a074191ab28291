use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the chemistry services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service answered with an error-shaped body.
    #[error("{0}")]
    Rejected(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, ServiceError::Rejected(_))
    }
}

impl From<ApiError> for ServiceError {
    fn from(value: ApiError) -> Self {
        ServiceError::Rejected(value.error)
    }
}
