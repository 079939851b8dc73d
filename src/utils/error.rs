use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::models::ApiResponse;

/// Failures raised by the storage gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The (email, phone) compound unique index rejected the insert
    DuplicateKey(String),
    NotFound(String),
    /// Server selection, connection or IO failure
    Unavailable(String),
    /// The fixed per-operation deadline elapsed
    Timeout,
    Other(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateKey(msg) => write!(f, "Duplicate key: {}", msg),
            StoreError::NotFound(msg) => write!(f, "Not found: {}", msg),
            StoreError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StoreError::Timeout => write!(f, "Storage operation timed out"),
            StoreError::Other(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug)]
pub enum AppError {
    /// Unparseable or oversized form submission
    MalformedInput(String),
    /// A required field was empty
    Validation(String),
    Storage(StoreError),
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::Storage(err) => write!(f, "{}", err),
            AppError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Storage(err)
    }
}

impl AppError {
    /// The envelope written as the response body for this failure.
    pub fn envelope(&self) -> ApiResponse {
        match self {
            AppError::MalformedInput(detail) => {
                ApiResponse::failure("Error getting user info", Some(detail.clone()))
            }
            AppError::Validation(reason) => ApiResponse::failure(reason.clone(), None),
            AppError::Storage(err @ StoreError::NotFound(_)) => {
                ApiResponse::failure("User not found", Some(err.to_string()))
            }
            AppError::Storage(err) => {
                ApiResponse::failure("Error creating user", Some(err.to_string()))
            }
            AppError::Config(detail) => {
                ApiResponse::failure("Internal server error", Some(detail.clone()))
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedInput(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(StoreError::DuplicateKey(_)) => StatusCode::BAD_REQUEST,
            AppError::Storage(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.envelope())
    }
}
