use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("No authenticated user")]
    Unauthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Category mismatch: '{item_category}' item cannot join a '{team_category}' team")]
    CategoryMismatch {
        item_category: String,
        team_category: String,
    },

    #[error("Category '{0}' is not team-eligible")]
    NotEligible(String),

    #[error("Team is full (max {0} members)")]
    TeamFull(usize),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Remote write failed: {0}")]
    RemoteWriteFailure(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ExternalServiceError("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::ExternalServiceError("Failed to connect to external service".to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                404 => AppError::NotFound("External resource not found".to_string()),
                _ => AppError::ApiError(format!("HTTP {}: {}", status, err)),
            }
        } else {
            AppError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::ValidationError(format!("Invalid UUID: {}", err))
    }
}

impl AppError {
    /// Wrap a failed remote-store write. The error taxonomy distinguishes
    /// write failures from everything else so callers can leave the local
    /// snapshot alone and wait for the next subscription delivery.
    pub fn into_remote_write(self) -> AppError {
        match self {
            AppError::RemoteWriteFailure(_) => self,
            other => AppError::RemoteWriteFailure(other.to_string()),
        }
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
