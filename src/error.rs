use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Station command `{command}` failed (code {code:?}, signal {signal:?}): {stderr}")]
    Command {
        command: String,
        code: Option<i32>,
        signal: Option<i32>,
        stderr: String,
    },

    #[error("Station command `{command}` timed out after {timeout_secs}s")]
    CommandTimeout { command: String, timeout_secs: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not get archive period of station: {0}")]
    ArchivePeriod(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// True for failures of the external station command (exit, signal,
    /// timeout or spawn).
    #[must_use]
    pub fn is_command_failure(&self) -> bool {
        matches!(
            self,
            Self::Command { .. } | Self::CommandTimeout { .. } | Self::Io(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Database(e) => {
                tracing::error!("Database error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            Self::Store(msg) => {
                tracing::error!("Store error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Store error".to_string())
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::Command { .. } | Self::CommandTimeout { .. } | Self::ArchivePeriod(_) => {
                tracing::error!("Station error: {self}");
                (StatusCode::BAD_GATEWAY, "Station error".to_string())
            }
            Self::Io(e) => {
                tracing::error!("I/O error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::Config(e) => {
                tracing::error!("Config error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
