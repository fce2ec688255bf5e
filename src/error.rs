use std::sync::OnceLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Whether internal error detail may be echoed to callers. Set once from
/// config at startup; defaults to the environment so tests and the admin
/// binary get sane behavior without wiring.
static VERBOSE_ERRORS: OnceLock<bool> = OnceLock::new();

pub fn set_verbose_errors(verbose: bool) {
    let _ = VERBOSE_ERRORS.set(verbose);
}

pub fn verbose_errors() -> bool {
    *VERBOSE_ERRORS.get_or_init(|| {
        std::env::var("REQUESTBOX_ENV")
            .map(|v| !v.eq_ignore_ascii_case("production"))
            .unwrap_or(true)
    })
}

#[derive(Debug)]
pub enum AppError {
    /// Required configuration is missing (ADMIN_KEY, DATABASE_URL).
    /// The message is always specific so operators can tell "nobody can
    /// use this yet" from "wrong key".
    Config(String),
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
    Database(sqlx::Error),
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Config(msg) => {
                tracing::error!("configuration error: {msg}");
                msg.clone()
            }
            AppError::Database(e) => {
                tracing::error!("database error: {e}");
                if verbose_errors() {
                    e.to_string()
                } else {
                    "Something went wrong.".to_string()
                }
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {e}");
                if verbose_errors() {
                    e.clone()
                } else {
                    "Something went wrong.".to_string()
                }
            }
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({ "error": self.message() });
        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => AppError::NotFound("Request not found.".to_string()),
            _ => AppError::Database(e),
        }
    }
}
