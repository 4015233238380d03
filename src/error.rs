use rocket::http::Status;
use rocket::serde::json::Json;
use serde::Serialize;

/// Failures from the post store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Failures raised by the suite/case hooks.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to ignite server: {0}")]
    Ignite(String),

    #[error("Server state does not hold the database pool")]
    Unmanaged,

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

pub type ApiFailure = (Status, Json<ApiError>);

pub fn err(status: Status, msg: &str, code: &str) -> ApiFailure {
    (status, Json(ApiError { error: msg.to_string(), code: code.to_string() }))
}

pub fn db_err(e: StoreError) -> ApiFailure {
    tracing::error!(error = %e, "store operation failed");
    err(Status::InternalServerError, &e.to_string(), "DB_ERROR")
}

pub fn bad_request(msg: &str) -> ApiFailure {
    err(Status::BadRequest, msg, "BAD_REQUEST")
}

pub fn not_found(msg: &str) -> ApiFailure {
    err(Status::NotFound, msg, "NOT_FOUND")
}
