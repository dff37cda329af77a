//! # CLI Error Type
//!
//! Unified error type for `pex` commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in PEX                                    │
//! │                                                                         │
//! │  Command                                                                │
//! │  Result<(), AppError>                                                   │
//! │         │                                                               │
//! │         ├── Storage error?    DbError::QueryFailed ──────┐              │
//! │         ├── Validation error? CoreError::Validation ─────┼──► AppError  │
//! │         ├── File error?       std::io::Error ────────────┘      │       │
//! │         ▼                                                       ▼       │
//! │  Success                                stderr: "error[VALIDATION_ERROR]│
//! │                                          : name is required"            │
//! │                                         exit status from ErrorCode      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use pex_core::{CoreError, ValidationError};
use pex_db::DbError;
use serde::Serialize;
use thiserror::Error;

/// Error reported by a `pex` command.
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("error[{code}]: {message}")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, one per failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product id does not exist
    NotFound,

    /// Input rejected before any mutation
    ValidationError,

    /// Login rejected
    AuthFailed,

    /// Backup file could not be read or parsed
    InvalidBackup,

    /// Storage failure
    DatabaseError,

    /// File or terminal I/O failure
    IoError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::AuthFailed => "AUTH_FAILED",
            ErrorCode::InvalidBackup => "INVALID_BACKUP",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit status for this family.
    pub const fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::ValidationError | ErrorCode::NotFound => 2,
            ErrorCode::AuthFailed => 3,
            ErrorCode::InvalidBackup => 4,
            ErrorCode::DatabaseError | ErrorCode::IoError | ErrorCode::Internal => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors. Details go to the log, the operator gets a
/// short message.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            err @ DbError::Serialization { .. } => {
                AppError::new(ErrorCode::DatabaseError, err.to_string())
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts domain errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::not_found("Product", &id),
            CoreError::InvalidBackup(reason) => AppError::new(
                ErrorCode::InvalidBackup,
                format!("Invalid backup file: {reason}"),
            ),
            CoreError::Serialization(reason) => AppError::internal(reason),
            CoreError::InvalidCredentials => AppError::new(
                ErrorCode::AuthFailed,
                "Invalid credentials or access denied",
            ),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::new(ErrorCode::IoError, format!("CSV export failed: {err}"))
    }
}

/// Result type for commands.
pub type AppResult<T> = Result<T, AppError>;
