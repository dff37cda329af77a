//! # Error Types
//!
//! Domain-specific error types for pex-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pex-core errors (this file)                                           │
//! │  ├── CoreError        - Store / ledger / backup failures               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pex-db errors (separate crate)                                        │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (id, field, maximum)
//! 3. Errors are enum variants, never String
//! 4. Every rejection happens before any state is touched

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the store.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Backup document could not be parsed.
    ///
    /// ## When This Occurs
    /// - File is not JSON
    /// - A product carries an unreadable expiry date
    /// - A collection has the wrong shape
    ///
    /// The in-memory state is never touched when this is returned.
    #[error("Invalid backup file: {0}")]
    InvalidBackup(String),

    /// A snapshot could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Login rejected.
    #[error("Invalid credentials or access denied")]
    InvalidCredentials,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any mutation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. unparseable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Sale quantity is zero, negative or above the stock on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// sale record <id> --quantity 7     (stock: 5)
    ///      │
    ///      ▼
    /// InvalidSaleQuantity { requested: 7, max: 5 }
    ///      │
    ///      ▼
    /// "Invalid quantity 7 (max: 5)"
    /// ```
    #[error("Invalid quantity {requested} (max: {max})")]
    InvalidSaleQuantity { requested: i64, max: i64 },
}

impl ValidationError {
    /// Name of the offending field, for inline display next to it.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::Negative { field }
            | ValidationError::InvalidFormat { field, .. } => field,
            ValidationError::InvalidSaleQuantity { .. } => "quantity",
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
