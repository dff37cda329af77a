//! # Validation Module
//!
//! Input validation utilities for PEX.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI parsing (clap)                                           │
//! │  ├── Types and required arguments                                      │
//! │  └── Immediate usage feedback                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE: Business rule validation                        │
//! │  ├── Name / expiry required                                            │
//! │  ├── Sale quantity within stock, seller present                        │
//! │  └── Runs before any store or ledger mutation                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Wire format (serde)                                          │
//! │  └── Dates must parse when reading snapshots and backups               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pex_core::validation::{validate_product_name, validate_sale_quantity};
//!
//! validate_product_name("DIPIRONA 500MG").unwrap();
//! assert!(validate_sale_quantity(6, 5).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::REGISTRATION_MAX_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use pex_core::validation::validate_product_name;
///
/// assert!(validate_product_name("AMOXICILINA 500MG").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates the seller registration on a sale.
pub fn validate_seller_id(seller_id: &str) -> ValidationResult<()> {
    let seller_id = seller_id.trim();

    if seller_id.is_empty() {
        return Err(ValidationError::Required {
            field: "seller_id".to_string(),
        });
    }

    if seller_id.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "seller_id".to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Keeps only the digits of a registration number, at most 5 of them.
///
/// ```rust
/// use pex_core::validation::normalize_registration;
///
/// assert_eq!(normalize_registration("mat-12.34567"), "12345");
/// ```
pub fn normalize_registration(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(REGISTRATION_MAX_LEN)
        .collect()
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses an ISO `YYYY-MM-DD` expiry date.
///
/// ## Example
/// ```rust
/// use pex_core::validation::parse_expiry_date;
///
/// assert!(parse_expiry_date("2026-12-31").is_ok());
/// assert!(parse_expiry_date("31/12/2026").is_err());
/// assert!(parse_expiry_date("").is_err());
/// ```
pub fn parse_expiry_date(raw: &str) -> ValidationResult<NaiveDate> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "expiry_date".to_string(),
        });
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| ValidationError::InvalidFormat {
        field: "expiry_date".to_string(),
        reason: format!("expected YYYY-MM-DD ({e})"),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock quantity on a product form.
///
/// ## Rules
/// - Zero is allowed (catalog entries, empty shelves)
/// - Negative values are rejected
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a sale quantity against the stock on hand.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed `available`
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  sale record <id> --seller 998877 --quantity N                          │
/// │       │                                                                 │
/// │       ├── N <= 0?          → "Invalid quantity N (max: stock)"          │
/// │       ├── N > stock?       → "Invalid quantity N (max: stock)"          │
/// │       └── OK → ledger records the sale                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_sale_quantity(requested: i64, available: i64) -> ValidationResult<()> {
    if requested <= 0 || requested > available {
        return Err(ValidationError::InvalidSaleQuantity {
            requested,
            max: available,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("DIPIRONA 500MG C/10CP").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("  ").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_seller_id() {
        assert!(validate_seller_id("998877").is_ok());
        assert_eq!(
            validate_seller_id(" ").unwrap_err(),
            ValidationError::Required {
                field: "seller_id".to_string()
            }
        );
    }

    #[test]
    fn test_validate_sale_quantity() {
        assert!(validate_sale_quantity(1, 5).is_ok());
        assert!(validate_sale_quantity(5, 5).is_ok());
        assert!(validate_sale_quantity(0, 5).is_err());
        assert!(validate_sale_quantity(-2, 5).is_err());
        assert_eq!(
            validate_sale_quantity(6, 5).unwrap_err().to_string(),
            "Invalid quantity 6 (max: 5)"
        );
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(12).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
    }

    #[test]
    fn test_parse_expiry_date() {
        assert_eq!(
            parse_expiry_date(" 2027-01-15 ").unwrap(),
            NaiveDate::from_ymd_opt(2027, 1, 15).unwrap()
        );
        assert!(matches!(
            parse_expiry_date("2027-02-30"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_normalize_registration() {
        assert_eq!(normalize_registration("123"), "123");
        assert_eq!(normalize_registration("abc"), "");
        assert_eq!(normalize_registration("9876543"), "98765");
    }
}
