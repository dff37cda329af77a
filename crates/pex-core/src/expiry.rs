//! # Expiry Classifier
//!
//! Maps an expiry date to a day count and an urgency tier.
//!
//! ```text
//!   days < 0          0 ..= 35           > 35
//! ├──────────────┼──────────────────┼──────────────►
//!     EXPIRED          CRITICAL            SAFE
//! ```
//!
//! Catalog entries never reach this module; they are SAFE with 999999 days
//! by convention (see [`crate::types::Product::status`]).

use chrono::NaiveDate;

use crate::types::{ExpiryInfo, ExpiryStatus};
use crate::CRITICAL_WINDOW_DAYS;

/// Whole calendar days from `today` until `expiry`.
///
/// Both ends are calendar dates (midnight), so the difference is already a
/// whole number of days and ceiling rounding is the identity. Returns 0 when
/// no date is given; negative values mean the date has passed.
pub fn days_until(expiry: Option<NaiveDate>, today: NaiveDate) -> i64 {
    match expiry {
        Some(date) => date.signed_duration_since(today).num_days(),
        None => 0,
    }
}

/// Urgency tier for a day count. Exactly 35 days is still CRITICAL.
pub fn classify(days: i64) -> ExpiryStatus {
    if days < 0 {
        ExpiryStatus::Expired
    } else if days <= CRITICAL_WINDOW_DAYS {
        ExpiryStatus::Critical
    } else {
        ExpiryStatus::Safe
    }
}

/// Computes the derived expiry fields of a stocked entry in one step.
pub fn expiry_info(date: NaiveDate, today: NaiveDate) -> ExpiryInfo {
    let days_to_expiry = days_until(Some(date), today);
    ExpiryInfo {
        date,
        days_to_expiry,
        status: classify(days_to_expiry),
    }
}
