//! # Validation Module
//!
//! Input validation utilities for the GST engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Order intake (caller)                                        │
//! │  ├── Non-negative amounts, known categories on menu items              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - configuration and seam validation              │
//! │  ├── Rates within 0..=10000 bps                                        │
//! │  ├── Well-formed category keys and HSN codes                          │
//! │  └── Runs once, when a GstCalculator is constructed                    │
//! │                                                                         │
//! │  The calculator itself stays total: it does NOT re-validate amounts   │
//! │  per call (negative subtotals propagate mechanically, by contract).    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rasoi_core::validation::{validate_rate_bps, validate_category_key};
//!
//! validate_rate_bps(500).unwrap();
//! validate_category_key("restaurant_service").unwrap();
//! ```

use crate::error::ValidationError;
use crate::MAX_RATE_BPS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Rate Validators
// =============================================================================

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
/// - GST slabs in practice are 0-2800 (0% to 28%)
pub fn validate_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: MAX_RATE_BPS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a category key.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 64 characters
/// - Lowercase snake_case: letters, digits, underscores
///
/// ## Example
/// ```rust
/// use rasoi_core::validation::validate_category_key;
///
/// assert!(validate_category_key("alcoholic_beverages").is_ok());
/// assert!(validate_category_key("").is_err());
/// assert!(validate_category_key("has space").is_err());
/// ```
pub fn validate_category_key(key: &str) -> ValidationResult<()> {
    let key = key.trim();

    if key.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if key.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: 64,
        });
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "category".to_string(),
            reason: "must contain only lowercase letters, digits, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an HSN/SAC classification code.
///
/// ## Rules
/// - Must not be empty
/// - 2 to 8 digits (HSN chapter headings through full SAC codes)
///
/// ## Example
/// ```rust
/// use rasoi_core::validation::validate_hsn_code;
///
/// assert!(validate_hsn_code("996331").is_ok());
/// assert!(validate_hsn_code("2208").is_ok());
/// assert!(validate_hsn_code("").is_err());
/// assert!(validate_hsn_code("99X331").is_err());
/// ```
pub fn validate_hsn_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "hsn_code".to_string(),
        });
    }

    if code.len() < 2 || code.len() > 8 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "hsn_code".to_string(),
            reason: "must be 2-8 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a taxable amount in paise at an intake seam.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (complimentary items still appear on the bill)
///
/// The calculator does not call this per §7 of its contract; order intake
/// should, before amounts ever reach a breakdown.
pub fn validate_amount_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
