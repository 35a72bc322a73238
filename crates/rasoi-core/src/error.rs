//! # Error Types
//!
//! Domain-specific error types for rasoi-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rasoi-core errors (this file)                                         │
//! │  ├── GstError         - Calculation / configuration failures           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → GstError → caller's API error → client        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (category name, field, bounds)
//! 3. Errors are enum variants, never String
//!
//! The calculator itself is close to total: with the default permissive
//! configuration, `calculate` never returns an error. `GstError` exists for
//! strict category mode and for rejecting malformed configurations up front.

use thiserror::Error;

// =============================================================================
// GST Error
// =============================================================================

/// Calculation and configuration errors.
#[derive(Debug, Error)]
pub enum GstError {
    /// A category key was not found and the configuration demands strict
    /// category matching (`UnknownCategoryPolicy::Reject`).
    ///
    /// ## When This Occurs
    /// - A menu item carries a typo'd category ("alchohol")
    /// - A category was removed from config but items still reference it
    ///
    /// Under the default `BaseRate` policy this is a warning, not an error.
    #[error("Unknown tax category: {category}")]
    UnknownCategory { category: String },

    /// Configuration failed validation at construction time.
    #[error("Invalid GST configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Configuration JSON could not be parsed.
    #[error("Malformed configuration document: {0}")]
    MalformedConfig(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation of rates, category keys and amounts before
/// they reach the calculator or are committed into a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad HSN code, malformed date window).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with GstError.
pub type GstResult<T> = Result<T, GstError>;

// =============================================================================
// Unit Tests
// =============================================================================
