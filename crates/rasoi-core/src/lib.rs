//! # rasoi-core: Pure GST Business Logic for Rasoi POS
//!
//! This crate is the **heart** of Rasoi POS billing. It contains the Indian
//! GST calculation engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rasoi POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web App (Next.js, out of tree)                 │   │
//! │  │    Order intake ──► Checkout ──► Invoice ──► Filing export     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ calls with amounts + categories        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rasoi-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   types   │  │ calculator │  │  config   │  │   │
//! │  │   │   Money   │  │  TaxRate  │  │ GST split  │  │ slabs/HSN │  │   │
//! │  │   │   paise   │  │ Breakdown │  │ CGST/SGST  │  │ India dflt│  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             rasoi-invoice (documents & display)                 │   │
//! │  │        breakdown → e-invoice data / formatted tax summary       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer paise arithmetic (no floating point!)
//! - [`types`] - GST value types (TaxRate, TaxBreakdown, SupplyType, ...)
//! - [`config`] - Slab rates, HSN codes, exemptions; Indian default
//! - [`calculator`] - The engine: single and mixed-category calculation
//! - [`validation`] - Configuration and intake-seam validation
//! - [`error`] - Typed domain errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every calculation is deterministic - same input =
//!    same output, no hidden state
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64), rounding
//!    happens once, explicitly, when a rate is applied
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use rasoi_core::{GstCalculator, Money, SupplyType};
//!
//! let calc = GstCalculator::india();
//!
//! // ₹100.00 intra-state restaurant bill: 2.5% CGST + 2.5% SGST
//! let bill = calc
//!     .calculate(Money::from_paise(10000), SupplyType::IntraState, "restaurant_service")
//!     .unwrap();
//!
//! assert_eq!(bill.total_tax.paise(), 500);
//! assert_eq!(bill.total.paise(), 10500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod config;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rasoi_core::Money` instead of
// `use rasoi_core::money::Money`

pub use calculator::GstCalculator;
pub use config::{CurrencyFormat, GstConfig, UnknownCategoryPolicy};
pub use error::{GstError, GstResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category applied when a caller does not specify one.
///
/// ## Why a constant?
/// Restaurant orders are overwhelmingly plain food service; callers that
/// don't categorize items bill everything as restaurant service at the
/// base rate.
pub const DEFAULT_CATEGORY: &str = "restaurant_service";

/// Upper bound for any rate, in basis points (100%).
///
/// ## Business Reason
/// A slab above 100% is always a data-entry error; configuration
/// validation rejects it before a calculator is built.
pub const MAX_RATE_BPS: u32 = 10000;
