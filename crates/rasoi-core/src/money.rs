//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On a GST invoice that error compounds across line items and the       │
//! │  component split, and the return filed with the tax portal no longer   │
//! │  foots to the printed bill.                                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹105.00 = 10500 paise, every figure is an exact i64                  │
//! │    Rounding happens once, explicitly, when a rate is applied            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rasoi_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(10999); // ₹109.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                        // ₹219.98
//! let total = price + Money::from_paise(500);     // ₹114.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(109.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, credit notes
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// OrderLine.line_total ──► Calculator subtotal ──► TaxBreakdown amounts
///                                                       │
///                                                       ▼
///                                       Invoice lines / display strings
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use rasoi_core::money::Money;
    ///
    /// let price = Money::from_paise(10999); // Represents ₹109.99
    /// assert_eq!(price.paise(), 10999);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// ## Example
    /// ```rust
    /// use rasoi_core::money::Money;
    ///
    /// let price = Money::from_rupees(109, 99); // ₹109.99
    /// assert_eq!(price.paise(), 10999);
    ///
    /// let refund = Money::from_rupees(-5, 50); // -₹5.50
    /// assert_eq!(refund.paise(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_rupees(-5, 50)` = -₹5.50, not -₹4.50
    #[inline]
    pub const fn from_rupees(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paise) portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Applies a tax rate to this amount, rounding to the nearest paisa.
    ///
    /// ## Implementation
    /// Integer math throughout: `(amount_paise * bps + 5000) / 10000`.
    /// The +5000 provides round-half-up (5000/10000 = 0.5). i128 is used
    /// so large invoice totals cannot overflow the intermediate product.
    ///
    /// ## Example
    /// ```rust
    /// use rasoi_core::money::Money;
    /// use rasoi_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_paise(10000); // ₹100.00
    /// let gst = TaxRate::from_bps(500);        // 5%
    ///
    /// assert_eq!(subtotal.apply_rate(gst).paise(), 500); // ₹5.00
    /// ```
    pub fn apply_rate(&self, rate: TaxRate) -> Money {
        let gross = self.0 as i128 * rate.bps() as i128;
        // Offset follows the sign so credit notes round symmetrically
        let tax_paise = if gross >= 0 {
            (gross + 5000) / 10000
        } else {
            (gross - 5000) / 10000
        };
        Money::from_paise(tax_paise as i64)
    }

    /// Returns this amount's proportional share: `self × part / whole`.
    ///
    /// Used to distribute an invoice-level tax amount across line items by
    /// each line's share of the taxable subtotal. Returns zero when `whole`
    /// is zero (a zero-subtotal order has nothing to distribute).
    ///
    /// ## Example
    /// ```rust
    /// use rasoi_core::money::Money;
    ///
    /// let total_tax = Money::from_paise(1900);
    /// let line = Money::from_paise(10000);
    /// let subtotal = Money::from_paise(15000);
    ///
    /// // This line carries 10000/15000 of the tax: ₹12.67
    /// assert_eq!(total_tax.prorate(line, subtotal).paise(), 1267);
    /// ```
    pub fn prorate(&self, part: Money, whole: Money) -> Money {
        if whole.is_zero() {
            return Money::zero();
        }
        let whole = whole.0 as i128;
        let numerator = self.0 as i128 * part.0 as i128;
        // Round-half-up with sign handling
        let share = if numerator >= 0 {
            (numerator + whole.abs() / 2) / whole
        } else {
            (numerator - whole.abs() / 2) / whole
        };
        Money::from_paise(share as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use rasoi_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(29900); // ₹299.00
    /// assert_eq!(unit_price.multiply_quantity(3).paise(), 89700);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. UI/invoice display goes through
/// `CurrencyFormat`, which carries the configured symbol and precision.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money values (line totals, tax amounts).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
