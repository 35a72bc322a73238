//! # Domain Types
//!
//! Core GST value types used throughout Rasoi POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         GST Value Types                                 │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │    TaxLine      │   │  TaxBreakdown   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  code (CGST..)  │   │  subtotal       │       │
//! │  │  500 = 5%       │   │  rate, amount   │   │  total_tax      │       │
//! │  └─────────────────┘   └─────────────────┘   │  total          │       │
//! │                                              │  components[]   │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   └─────────────────┘       │
//! │  │GstComponentCode │   │   SupplyType    │                             │
//! │  │  ─────────────  │   │  ─────────────  │   intra-state: CGST+SGST    │
//! │  │  Cgst/Sgst/Igst │   │  IntraState     │   inter-state: IGST         │
//! │  └─────────────────┘   │  InterState     │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a plain value object: constructed per calculation,
//! never persisted by this crate, safe to share across threads.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (restaurant service), 2800 bps = 28% (alcohol slab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the floor half of this rate, the per-component share for the
    /// intra-state CGST/SGST split. All GST slabs in the shipped
    /// configuration are even in bps, so both halves come out equal; the
    /// calculator keeps totals exact regardless by deriving the SGST amount
    /// as a remainder.
    #[inline]
    pub const fn half(&self) -> Self {
        TaxRate(self.0 / 2)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Sums two rates. Only meaningful for display aggregation across
    /// mixed-category breakdowns; never feed a summed rate back into a
    /// calculation.
    #[inline]
    pub const fn saturating_add(&self, other: TaxRate) -> Self {
        TaxRate(self.0.saturating_add(other.0))
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// GST Component Code
// =============================================================================

/// The three GST component kinds.
///
/// Intra-state supplies carry CGST + SGST (the two halves of the rate);
/// inter-state supplies carry IGST at the full rate instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum GstComponentCode {
    /// Central GST - the centre's half of an intra-state supply.
    Cgst,
    /// State GST - the state's half of an intra-state supply.
    Sgst,
    /// Integrated GST - the full rate on an inter-state supply.
    Igst,
}

impl GstComponentCode {
    /// The canonical short code as it appears on invoices.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GstComponentCode::Cgst => "CGST",
            GstComponentCode::Sgst => "SGST",
            GstComponentCode::Igst => "IGST",
        }
    }

    /// Canonical invoice ordering: CGST, SGST, IGST.
    pub const ALL: [GstComponentCode; 3] = [
        GstComponentCode::Cgst,
        GstComponentCode::Sgst,
        GstComponentCode::Igst,
    ];
}

impl fmt::Display for GstComponentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Supply Type
// =============================================================================

/// Whether a supply crosses state lines.
///
/// Derived by the caller from supplier vs. customer state codes (that
/// comparison lives with order intake, not here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SupplyType {
    /// Supplier and customer in the same state: CGST + SGST.
    IntraState,
    /// Supply crosses state lines: IGST.
    InterState,
}

impl SupplyType {
    /// Checks whether this is an inter-state supply.
    #[inline]
    pub const fn is_inter_state(&self) -> bool {
        matches!(self, SupplyType::InterState)
    }
}

// =============================================================================
// Tax Line
// =============================================================================

/// One applied tax component within a breakdown.
///
/// `rate` is the share actually used for this component in this calculation
/// (the half rate for CGST/SGST, the full rate for IGST). After
/// mixed-category aggregation the rate is a blended display figure; `amount`
/// is always the authoritative tax liability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
    /// Component kind (CGST/SGST/IGST).
    pub code: GstComponentCode,

    /// Display name ("Central GST").
    pub name: String,

    /// Rate applied for this component.
    pub rate: TaxRate,

    /// Tax amount for this component.
    pub amount: Money,

    /// Optional ledger account reference (opaque, not validated here).
    pub account_code: Option<String>,
}

// =============================================================================
// Tax Breakdown
// =============================================================================

/// The computed result of one tax calculation.
///
/// ## Invariants
/// - `total == subtotal + total_tax` exactly (integer paise)
/// - `total_tax` equals the sum of component amounts
/// - Components keep their shape at zero subtotal (zero amounts, not
///   omitted) so invoice rendering sees a stable schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    /// Pre-tax amount the calculation ran on.
    pub subtotal: Money,

    /// Sum of all component amounts.
    pub total_tax: Money,

    /// `subtotal + total_tax`.
    pub total: Money,

    /// Applied components in canonical order (CGST, SGST or IGST alone).
    pub components: Vec<TaxLine>,

    /// True when any contributing category lookup fell back to the base
    /// rate. Surfaced so callers can flag potentially misclassified items
    /// instead of silently taxing them at the default slab.
    pub base_rate_fallback: bool,
}

impl TaxBreakdown {
    /// An all-zero breakdown with no components (empty mixed input).
    pub fn zero() -> Self {
        TaxBreakdown {
            subtotal: Money::zero(),
            total_tax: Money::zero(),
            total: Money::zero(),
            components: Vec::new(),
            base_rate_fallback: false,
        }
    }

    /// Finds the applied component for a code, if present.
    pub fn component(&self, code: GstComponentCode) -> Option<&TaxLine> {
        self.components.iter().find(|line| line.code == code)
    }

    /// The tax amount for a code, zero when that component is absent.
    ///
    /// Invoice generation leans on this: an inter-state breakdown has no
    /// CGST/SGST lines, but the e-invoice schema still wants zeros there.
    pub fn amount_for(&self, code: GstComponentCode) -> Money {
        self.component(code)
            .map(|line| line.amount)
            .unwrap_or_else(Money::zero)
    }

    /// The rate for a code, zero when that component is absent.
    pub fn rate_for(&self, code: GstComponentCode) -> TaxRate {
        self.component(code)
            .map(|line| line.rate)
            .unwrap_or_else(TaxRate::zero)
    }
}

// =============================================================================
// Taxable Item
// =============================================================================

/// One categorized taxable amount, the input line for mixed-category
/// calculation (e.g., food at 5% and alcohol at 28% on one order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxableItem {
    /// Category key into the configured rate table.
    pub category: String,

    /// Taxable amount for this line.
    pub amount: Money,
}

impl TaxableItem {
    /// Convenience constructor.
    pub fn new(category: impl Into<String>, amount: Money) -> Self {
        TaxableItem {
            category: category.into(),
            amount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(2.5);
        assert_eq!(rate.bps(), 250);
    }

    #[test]
    fn test_tax_rate_half() {
        assert_eq!(TaxRate::from_bps(500).half().bps(), 250);
        assert_eq!(TaxRate::from_bps(2800).half().bps(), 1400);
    }

    #[test]
    fn test_component_code_display() {
        assert_eq!(GstComponentCode::Cgst.to_string(), "CGST");
        assert_eq!(GstComponentCode::Sgst.as_str(), "SGST");
        assert_eq!(GstComponentCode::Igst.as_str(), "IGST");
    }

    #[test]
    fn test_supply_type() {
        assert!(SupplyType::InterState.is_inter_state());
        assert!(!SupplyType::IntraState.is_inter_state());
    }

    #[test]
    fn test_breakdown_amount_for_missing_component() {
        let breakdown = TaxBreakdown::zero();
        assert!(breakdown.amount_for(GstComponentCode::Cgst).is_zero());
        assert!(breakdown.rate_for(GstComponentCode::Igst).is_zero());
        assert!(breakdown.component(GstComponentCode::Sgst).is_none());
    }
}
