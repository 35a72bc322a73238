//! # Breakdown Display
//!
//! Formats a [`TaxBreakdown`] into currency strings for bills and the UI.
//!
//! ## What Comes Out
//! ```text
//! Subtotal                      ₹100.00
//! Central GST (2.5%)              ₹2.50
//! State GST (2.5%)                ₹2.50
//! Total                         ₹105.00
//! ```
//!
//! Pure string transformation: symbol and precision come from the
//! configured [`CurrencyFormat`], amounts come from the breakdown's
//! authoritative per-component figures (never recomputed from rates, which
//! are blended display values after mixed-category aggregation).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use rasoi_core::{CurrencyFormat, TaxBreakdown, TaxRate};

// =============================================================================
// Display Types
// =============================================================================

/// One formatted tax line: `"Central GST (2.5%)"` → `"₹2.50"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxLineDisplay {
    /// Component name with the applied percentage.
    pub label: String,

    /// Formatted tax amount.
    pub amount: String,
}

/// A fully formatted breakdown, ready to print on a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummaryDisplay {
    /// Formatted pre-tax amount.
    pub subtotal: String,

    /// One formatted line per applied component, in breakdown order.
    pub lines: Vec<TaxLineDisplay>,

    /// Formatted grand total.
    pub total: String,
}

// =============================================================================
// Formatting
// =============================================================================

/// Renders a breakdown with the given currency settings.
///
/// ## Example
/// ```rust
/// use rasoi_core::{GstCalculator, Money, SupplyType};
/// use rasoi_invoice::display::format_breakdown;
///
/// let calc = GstCalculator::india();
/// let bill = calc
///     .calculate(Money::from_paise(10000), SupplyType::IntraState, "restaurant_service")
///     .unwrap();
///
/// let summary = format_breakdown(&calc.config().currency, &bill);
/// assert_eq!(summary.subtotal, "₹100.00");
/// assert_eq!(summary.lines[0].label, "Central GST (2.5%)");
/// assert_eq!(summary.lines[0].amount, "₹2.50");
/// assert_eq!(summary.total, "₹105.00");
/// ```
pub fn format_breakdown(currency: &CurrencyFormat, breakdown: &TaxBreakdown) -> TaxSummaryDisplay {
    TaxSummaryDisplay {
        subtotal: currency.format(breakdown.subtotal),
        lines: breakdown
            .components
            .iter()
            .map(|line| TaxLineDisplay {
                label: format!("{} ({}%)", line.name, percent_label(line.rate)),
                amount: currency.format(line.amount),
            })
            .collect(),
        total: currency.format(breakdown.total),
    }
}

/// Percentage text with trailing zeros trimmed: 250 bps → "2.5",
/// 1400 bps → "14", 25 bps → "0.25".
fn percent_label(rate: TaxRate) -> String {
    let bps = rate.bps();
    if bps % 100 == 0 {
        format!("{}", bps / 100)
    } else if bps % 10 == 0 {
        format!("{}.{}", bps / 100, (bps % 100) / 10)
    } else {
        format!("{}.{:02}", bps / 100, bps % 100)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
