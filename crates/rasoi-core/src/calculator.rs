//! # GST Calculator
//!
//! Turns a taxable amount (or a list of categorized amounts) plus a supply
//! type into a [`TaxBreakdown`].
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      calculate(subtotal, supply, category)              │
//! │                                                                         │
//! │  Resolve rate: category_rates[category]  (else base_rate + warning)    │
//! │       │                                                                 │
//! │       ├── InterState ──► one IGST line at the full rate                │
//! │       │                                                                 │
//! │       └── IntraState ──► CGST at half rate                             │
//! │                          SGST at the remaining half                    │
//! │                          (amounts always sum to subtotal × full rate)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TaxBreakdown { subtotal, total_tax, total, components }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! The calculator owns one validated, immutable [`GstConfig`]; every method
//! is a deterministic function of its inputs and that configuration. No
//! locks, no I/O, no hidden state: share one instance across as many
//! request handlers as you like.

use crate::config::{GstConfig, UnknownCategoryPolicy};
use crate::error::{GstError, GstResult};
use crate::money::Money;
use crate::types::{GstComponentCode, SupplyType, TaxBreakdown, TaxLine, TaxRate, TaxableItem};

// =============================================================================
// GST Calculator
// =============================================================================

/// Stateless GST computation over one immutable configuration.
///
/// ## Example
/// ```rust
/// use rasoi_core::calculator::GstCalculator;
/// use rasoi_core::money::Money;
/// use rasoi_core::types::SupplyType;
///
/// let calc = GstCalculator::india();
/// let bill = calc
///     .calculate(Money::from_paise(10000), SupplyType::IntraState, "restaurant_service")
///     .unwrap();
///
/// assert_eq!(bill.total_tax.paise(), 500);  // ₹5.00 GST on ₹100.00
/// assert_eq!(bill.total.paise(), 10500);
/// assert_eq!(bill.components.len(), 2);     // CGST + SGST
/// ```
#[derive(Debug, Clone)]
pub struct GstCalculator {
    config: GstConfig,
}

impl GstCalculator {
    /// Builds a calculator over a validated configuration.
    ///
    /// Validation happens once, here; calculation paths assume a
    /// well-formed config from then on.
    pub fn new(config: GstConfig) -> GstResult<Self> {
        config.validate()?;
        Ok(GstCalculator { config })
    }

    /// Builds a calculator with the built-in Indian GST configuration.
    pub fn india() -> Self {
        // The literal default is covered by tests; skipping validate here
        // keeps this constructor infallible.
        GstCalculator {
            config: GstConfig::india(),
        }
    }

    /// The configuration this calculator runs on.
    pub fn config(&self) -> &GstConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Core Operations
    // -------------------------------------------------------------------------

    /// Computes the GST breakdown for a single taxable amount.
    ///
    /// ## Behavior
    /// 1. Resolve the effective rate for `category` (base rate fallback or
    ///    rejection per the configured [`UnknownCategoryPolicy`]).
    /// 2. Inter-state supply: one IGST component at the full rate.
    /// 3. Intra-state supply: CGST and SGST, each at half the rate, with
    ///    amounts that always sum to `subtotal × rate` exactly.
    ///
    /// ## Edge Cases
    /// - Zero subtotal keeps the full component shape with zero amounts,
    ///   so downstream invoice rendering sees a stable schema.
    /// - Negative subtotals (credit notes) propagate mechanically; amount
    ///   validation is the order-intake layer's job.
    pub fn calculate(
        &self,
        subtotal: Money,
        supply: SupplyType,
        category: &str,
    ) -> GstResult<TaxBreakdown> {
        let (rate, base_rate_fallback) = self.resolve_rate(category)?;
        let total_tax = subtotal.apply_rate(rate);

        let components = match supply {
            SupplyType::InterState => {
                vec![self.line(GstComponentCode::Igst, rate, total_tax)]
            }
            SupplyType::IntraState => {
                let cgst_rate = rate.half();
                let sgst_rate = TaxRate::from_bps(rate.bps() - cgst_rate.bps());
                let cgst_amount = subtotal.apply_rate(cgst_rate);
                // Remainder, not a second rounding: the two halves must
                // reconstruct the full-rate tax to the paisa
                let sgst_amount = total_tax - cgst_amount;
                vec![
                    self.line(GstComponentCode::Cgst, cgst_rate, cgst_amount),
                    self.line(GstComponentCode::Sgst, sgst_rate, sgst_amount),
                ]
            }
        };

        Ok(TaxBreakdown {
            subtotal,
            total_tax,
            total: subtotal + total_tax,
            components,
            base_rate_fallback,
        })
    }

    /// Computes one consolidated breakdown for an order with mixed item
    /// categories (e.g., food at 5% plus alcohol at 28%).
    ///
    /// Per item this runs [`calculate`](Self::calculate), then aggregates by
    /// component code in canonical CGST, SGST, IGST order:
    /// - **amounts** are summed; they are authoritative and drive
    ///   `total_tax`
    /// - **rates** are summed per code; a blended figure kept for invoice
    ///   display parity, never an input to further computation
    ///
    /// An empty item list yields [`TaxBreakdown::zero`] (no components).
    pub fn calculate_mixed(
        &self,
        items: &[TaxableItem],
        supply: SupplyType,
    ) -> GstResult<TaxBreakdown> {
        if items.is_empty() {
            return Ok(TaxBreakdown::zero());
        }

        let mut subtotal = Money::zero();
        let mut total_tax = Money::zero();
        let mut base_rate_fallback = false;
        // One slot per code, filled in canonical order
        let mut aggregated: [Option<TaxLine>; 3] = [None, None, None];

        for item in items {
            let breakdown = self.calculate(item.amount, supply, &item.category)?;
            subtotal += breakdown.subtotal;
            total_tax += breakdown.total_tax;
            base_rate_fallback |= breakdown.base_rate_fallback;

            for line in breakdown.components {
                let slot = GstComponentCode::ALL
                    .iter()
                    .position(|code| *code == line.code)
                    .unwrap_or(0);
                match &mut aggregated[slot] {
                    Some(existing) => {
                        existing.rate = existing.rate.saturating_add(line.rate);
                        existing.amount += line.amount;
                    }
                    empty => *empty = Some(line),
                }
            }
        }

        Ok(TaxBreakdown {
            subtotal,
            total_tax,
            total: subtotal + total_tax,
            components: aggregated.into_iter().flatten().collect(),
            base_rate_fallback,
        })
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// The HSN/SAC classification code for a category, used on invoices.
    ///
    /// Total: an unrecognized category gets the configured default
    /// (restaurant services), never an error.
    pub fn hsn_code(&self, category: &str) -> &str {
        self.config
            .hsn_codes
            .get(category)
            .map(String::as_str)
            .unwrap_or(&self.config.default_hsn_code)
    }

    /// The rate that `calculate` would apply for a category. Falls back to
    /// the base rate silently; use `calculate` itself for the observable
    /// fallback path.
    pub fn effective_rate(&self, category: &str) -> TaxRate {
        self.config
            .category_rates
            .get(category)
            .map(|category_rate| category_rate.rate)
            .unwrap_or(self.config.base_rate)
    }

    /// Whether a named exemption condition is set. Unknown conditions are
    /// not exempt. The calculator never branches on these itself; order
    /// processing consults them before deciding to tax at all.
    pub fn is_exempt(&self, condition: &str) -> bool {
        self.config.exemptions.get(condition).copied().unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Resolves a category to its effective rate, reporting whether the
    /// base-rate fallback was taken.
    fn resolve_rate(&self, category: &str) -> GstResult<(TaxRate, bool)> {
        if let Some(category_rate) = self.config.category_rates.get(category) {
            return Ok((category_rate.rate, false));
        }

        match self.config.unknown_category_policy {
            UnknownCategoryPolicy::BaseRate => {
                tracing::warn!(
                    category,
                    base_rate_bps = self.config.base_rate.bps(),
                    "unknown tax category, falling back to base rate"
                );
                Ok((self.config.base_rate, true))
            }
            UnknownCategoryPolicy::Reject => Err(GstError::UnknownCategory {
                category: category.to_string(),
            }),
        }
    }

    /// Stamps a component template into an applied tax line.
    fn line(&self, code: GstComponentCode, rate: TaxRate, amount: Money) -> TaxLine {
        let template = self.config.component(code);
        TaxLine {
            code,
            name: template.name.clone(),
            rate,
            amount,
            account_code: template.account_code.clone(),
        }
    }
}

impl Default for GstCalculator {
    fn default() -> Self {
        GstCalculator::india()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rupees(major: i64) -> Money {
        Money::from_rupees(major, 0)
    }

    #[test]
    fn test_intra_state_restaurant_service() {
        let calc = GstCalculator::india();
        let bill = calc
            .calculate(rupees(100), SupplyType::IntraState, "restaurant_service")
            .unwrap();

        assert_eq!(bill.subtotal.paise(), 10000);
        assert_eq!(bill.total_tax.paise(), 500);
        assert_eq!(bill.total.paise(), 10500);
        assert!(!bill.base_rate_fallback);

        assert_eq!(bill.components.len(), 2);
        let cgst = &bill.components[0];
        let sgst = &bill.components[1];
        assert_eq!(cgst.code, GstComponentCode::Cgst);
        assert_eq!(cgst.rate.bps(), 250);
        assert_eq!(cgst.amount.paise(), 250);
        assert_eq!(sgst.code, GstComponentCode::Sgst);
        assert_eq!(sgst.rate.bps(), 250);
        assert_eq!(sgst.amount.paise(), 250);
        assert_eq!(cgst.name, "Central GST");
    }

    #[test]
    fn test_inter_state_uses_igst_alone() {
        let calc = GstCalculator::india();
        let bill = calc
            .calculate(rupees(100), SupplyType::InterState, "restaurant_service")
            .unwrap();

        assert_eq!(bill.components.len(), 1);
        let igst = &bill.components[0];
        assert_eq!(igst.code, GstComponentCode::Igst);
        assert_eq!(igst.rate.bps(), 500);
        assert_eq!(igst.amount.paise(), 500);
        assert_eq!(bill.total_tax.paise(), 500);
        assert_eq!(bill.total.paise(), 10500);
    }

    #[test]
    fn test_alcohol_slab() {
        let calc = GstCalculator::india();
        let bill = calc
            .calculate(rupees(200), SupplyType::IntraState, "alcoholic_beverages")
            .unwrap();

        assert_eq!(bill.components[0].rate.bps(), 1400);
        assert_eq!(bill.components[0].amount.paise(), 2800);
        assert_eq!(bill.components[1].amount.paise(), 2800);
        assert_eq!(bill.total_tax.paise(), 5600);
        assert_eq!(bill.total.paise(), 25600);
    }

    #[test]
    fn test_component_amounts_reconstruct_total_tax() {
        // Invariant: total == subtotal + total_tax, and component amounts
        // sum to total_tax, for awkward subtotals too
        let calc = GstCalculator::india();
        for paise in [1, 33, 99, 1099, 12345, 98765] {
            for supply in [SupplyType::IntraState, SupplyType::InterState] {
                let bill = calc
                    .calculate(Money::from_paise(paise), supply, "packaged_food")
                    .unwrap();
                let component_sum: Money =
                    bill.components.iter().map(|line| line.amount).sum();
                assert_eq!(component_sum, bill.total_tax);
                assert_eq!(bill.total, bill.subtotal + bill.total_tax);
            }
        }
    }

    #[test]
    fn test_zero_subtotal_keeps_component_shape() {
        let calc = GstCalculator::india();
        let bill = calc
            .calculate(Money::zero(), SupplyType::IntraState, "restaurant_service")
            .unwrap();

        assert_eq!(bill.components.len(), 2);
        assert!(bill.total_tax.is_zero());
        assert!(bill.total.is_zero());
        assert!(bill.components.iter().all(|line| line.amount.is_zero()));
        // Rates stay populated even at zero
        assert_eq!(bill.components[0].rate.bps(), 250);
    }

    #[test]
    fn test_unknown_category_falls_back_with_flag() {
        let calc = GstCalculator::india();
        let bill = calc
            .calculate(rupees(100), SupplyType::IntraState, "alchohol")
            .unwrap();

        // Taxed at the 5% base rate, but visibly flagged
        assert_eq!(bill.total_tax.paise(), 500);
        assert!(bill.base_rate_fallback);
    }

    #[test]
    fn test_unknown_category_rejected_in_strict_mode() {
        let mut config = GstConfig::india();
        config.unknown_category_policy = UnknownCategoryPolicy::Reject;
        let calc = GstCalculator::new(config).unwrap();

        let err = calc
            .calculate(rupees(100), SupplyType::IntraState, "alchohol")
            .unwrap_err();
        assert!(matches!(err, GstError::UnknownCategory { category } if category == "alchohol"));
    }

    #[test]
    fn test_calculate_is_deterministic() {
        let calc = GstCalculator::india();
        let first = calc
            .calculate(rupees(137), SupplyType::IntraState, "bottled_water")
            .unwrap();
        let second = calc
            .calculate(rupees(137), SupplyType::IntraState, "bottled_water")
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_mixed_categories_intra_state() {
        let calc = GstCalculator::india();
        let items = [
            TaxableItem::new("restaurant_service", rupees(100)),
            TaxableItem::new("alcoholic_beverages", rupees(50)),
        ];
        let bill = calc.calculate_mixed(&items, SupplyType::IntraState).unwrap();

        assert_eq!(bill.subtotal.paise(), 15000);
        // 5% of ₹100 + 28% of ₹50 = ₹5.00 + ₹14.00
        assert_eq!(bill.total_tax.paise(), 1900);
        assert_eq!(bill.total.paise(), 16900);

        // Two aggregated components in canonical order
        assert_eq!(bill.components.len(), 2);
        assert_eq!(bill.components[0].code, GstComponentCode::Cgst);
        assert_eq!(bill.components[1].code, GstComponentCode::Sgst);
        assert_eq!(bill.components[0].amount.paise(), 950);
        assert_eq!(bill.components[1].amount.paise(), 950);
        // Blended rate: 2.5% + 14% shares summed, display-only
        assert_eq!(bill.components[0].rate.bps(), 1650);
    }

    #[test]
    fn test_mixed_matches_per_item_totals() {
        let calc = GstCalculator::india();
        let items = [
            TaxableItem::new("restaurant_service", Money::from_paise(10099)),
            TaxableItem::new("packaged_food", Money::from_paise(5001)),
            TaxableItem::new("aerated_beverages", Money::from_paise(333)),
        ];

        for supply in [SupplyType::IntraState, SupplyType::InterState] {
            let combined = calc.calculate_mixed(&items, supply).unwrap();
            let expected_tax: Money = items
                .iter()
                .map(|item| {
                    calc.calculate(item.amount, supply, &item.category)
                        .unwrap()
                        .total_tax
                })
                .sum();
            assert_eq!(combined.total_tax, expected_tax);
            assert_eq!(combined.total, combined.subtotal + combined.total_tax);
        }
    }

    #[test]
    fn test_mixed_inter_state_single_component() {
        let calc = GstCalculator::india();
        let items = [
            TaxableItem::new("restaurant_service", rupees(100)),
            TaxableItem::new("alcoholic_beverages", rupees(50)),
        ];
        let bill = calc.calculate_mixed(&items, SupplyType::InterState).unwrap();

        assert_eq!(bill.components.len(), 1);
        assert_eq!(bill.components[0].code, GstComponentCode::Igst);
        assert_eq!(bill.components[0].amount.paise(), 1900);
    }

    #[test]
    fn test_mixed_empty_items() {
        let calc = GstCalculator::india();
        let bill = calc.calculate_mixed(&[], SupplyType::IntraState).unwrap();
        assert_eq!(bill, TaxBreakdown::zero());
    }

    #[test]
    fn test_mixed_propagates_fallback_flag() {
        let calc = GstCalculator::india();
        let items = [
            TaxableItem::new("restaurant_service", rupees(100)),
            TaxableItem::new("mystery_item", rupees(10)),
        ];
        let bill = calc.calculate_mixed(&items, SupplyType::IntraState).unwrap();
        assert!(bill.base_rate_fallback);
    }

    #[test]
    fn test_hsn_code_lookup() {
        let calc = GstCalculator::india();
        assert_eq!(calc.hsn_code("alcoholic_beverages"), "2208");
        assert_eq!(calc.hsn_code("restaurant_service"), "996331");
        // Unknown category gets the restaurant-services default
        assert_eq!(calc.hsn_code("unknown_category"), "996331");
        assert!(!calc.hsn_code("unknown_category").is_empty());
    }

    #[test]
    fn test_effective_rate() {
        let calc = GstCalculator::india();
        assert_eq!(calc.effective_rate("bottled_water").bps(), 1800);
        assert_eq!(calc.effective_rate("no_such_slab").bps(), 500);
    }

    #[test]
    fn test_exemption_lookup() {
        let calc = GstCalculator::india();
        assert!(calc.is_exempt("export_zero_rated"));
        assert!(!calc.is_exempt("composition_scheme"));
        assert!(!calc.is_exempt("no_such_condition"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = GstConfig::india();
        config.base_rate = TaxRate::from_bps(20000);
        assert!(GstCalculator::new(config).is_err());
    }

    #[test]
    fn test_negative_subtotal_credit_note() {
        // Not validated here by contract; a credit note flows through with
        // every figure negated
        let calc = GstCalculator::india();
        let bill = calc
            .calculate(rupees(-100), SupplyType::IntraState, "restaurant_service")
            .unwrap();
        assert_eq!(bill.total_tax.paise(), -500);
        assert_eq!(bill.total.paise(), -10500);
    }
}
