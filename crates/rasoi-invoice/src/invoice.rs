//! # GST Compliance Invoice Data
//!
//! Builds the structured record a GST e-invoice needs from an order and an
//! already-computed [`TaxBreakdown`].
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       build_invoice(...)                                │
//! │                                                                         │
//! │  Order (lines, GSTINs)      TaxBreakdown (computed earlier)            │
//! │       │                          │                                      │
//! │       └──────────┬───────────────┘                                      │
//! │                  ▼                                                      │
//! │  Per line:  HSN code lookup (category)                                 │
//! │             CGST/SGST/IGST share = component total × line/subtotal     │
//! │             (final line takes the remainder; lines foot exactly)       │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │  GstInvoice { lines[], totalCGST, totalSGST, totalIGST, ... }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Tax is never recomputed here; every amount is read from the breakdown
//!   and distributed
//! - Components absent from the breakdown appear as zeros, not omitted
//!   fields - downstream filing consumers want a stable schema
//! - Per-line component amounts sum exactly to the invoice-level totals

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use rasoi_core::{GstCalculator, GstComponentCode, Money, TaxBreakdown, TaxRate};

// =============================================================================
// Order Types
// =============================================================================

/// A line item on an order, snapshotted at billing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Item name as it appears on the bill.
    pub name: String,

    /// Tax category key ("restaurant_service", "alcoholic_beverages", ...).
    pub category: String,

    /// Quantity sold.
    pub quantity: i64,

    /// Unit price at time of sale (frozen).
    pub unit_price: Money,

    /// Line total before tax (unit_price × quantity).
    pub line_total: Money,
}

impl OrderLine {
    /// Creates a line, deriving the line total from unit price × quantity.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Self {
        OrderLine {
            name: name.into(),
            category: category.into(),
            quantity,
            unit_price,
            line_total: unit_price.multiply_quantity(quantity),
        }
    }
}

/// An order ready for invoicing: line items plus the party tax identifiers
/// the e-invoice schema wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier (UUID v4).
    pub id: String,

    /// Supplier GSTIN (the restaurant's registration number).
    pub supplier_gstin: Option<String>,

    /// Customer GSTIN, present for B2B invoices.
    pub customer_gstin: Option<String>,

    /// State code of the place of supply ("29" = Karnataka). Informational
    /// here; the supply-type decision already happened at the caller.
    pub place_of_supply: Option<String>,

    /// Line items.
    pub items: Vec<OrderLine>,
}

impl Order {
    /// Creates an order with a fresh UUID.
    pub fn new(items: Vec<OrderLine>) -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            supplier_gstin: None,
            customer_gstin: None,
            place_of_supply: None,
            items,
        }
    }

    /// Pre-tax order total (sum of line totals).
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|line| line.line_total).sum()
    }
}

// =============================================================================
// Invoice Types
// =============================================================================

/// One line of a GST e-invoice. Component fields are always present;
/// whichever side of the CGST+SGST / IGST split does not apply is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    /// Item description.
    pub description: String,

    /// HSN/SAC classification code for the item's category.
    pub hsn_code: String,

    /// Quantity sold.
    pub quantity: i64,

    /// Unit price before tax.
    pub unit_price: Money,

    /// Taxable amount for this line.
    pub taxable_amount: Money,

    /// Central GST rate and this line's share of the amount.
    pub cgst_rate: TaxRate,
    pub cgst_amount: Money,

    /// State GST rate and this line's share of the amount.
    pub sgst_rate: TaxRate,
    pub sgst_amount: Money,

    /// Integrated GST rate and this line's share of the amount.
    pub igst_rate: TaxRate,
    pub igst_amount: Money,
}

/// The complete e-invoice record for one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GstInvoice {
    /// Order this invoice was generated for.
    pub order_id: String,

    /// Supplier GSTIN.
    pub supplier_gstin: Option<String>,

    /// Customer GSTIN.
    pub customer_gstin: Option<String>,

    /// Place-of-supply state code.
    pub place_of_supply: Option<String>,

    /// Per-item lines with classification codes and component shares.
    pub lines: Vec<InvoiceLine>,

    /// Invoice-level totals, read straight from the breakdown.
    pub total_taxable_amount: Money,
    pub total_cgst: Money,
    pub total_sgst: Money,
    pub total_igst: Money,
    pub total_invoice_value: Money,

    /// When this record was generated.
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
}

// =============================================================================
// Invoice Generation
// =============================================================================

/// Builds e-invoice data from an order and its computed breakdown.
///
/// Tax is **not** recomputed: invoice totals are the breakdown's totals,
/// and each line carries its proportional share of every component amount
/// (by `line_total / subtotal`), with the final line absorbing the rounding
/// remainder so the lines foot exactly.
///
/// ## Example
/// ```rust
/// use rasoi_core::{GstCalculator, Money, SupplyType, TaxableItem};
/// use rasoi_invoice::invoice::{build_invoice, Order, OrderLine};
///
/// let calc = GstCalculator::india();
/// let order = Order::new(vec![
///     OrderLine::new("Thali", "restaurant_service", 2, Money::from_paise(5000)),
/// ]);
/// let breakdown = calc
///     .calculate(order.subtotal(), SupplyType::IntraState, "restaurant_service")
///     .unwrap();
///
/// let invoice = build_invoice(&calc, &order, &breakdown);
/// assert_eq!(invoice.lines[0].hsn_code, "996331");
/// assert_eq!(invoice.total_invoice_value.paise(), 10500);
/// ```
pub fn build_invoice(
    calculator: &GstCalculator,
    order: &Order,
    breakdown: &TaxBreakdown,
) -> GstInvoice {
    let cgst_total = breakdown.amount_for(GstComponentCode::Cgst);
    let sgst_total = breakdown.amount_for(GstComponentCode::Sgst);
    let igst_total = breakdown.amount_for(GstComponentCode::Igst);

    let weights: Vec<Money> = order.items.iter().map(|line| line.line_total).collect();
    let cgst_shares = allocate(cgst_total, &weights, breakdown.subtotal);
    let sgst_shares = allocate(sgst_total, &weights, breakdown.subtotal);
    let igst_shares = allocate(igst_total, &weights, breakdown.subtotal);

    let lines = order
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| InvoiceLine {
            description: item.name.clone(),
            hsn_code: calculator.hsn_code(&item.category).to_string(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            taxable_amount: item.line_total,
            cgst_rate: breakdown.rate_for(GstComponentCode::Cgst),
            cgst_amount: cgst_shares[i],
            sgst_rate: breakdown.rate_for(GstComponentCode::Sgst),
            sgst_amount: sgst_shares[i],
            igst_rate: breakdown.rate_for(GstComponentCode::Igst),
            igst_amount: igst_shares[i],
        })
        .collect();

    GstInvoice {
        order_id: order.id.clone(),
        supplier_gstin: order.supplier_gstin.clone(),
        customer_gstin: order.customer_gstin.clone(),
        place_of_supply: order.place_of_supply.clone(),
        lines,
        total_taxable_amount: breakdown.subtotal,
        total_cgst: cgst_total,
        total_sgst: sgst_total,
        total_igst: igst_total,
        total_invoice_value: breakdown.total,
        generated_at: Utc::now(),
    }
}

/// Distributes `total` across `weights` proportionally to `whole`, giving
/// the final slot the remainder so the shares always sum to `total`.
fn allocate(total: Money, weights: &[Money], whole: Money) -> Vec<Money> {
    if weights.is_empty() {
        return Vec::new();
    }

    let mut shares = Vec::with_capacity(weights.len());
    let mut allocated = Money::zero();
    for weight in &weights[..weights.len() - 1] {
        let share = total.prorate(*weight, whole);
        allocated += share;
        shares.push(share);
    }
    shares.push(total - allocated);
    shares
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rasoi_core::{SupplyType, TaxableItem};

    fn mixed_order() -> Order {
        let mut order = Order::new(vec![
            OrderLine::new("Thali", "restaurant_service", 2, Money::from_paise(5000)),
            OrderLine::new("Beer", "alcoholic_beverages", 1, Money::from_paise(5000)),
        ]);
        order.supplier_gstin = Some("29AAACR1234A1Z5".to_string());
        order.customer_gstin = None;
        order.place_of_supply = Some("29".to_string());
        order
    }

    fn mixed_breakdown(calc: &GstCalculator, order: &Order, supply: SupplyType) -> TaxBreakdown {
        let items: Vec<TaxableItem> = order
            .items
            .iter()
            .map(|line| TaxableItem::new(line.category.clone(), line.line_total))
            .collect();
        calc.calculate_mixed(&items, supply).unwrap()
    }

    #[test]
    fn test_intra_state_invoice_lines_foot_to_totals() {
        let calc = GstCalculator::india();
        let order = mixed_order();
        let breakdown = mixed_breakdown(&calc, &order, SupplyType::IntraState);

        let invoice = build_invoice(&calc, &order, &breakdown);

        // ₹100 food + ₹50 alcohol: CGST and SGST each ₹2.50 + ₹7.00 = ₹9.50
        assert_eq!(invoice.total_taxable_amount.paise(), 15000);
        assert_eq!(invoice.total_cgst.paise(), 950);
        assert_eq!(invoice.total_sgst.paise(), 950);
        assert!(invoice.total_igst.is_zero());
        assert_eq!(invoice.total_invoice_value.paise(), 16900);

        let cgst_sum: Money = invoice.lines.iter().map(|l| l.cgst_amount).sum();
        let sgst_sum: Money = invoice.lines.iter().map(|l| l.sgst_amount).sum();
        let igst_sum: Money = invoice.lines.iter().map(|l| l.igst_amount).sum();
        assert_eq!(cgst_sum, invoice.total_cgst);
        assert_eq!(sgst_sum, invoice.total_sgst);
        assert_eq!(igst_sum, invoice.total_igst);
    }

    #[test]
    fn test_inter_state_invoice_has_zero_cgst_sgst_fields() {
        let calc = GstCalculator::india();
        let order = mixed_order();
        let breakdown = mixed_breakdown(&calc, &order, SupplyType::InterState);

        let invoice = build_invoice(&calc, &order, &breakdown);

        assert!(invoice.total_cgst.is_zero());
        assert!(invoice.total_sgst.is_zero());
        assert_eq!(invoice.total_igst.paise(), 1900);
        // Fields are present-but-zero on every line, not omitted
        for line in &invoice.lines {
            assert!(line.cgst_amount.is_zero());
            assert!(line.cgst_rate.is_zero());
            assert!(line.sgst_amount.is_zero());
        }
        // ₹100-line carries 10000/15000 of ₹19.00 = ₹12.67, remainder ₹6.33
        assert_eq!(invoice.lines[0].igst_amount.paise(), 1267);
        assert_eq!(invoice.lines[1].igst_amount.paise(), 633);
    }

    #[test]
    fn test_invoice_line_hsn_codes() {
        let calc = GstCalculator::india();
        let order = mixed_order();
        let breakdown = mixed_breakdown(&calc, &order, SupplyType::IntraState);

        let invoice = build_invoice(&calc, &order, &breakdown);
        assert_eq!(invoice.lines[0].hsn_code, "996331");
        assert_eq!(invoice.lines[1].hsn_code, "2208");
    }

    #[test]
    fn test_invoice_carries_party_identifiers() {
        let calc = GstCalculator::india();
        let order = mixed_order();
        let breakdown = mixed_breakdown(&calc, &order, SupplyType::IntraState);

        let invoice = build_invoice(&calc, &order, &breakdown);
        assert_eq!(invoice.order_id, order.id);
        assert_eq!(invoice.supplier_gstin.as_deref(), Some("29AAACR1234A1Z5"));
        assert_eq!(invoice.customer_gstin, None);
        assert_eq!(invoice.place_of_supply.as_deref(), Some("29"));
    }

    #[test]
    fn test_zero_subtotal_order() {
        let calc = GstCalculator::india();
        let order = Order::new(vec![OrderLine::new(
            "Complimentary dessert",
            "restaurant_service",
            1,
            Money::zero(),
        )]);
        let breakdown = calc
            .calculate(order.subtotal(), SupplyType::IntraState, "restaurant_service")
            .unwrap();

        let invoice = build_invoice(&calc, &order, &breakdown);
        assert!(invoice.total_invoice_value.is_zero());
        assert!(invoice.lines[0].cgst_amount.is_zero());
        // Rates still show the applied slab halves
        assert_eq!(invoice.lines[0].cgst_rate.bps(), 250);
    }

    #[test]
    fn test_order_subtotal_and_line_totals() {
        let order = mixed_order();
        assert_eq!(order.items[0].line_total.paise(), 10000); // 2 × ₹50.00
        assert_eq!(order.subtotal().paise(), 15000);
    }

    #[test]
    fn test_invoice_serializes_for_filing_export() {
        let calc = GstCalculator::india();
        let order = mixed_order();
        let breakdown = mixed_breakdown(&calc, &order, SupplyType::IntraState);
        let invoice = build_invoice(&calc, &order, &breakdown);

        let json = serde_json::to_string(&invoice).unwrap();
        // camelCase field names and zero-not-omitted component fields
        assert!(json.contains("\"totalCgst\":950"));
        assert!(json.contains("\"totalIgst\":0"));

        let restored: GstInvoice = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, invoice);
    }

    #[test]
    fn test_allocate_remainder_goes_to_last_line() {
        let weights = [
            Money::from_paise(100),
            Money::from_paise(100),
            Money::from_paise(100),
        ];
        let shares = allocate(Money::from_paise(100), &weights, Money::from_paise(300));
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].paise(), 33);
        assert_eq!(shares[1].paise(), 33);
        assert_eq!(shares[2].paise(), 34);
        let total: Money = shares.iter().copied().sum();
        assert_eq!(total.paise(), 100);
    }
}
