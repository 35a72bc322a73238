//! # rasoi-invoice: Documents & Display for Rasoi POS
//!
//! Turns tax breakdowns computed by `rasoi-core` into what people and the
//! tax portal actually see:
//!
//! - [`display`] - formatted tax summaries for bills and the UI
//! - [`invoice`] - GST e-invoice data with per-line HSN codes and
//!   component amounts
//!
//! ## Position in the Workspace
//! ```text
//! rasoi-core (math)  ──►  rasoi-invoice (documents)  ──►  caller (persist/render)
//! ```
//!
//! Same golden rule as the core: no I/O, pure transformations. And one
//! more: **tax is never recomputed here** - every figure on a document is
//! read from an existing [`rasoi_core::TaxBreakdown`] and distributed.
//!
//! ## Example
//! ```rust
//! use rasoi_core::{GstCalculator, Money, SupplyType};
//! use rasoi_invoice::{build_invoice, format_breakdown, Order, OrderLine};
//!
//! let calc = GstCalculator::india();
//! let order = Order::new(vec![
//!     OrderLine::new("Masala Dosa", "restaurant_service", 2, Money::from_paise(12000)),
//! ]);
//! let breakdown = calc
//!     .calculate(order.subtotal(), SupplyType::IntraState, "restaurant_service")
//!     .unwrap();
//!
//! let summary = format_breakdown(&calc.config().currency, &breakdown);
//! assert_eq!(summary.total, "₹252.00");
//!
//! let invoice = build_invoice(&calc, &order, &breakdown);
//! assert_eq!(invoice.lines[0].hsn_code, "996331");
//! ```

pub mod display;
pub mod invoice;

pub use display::{format_breakdown, TaxLineDisplay, TaxSummaryDisplay};
pub use invoice::{build_invoice, GstInvoice, InvoiceLine, Order, OrderLine};
