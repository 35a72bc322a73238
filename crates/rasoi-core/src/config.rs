//! # GST Configuration
//!
//! Process-wide static tax configuration: slab rates per item category,
//! component templates, HSN/SAC classification codes and display settings.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Configuration Lifecycle                             │
//! │                                                                         │
//! │  Process start                                                          │
//! │       │                                                                 │
//! │       ├── GstConfig::india()          built-in literal default          │
//! │       │         or                                                      │
//! │       ├── GstConfig::from_json(...)   deployment override               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GstCalculator::new(config)           validates, then owns the config   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Shared by reference everywhere       read-only after construction,     │
//! │                                       safe under any concurrency model  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no hot reload. A configuration is never mutated after a
//! calculator has been built on it; changing rates means building a new
//! calculator.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{GstError, GstResult, ValidationError};
use crate::money::Money;
use crate::types::{GstComponentCode, TaxRate};
use crate::validation::{validate_category_key, validate_hsn_code, validate_rate_bps};

// =============================================================================
// Component Template
// =============================================================================

/// Named template for one GST component.
///
/// The calculator copies the template into each breakdown and fills in the
/// per-calculation rate and amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTemplate {
    /// Component kind this template describes.
    pub code: GstComponentCode,

    /// Display name ("Central GST").
    pub name: String,

    /// Free-text description for reports.
    pub description: String,

    /// Optional ledger account reference, passed through untouched.
    pub account_code: Option<String>,
}

// =============================================================================
// Category Rate
// =============================================================================

/// A slab rate for one item category, effective over a date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRate {
    /// Rate in basis points.
    pub rate: TaxRate,

    /// Human label ("GST on restaurant services").
    pub description: String,

    /// First day the rate applies.
    #[ts(as = "String")]
    pub applicable_from: NaiveDate,

    /// Last day the rate applies; open-ended when absent.
    #[ts(as = "Option<String>")]
    pub applicable_to: Option<NaiveDate>,
}

impl CategoryRate {
    /// Checks whether the rate is effective on the given date.
    pub fn is_effective(&self, date: NaiveDate) -> bool {
        date >= self.applicable_from && self.applicable_to.map_or(true, |to| date <= to)
    }
}

// =============================================================================
// Currency Format
// =============================================================================

/// Display formatting for money: symbol + precision.
///
/// Kept in configuration rather than hardcoded so a non-INR deployment only
/// changes config, not the formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    /// Currency symbol prefixed to amounts ("₹").
    pub symbol: String,

    /// Decimal places shown: 2 for INR paise, 0 for whole-unit currencies.
    pub decimal_places: u8,
}

impl CurrencyFormat {
    /// Formats a money value with the configured symbol and precision.
    ///
    /// ## Example
    /// ```rust
    /// use rasoi_core::config::CurrencyFormat;
    /// use rasoi_core::money::Money;
    ///
    /// let inr = CurrencyFormat { symbol: "₹".to_string(), decimal_places: 2 };
    /// assert_eq!(inr.format(Money::from_paise(10000)), "₹100.00");
    /// assert_eq!(inr.format(Money::from_paise(-550)), "-₹5.50");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        if self.decimal_places == 0 {
            // Whole-unit display: round to the nearest major unit
            let rounded = (amount.paise().abs() + 50) / 100;
            format!("{}{}{}", sign, self.symbol, rounded)
        } else {
            format!(
                "{}{}{}.{:02}",
                sign,
                self.symbol,
                amount.rupees().abs(),
                amount.paise_part()
            )
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: "₹".to_string(),
            decimal_places: 2,
        }
    }
}

// =============================================================================
// Unknown Category Policy
// =============================================================================

/// What the calculator does with a category key it has no rate for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategoryPolicy {
    /// Fall back to the base rate, emit a `tracing` warning and set
    /// `TaxBreakdown::base_rate_fallback`. A typo'd category keeps billing
    /// working but is visible in logs and in the result.
    #[default]
    BaseRate,

    /// Reject the calculation with `GstError::UnknownCategory`. For
    /// deployments where a misclassified slab is worse than a failed bill.
    Reject,
}

// =============================================================================
// GST Configuration
// =============================================================================

/// Complete GST configuration for one country deployment.
///
/// Constructed once at process start (or loaded from a JSON override),
/// validated by `GstCalculator::new`, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GstConfig {
    /// ISO country code this configuration applies to.
    pub country: String,

    /// Default rate when a category has no specific slab.
    pub base_rate: TaxRate,

    /// Central GST component template.
    pub cgst: ComponentTemplate,

    /// State GST component template.
    pub sgst: ComponentTemplate,

    /// Integrated GST component template.
    pub igst: ComponentTemplate,

    /// Category key → slab rate.
    pub category_rates: HashMap<String, CategoryRate>,

    /// Category key → HSN/SAC classification code (invoice generation only,
    /// never consulted for rate resolution).
    pub hsn_codes: HashMap<String, String>,

    /// Classification code used when a category has no HSN mapping.
    pub default_hsn_code: String,

    /// Named exemption conditions for callers to consult (registration
    /// thresholds, composition scheme). The calculator itself never
    /// branches on these.
    pub exemptions: HashMap<String, bool>,

    /// Money display settings.
    pub currency: CurrencyFormat,

    /// Unknown-category behavior.
    pub unknown_category_policy: UnknownCategoryPolicy,
}

impl GstConfig {
    /// The built-in Indian GST configuration.
    ///
    /// ## Slabs Carried
    /// | Category             | Rate | HSN/SAC |
    /// |----------------------|------|---------|
    /// | restaurant_service   |   5% | 996331  |
    /// | packaged_food        |  12% | 2106    |
    /// | bottled_water        |  18% | 2201    |
    /// | alcoholic_beverages  |  28% | 2208    |
    /// | aerated_beverages    |  28% | 2202    |
    ///
    /// Restaurant service at 5% (without input tax credit) is the base rate:
    /// anything uncategorized is treated as part of the restaurant bill.
    pub fn india() -> Self {
        // GST slabs changed on 2017-07-01 (introduction) and for
        // restaurants on 2017-11-15 (28%/18% → flat 5% w/o ITC)
        let gst_epoch = NaiveDate::from_ymd_opt(2017, 7, 1).expect("valid date");
        let restaurant_revision = NaiveDate::from_ymd_opt(2017, 11, 15).expect("valid date");

        let slab = |rate_bps: u32, description: &str, from: NaiveDate| CategoryRate {
            rate: TaxRate::from_bps(rate_bps),
            description: description.to_string(),
            applicable_from: from,
            applicable_to: None,
        };

        let mut category_rates = HashMap::new();
        category_rates.insert(
            "restaurant_service".to_string(),
            slab(500, "GST on restaurant services (no ITC)", restaurant_revision),
        );
        category_rates.insert(
            "packaged_food".to_string(),
            slab(1200, "GST on packaged/branded food items", gst_epoch),
        );
        category_rates.insert(
            "bottled_water".to_string(),
            slab(1800, "GST on packaged drinking water", gst_epoch),
        );
        category_rates.insert(
            "alcoholic_beverages".to_string(),
            slab(2800, "Highest slab applied to alcohol service", gst_epoch),
        );
        category_rates.insert(
            "aerated_beverages".to_string(),
            slab(2800, "GST on aerated drinks", gst_epoch),
        );

        let mut hsn_codes = HashMap::new();
        hsn_codes.insert("restaurant_service".to_string(), "996331".to_string());
        hsn_codes.insert("packaged_food".to_string(), "2106".to_string());
        hsn_codes.insert("bottled_water".to_string(), "2201".to_string());
        hsn_codes.insert("alcoholic_beverages".to_string(), "2208".to_string());
        hsn_codes.insert("aerated_beverages".to_string(), "2202".to_string());

        let mut exemptions = HashMap::new();
        // Turnover below ₹20 lakh: registration (and therefore GST) not required
        exemptions.insert("small_business_threshold".to_string(), true);
        // Composition scheme restaurants bill a flat rate and cannot show
        // component-wise tax; callers check this before itemizing
        exemptions.insert("composition_scheme".to_string(), false);
        // Exports are zero-rated supplies
        exemptions.insert("export_zero_rated".to_string(), true);

        GstConfig {
            country: "IN".to_string(),
            base_rate: TaxRate::from_bps(500),
            cgst: ComponentTemplate {
                code: GstComponentCode::Cgst,
                name: "Central GST".to_string(),
                description: "Central Goods and Services Tax".to_string(),
                account_code: Some("2310".to_string()),
            },
            sgst: ComponentTemplate {
                code: GstComponentCode::Sgst,
                name: "State GST".to_string(),
                description: "State Goods and Services Tax".to_string(),
                account_code: Some("2320".to_string()),
            },
            igst: ComponentTemplate {
                code: GstComponentCode::Igst,
                name: "Integrated GST".to_string(),
                description: "Integrated Goods and Services Tax".to_string(),
                account_code: Some("2330".to_string()),
            },
            category_rates,
            hsn_codes,
            default_hsn_code: "996331".to_string(),
            exemptions,
            currency: CurrencyFormat::default(),
            unknown_category_policy: UnknownCategoryPolicy::BaseRate,
        }
    }

    /// Loads a configuration from a JSON document and validates it.
    ///
    /// Deployments override the built-in default with a config file or a
    /// database-stored document; either way it arrives here as JSON.
    pub fn from_json(json: &str) -> GstResult<Self> {
        let config: GstConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - Every rate (base and per-category) within 0..=10000 bps
    /// - Category keys and HSN codes well-formed and non-empty
    /// - `applicable_from` ≤ `applicable_to` where both present
    /// - Component templates and the default HSN code non-empty
    pub fn validate(&self) -> GstResult<()> {
        validate_rate_bps(self.base_rate.bps())?;

        for (category, category_rate) in &self.category_rates {
            validate_category_key(category)?;
            validate_rate_bps(category_rate.rate.bps())?;

            if let Some(to) = category_rate.applicable_to {
                if category_rate.applicable_from > to {
                    return Err(ValidationError::InvalidFormat {
                        field: format!("category_rates.{category}"),
                        reason: "applicableFrom is after applicableTo".to_string(),
                    }
                    .into());
                }
            }
        }

        for (category, hsn) in &self.hsn_codes {
            validate_category_key(category)?;
            validate_hsn_code(hsn)?;
        }
        validate_hsn_code(&self.default_hsn_code)?;

        for template in [&self.cgst, &self.sgst, &self.igst] {
            if template.name.trim().is_empty() {
                return Err(GstError::InvalidConfig {
                    reason: format!("component {} has an empty name", template.code),
                });
            }
        }

        if self.currency.symbol.is_empty() {
            return Err(GstError::InvalidConfig {
                reason: "currency symbol is empty".to_string(),
            });
        }

        Ok(())
    }

    /// The component template for a code.
    pub fn component(&self, code: GstComponentCode) -> &ComponentTemplate {
        match code {
            GstComponentCode::Cgst => &self.cgst,
            GstComponentCode::Sgst => &self.sgst,
            GstComponentCode::Igst => &self.igst,
        }
    }
}

impl Default for GstConfig {
    fn default() -> Self {
        GstConfig::india()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_india_config_is_valid() {
        let config = GstConfig::india();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_rate.bps(), 500);
        assert_eq!(
            config.category_rates["alcoholic_beverages"].rate.bps(),
            2800
        );
        assert_eq!(config.hsn_codes["restaurant_service"], "996331");
    }

    #[test]
    fn test_category_rate_effectivity() {
        let config = GstConfig::india();
        let restaurant = &config.category_rates["restaurant_service"];

        let before = NaiveDate::from_ymd_opt(2017, 10, 1).unwrap();
        let after = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(!restaurant.is_effective(before));
        assert!(restaurant.is_effective(after));
    }

    #[test]
    fn test_validate_rejects_rate_above_100_percent() {
        let mut config = GstConfig::india();
        config.category_rates.insert(
            "luxury".to_string(),
            CategoryRate {
                rate: TaxRate::from_bps(10001),
                description: "broken".to_string(),
                applicable_from: NaiveDate::from_ymd_opt(2017, 7, 1).unwrap(),
                applicable_to: None,
            },
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_date_window() {
        let mut config = GstConfig::india();
        config.category_rates.insert(
            "seasonal".to_string(),
            CategoryRate {
                rate: TaxRate::from_bps(1200),
                description: "festival slab".to_string(),
                applicable_from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                applicable_to: Some(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()),
            },
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_currency_format() {
        let inr = CurrencyFormat::default();
        assert_eq!(inr.format(Money::from_paise(10000)), "₹100.00");
        assert_eq!(inr.format(Money::from_paise(250)), "₹2.50");
        assert_eq!(inr.format(Money::from_paise(-550)), "-₹5.50");

        let whole = CurrencyFormat {
            symbol: "Rp".to_string(),
            decimal_places: 0,
        };
        assert_eq!(whole.format(Money::from_paise(10050)), "Rp101");
    }

    #[test]
    fn test_json_round_trip() {
        let config = GstConfig::india();
        let json = serde_json::to_string(&config).unwrap();
        let loaded = GstConfig::from_json(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(GstConfig::from_json("{not json").is_err());
    }
}
