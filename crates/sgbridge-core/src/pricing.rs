use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rules::RuleNode;

/// A price in a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub currency_id: String,
    pub gross: Decimal,
    pub net: Decimal,
}

/// One advanced-price row of a product: a quantity band, the rule deciding
/// who gets it, and the band price in every configured currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPrice {
    pub id: String,
    pub quantity_start: u32,
    /// Upper bound of the band; `None` means open-ended.
    #[serde(default)]
    pub quantity_end: Option<u32>,
    #[serde(default)]
    pub rule: Option<RuleNode>,
    #[serde(default)]
    pub prices: Vec<Price>,
}

impl ProductPrice {
    /// Returns the price for exactly `currency_id`. There is no fallback to
    /// the shop's default currency.
    #[must_use]
    pub fn currency_price(&self, currency_id: &str) -> Option<&Price> {
        self.prices.iter().find(|p| p.currency_id == currency_id)
    }
}
