//! Advanced prices → Shopgate tier prices.

use std::collections::BTreeSet;

use sgbridge_core::wire::{ReductionType, TierPrice};
use sgbridge_core::{ContextManager, Price, ProductPrice, RuleNode};

use crate::error::CatalogError;
use crate::rule_eval::{is_exportable, resolve_groups};

/// Maps a product's advanced prices to tier prices in the active currency.
pub struct TierPriceMapper<'a> {
    context: &'a ContextManager,
}

impl<'a> TierPriceMapper<'a> {
    #[must_use]
    pub fn new(context: &'a ContextManager) -> Self {
        Self { context }
    }

    /// Builds one tier price per qualifying customer group, or a single
    /// ungated tier price when the rule does not restrict groups.
    ///
    /// Tiers whose rule cannot be exported, or that have no price in the
    /// active currency, are left out. Output follows tier order, then group
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Context`] if no sales context is active,
    /// [`CatalogError::CurrencyMismatch`] if `base_price` is not in the
    /// active currency, and [`CatalogError::ReductionOverflow`] if a
    /// reduction does not fit a decimal.
    pub fn map_tier_prices(
        &self,
        tiers: &[ProductPrice],
        base_price: &Price,
        all_group_ids: &BTreeSet<String>,
    ) -> Result<Vec<TierPrice>, CatalogError> {
        let currency_id = self.active_currency(base_price)?;
        let mut list = Vec::new();

        for (tier, rule) in exportable_tiers(tiers) {
            let Some(tier_price) = map_product_tier(tier, base_price, currency_id)? else {
                tracing::debug!(
                    tier_id = %tier.id,
                    currency_id,
                    "advanced price has no price in the active currency; skipped"
                );
                continue;
            };

            let group_ids = resolve_groups(rule, all_group_ids);
            if group_ids.is_empty() {
                list.push(tier_price);
                continue;
            }
            list.extend(group_ids.into_iter().map(|group_id| TierPrice {
                customer_group_uid: Some(group_id),
                ..tier_price.clone()
            }));
        }

        Ok(list)
    }

    /// The higher of the base price and any exportable tier price in the
    /// active currency, compared by gross amount. On equal gross the later
    /// tier price wins over the base price.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Context`] if no sales context is active and
    /// [`CatalogError::CurrencyMismatch`] if `base_price` is not in the
    /// active currency.
    pub fn highest_qualifying_price(
        &self,
        tiers: &[ProductPrice],
        base_price: &Price,
    ) -> Result<Price, CatalogError> {
        let currency_id = self.active_currency(base_price)?;
        let highest = exportable_tiers(tiers)
            .filter_map(|(tier, _)| tier.currency_price(currency_id))
            .fold(base_price, |carry, candidate| {
                if carry.gross > candidate.gross {
                    carry
                } else {
                    candidate
                }
            });
        Ok(highest.clone())
    }

    fn active_currency(&self, base_price: &Price) -> Result<&'a str, CatalogError> {
        let currency_id = self.context.sales_context()?.currency_id();
        if base_price.currency_id != currency_id {
            return Err(CatalogError::CurrencyMismatch {
                base_currency_id: base_price.currency_id.clone(),
                active_currency_id: currency_id.to_string(),
            });
        }
        Ok(currency_id)
    }
}

/// Tiers carrying an exportable rule, paired with that rule.
fn exportable_tiers(
    tiers: &[ProductPrice],
) -> impl Iterator<Item = (&ProductPrice, &RuleNode)> {
    tiers.iter().filter_map(|tier| {
        tier.rule
            .as_ref()
            .filter(|rule| is_exportable(rule))
            .map(|rule| (tier, rule))
    })
}

fn map_product_tier(
    tier: &ProductPrice,
    base_price: &Price,
    currency_id: &str,
) -> Result<Option<TierPrice>, CatalogError> {
    let Some(reduced) = tier.currency_price(currency_id) else {
        return Ok(None);
    };
    let reduction = base_price
        .gross
        .checked_sub(reduced.gross)
        .ok_or_else(|| CatalogError::ReductionOverflow {
            tier_id: tier.id.clone(),
        })?;
    Ok(Some(TierPrice {
        from_quantity: tier.quantity_start,
        to_quantity: tier.quantity_end,
        reduction_type: ReductionType::Fixed,
        reduction: reduction.round_dp(2),
        customer_group_uid: None,
    }))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use sgbridge_core::entities::CustomerGroup;
    use sgbridge_core::{GroupOperator, SalesChannel, SalesContext};

    use super::*;

    const EUR: &str = "b7d2554b0ce847cd82f3ac9bd1c0dfca";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_context() -> ContextManager {
        ContextManager::with_context(SalesContext {
            token: "token".to_string(),
            sales_channel: SalesChannel {
                id: "channel".to_string(),
                currency_id: EUR.to_string(),
                language_id: None,
                navigation_category_id: None,
                payment_method_id: None,
                shipping_method_id: None,
                domains: vec![],
            },
            current_customer_group: CustomerGroup {
                id: "G1".to_string(),
                name: "Standard".to_string(),
            },
            currency_iso: "EUR".to_string(),
            customer: None,
        })
    }

    fn price(currency_id: &str, gross: &str) -> Price {
        Price {
            currency_id: currency_id.to_string(),
            gross: dec(gross),
            net: dec(gross),
        }
    }

    fn make_tier(id: &str, gross: &str, rule: Option<RuleNode>) -> ProductPrice {
        ProductPrice {
            id: id.to_string(),
            quantity_start: 10,
            quantity_end: Some(20),
            rule,
            prices: vec![price(EUR, gross)],
        }
    }

    fn groups(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|id| (*id).to_string()).collect()
    }

    #[test]
    fn always_valid_tier_yields_one_ungated_band() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let tiers = vec![make_tier("t1", "90.00", Some(RuleNode::AlwaysValid))];

        let bands = mapper
            .map_tier_prices(&tiers, &price(EUR, "100.00"), &groups(&["G1"]))
            .unwrap();

        assert_eq!(
            bands,
            vec![TierPrice {
                from_quantity: 10,
                to_quantity: Some(20),
                reduction_type: ReductionType::Fixed,
                reduction: dec("10.00"),
                customer_group_uid: None,
            }]
        );
    }

    #[test]
    fn equals_condition_yields_one_band_per_group() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let rule = RuleNode::customer_group(GroupOperator::Equals, ["G1", "G2"]);
        let tiers = vec![make_tier("t1", "90.00", Some(rule))];

        let bands = mapper
            .map_tier_prices(&tiers, &price(EUR, "100.00"), &groups(&["G1", "G2", "G3"]))
            .unwrap();

        let uids: Vec<_> = bands
            .iter()
            .map(|b| b.customer_group_uid.as_deref())
            .collect();
        assert_eq!(uids, vec![Some("G1"), Some("G2")]);
        assert!(bands.iter().all(|b| b.reduction == dec("10.00")));
        assert!(bands
            .iter()
            .all(|b| b.from_quantity == 10 && b.to_quantity == Some(20)));
    }

    #[test]
    fn not_equals_condition_yields_bands_for_remaining_groups() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let rule = RuleNode::customer_group(GroupOperator::NotEquals, ["G1"]);
        let tiers = vec![make_tier("t1", "90.00", Some(rule))];

        let bands = mapper
            .map_tier_prices(&tiers, &price(EUR, "100.00"), &groups(&["G1", "G2", "G3"]))
            .unwrap();

        let uids: Vec<_> = bands
            .iter()
            .map(|b| b.customer_group_uid.clone().unwrap())
            .collect();
        assert_eq!(uids, vec!["G2", "G3"]);
    }

    #[test]
    fn tier_without_active_currency_price_is_skipped() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let mut foreign = make_tier("t2", "80.00", Some(RuleNode::AlwaysValid));
        foreign.prices = vec![price("usd-id", "80.00")];
        let tiers = vec![
            make_tier("t1", "90.00", Some(RuleNode::AlwaysValid)),
            foreign,
        ];

        let bands = mapper
            .map_tier_prices(&tiers, &price(EUR, "100.00"), &groups(&["G1"]))
            .unwrap();
        assert_eq!(bands.len(), 1);
    }

    #[test]
    fn unsupported_leaf_excludes_tier() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let rule = RuleNode::and(vec![RuleNode::AlwaysValid, RuleNode::Other]);
        let tiers = vec![make_tier("t1", "90.00", Some(rule))];

        let bands = mapper
            .map_tier_prices(&tiers, &price(EUR, "100.00"), &groups(&["G1"]))
            .unwrap();
        assert!(bands.is_empty());
    }

    #[test]
    fn tier_without_rule_is_excluded() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let tiers = vec![make_tier("t1", "90.00", None)];
        let bands = mapper
            .map_tier_prices(&tiers, &price(EUR, "100.00"), &groups(&["G1"]))
            .unwrap();
        assert!(bands.is_empty());
    }

    #[test]
    fn reduction_is_rounded_to_cents() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let tiers = vec![make_tier("t1", "89.9951", Some(RuleNode::AlwaysValid))];
        let bands = mapper
            .map_tier_prices(&tiers, &price(EUR, "100.00"), &groups(&[]))
            .unwrap();
        assert_eq!(bands[0].reduction, dec("10.00"));
    }

    #[test]
    fn mapping_twice_gives_identical_output() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let tiers = vec![
            make_tier(
                "t1",
                "95.00",
                Some(RuleNode::customer_group(GroupOperator::NotEquals, ["G2"])),
            ),
            make_tier("t2", "90.00", Some(RuleNode::AlwaysValid)),
        ];
        let all = groups(&["G1", "G2", "G3"]);
        let base = price(EUR, "100.00");
        let first = mapper.map_tier_prices(&tiers, &base, &all).unwrap();
        let second = mapper.map_tier_prices(&tiers, &base, &all).unwrap();
        assert_eq!(first, second);

        let sequence: Vec<_> = first
            .iter()
            .map(|b| (b.customer_group_uid.as_deref(), b.reduction))
            .collect();
        assert_eq!(
            sequence,
            vec![
                (Some("G1"), dec("5.00")),
                (Some("G3"), dec("5.00")),
                (None, dec("10.00")),
            ]
        );
    }

    #[test]
    fn base_price_in_other_currency_is_rejected() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let tiers = vec![make_tier("t1", "95.00", Some(RuleNode::AlwaysValid))];
        let base = price("usd-id", "100.00");

        let err = mapper
            .map_tier_prices(&tiers, &base, &groups(&["G1"]))
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::CurrencyMismatch { ref base_currency_id, ref active_currency_id }
                if base_currency_id == "usd-id" && active_currency_id == EUR
        ));

        let err = mapper.highest_qualifying_price(&tiers, &base).unwrap_err();
        assert!(matches!(err, CatalogError::CurrencyMismatch { .. }));
    }

    #[test]
    fn reduction_overflow_is_an_error() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let mut tier = make_tier("t1", "0", Some(RuleNode::AlwaysValid));
        tier.prices[0].gross = -Decimal::MAX;
        let base = Price {
            currency_id: EUR.to_string(),
            gross: Decimal::MAX,
            net: Decimal::MAX,
        };

        let err = mapper
            .map_tier_prices(&[tier], &base, &groups(&[]))
            .unwrap_err();
        assert!(matches!(err, CatalogError::ReductionOverflow { ref tier_id } if tier_id == "t1"));
    }

    #[test]
    fn missing_context_fails_fast() {
        let context = ContextManager::new();
        let mapper = TierPriceMapper::new(&context);
        let err = mapper
            .map_tier_prices(&[], &price(EUR, "1.00"), &groups(&[]))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Context(_)));
        let err = mapper
            .highest_qualifying_price(&[], &price(EUR, "1.00"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Context(_)));
    }

    // -----------------------------------------------------------------------
    // highest_qualifying_price
    // -----------------------------------------------------------------------

    #[test]
    fn highest_price_is_base_for_regular_discounts() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let tiers = vec![make_tier("t1", "90.00", Some(RuleNode::AlwaysValid))];
        let highest = mapper
            .highest_qualifying_price(&tiers, &price(EUR, "100.00"))
            .unwrap();
        assert_eq!(highest.gross, dec("100.00"));
    }

    #[test]
    fn highest_price_picks_tier_above_base() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let tiers = vec![
            make_tier("t1", "120.00", Some(RuleNode::AlwaysValid)),
            make_tier("t2", "110.00", Some(RuleNode::AlwaysValid)),
        ];
        let highest = mapper
            .highest_qualifying_price(&tiers, &price(EUR, "100.00"))
            .unwrap();
        assert_eq!(highest.gross, dec("120.00"));
    }

    #[test]
    fn highest_price_tie_goes_to_tier_price() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let mut tier = make_tier("t1", "100.00", Some(RuleNode::AlwaysValid));
        tier.prices[0].net = dec("84.03");
        let base = Price {
            currency_id: EUR.to_string(),
            gross: dec("100.00"),
            net: dec("80.00"),
        };

        let highest = mapper.highest_qualifying_price(&[tier], &base).unwrap();
        assert_eq!(highest.gross, dec("100.00"));
        assert_eq!(highest.net, dec("84.03"));
    }

    #[test]
    fn highest_price_ignores_unexportable_and_foreign_currency_tiers() {
        let context = make_context();
        let mapper = TierPriceMapper::new(&context);
        let mut foreign = make_tier("t2", "500.00", Some(RuleNode::AlwaysValid));
        foreign.prices = vec![price("usd-id", "500.00")];
        let tiers = vec![make_tier("t1", "300.00", Some(RuleNode::Other)), foreign];
        let highest = mapper
            .highest_qualifying_price(&tiers, &price(EUR, "100.00"))
            .unwrap();
        assert_eq!(highest.gross, dec("100.00"));
    }
}
