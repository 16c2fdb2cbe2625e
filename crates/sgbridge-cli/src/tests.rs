use std::collections::BTreeMap;
use std::str::FromStr;

use clap::Parser;
use rust_decimal::Decimal;
use sgbridge_catalog::CatalogError;
use sgbridge_core::entities::CategoryEntity;
use sgbridge_core::{AppConfig, CatalogExport, Environment, Price, PriceExport, ProductPrice, RuleNode};

use super::*;

fn test_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        sales_channel_id: "storefront".to_string(),
        currency_id: "EUR".to_string(),
        language_id: None,
        navigation_category_id: None,
        sort_tree_ttl_secs: 60,
        shopgate_customer_number: None,
        shopgate_shop_number: None,
        shopgate_api_key: Some("secret".to_string()),
    }
}

fn price(currency_id: &str, gross: &str) -> Price {
    Price {
        currency_id: currency_id.to_string(),
        gross: Decimal::from_str(gross).expect("valid decimal"),
        net: Decimal::from_str(gross).expect("valid decimal"),
    }
}

fn price_export(currency_id: Option<&str>) -> PriceExport {
    PriceExport {
        currency_id: currency_id.map(str::to_string),
        currency_iso: None,
        base_price: price("USD", "100.00"),
        customer_groups: vec!["G1".to_string(), "G2".to_string()],
        tiers: vec![ProductPrice {
            id: "t1".to_string(),
            quantity_start: 5,
            quantity_end: None,
            rule: Some(RuleNode::AlwaysValid),
            prices: vec![price("EUR", "95.00"), price("USD", "90.00")],
        }],
    }
}

fn category(id: &str, parent_id: Option<&str>, auto_increment: i64) -> CategoryEntity {
    CategoryEntity {
        id: id.to_string(),
        parent_id: parent_id.map(str::to_string),
        name: id.to_string(),
        auto_increment,
        active: true,
        media_id: None,
        media: None,
        seo_urls: vec![],
        slot_config: None,
    }
}

// ---------------------------------------------------------------------------
// argument parsing
// ---------------------------------------------------------------------------

#[test]
fn parses_tier_prices_command() {
    let cli = Cli::try_parse_from(["sgbridge-cli", "tier-prices", "prices.yaml"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::TierPrices { ref file } if file.as_os_str() == "prices.yaml"
    ));
}

#[test]
fn parses_highest_price_command() {
    let cli = Cli::try_parse_from(["sgbridge-cli", "highest-price", "prices.json"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::HighestPrice { .. }));
}

#[test]
fn parses_categories_command() {
    let cli = Cli::try_parse_from(["sgbridge-cli", "categories", "catalog.yml"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Categories { .. }));
}

#[test]
fn parses_config_command() {
    let cli = Cli::try_parse_from(["sgbridge-cli", "config"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Config));
}

#[test]
fn tier_prices_requires_file() {
    assert!(Cli::try_parse_from(["sgbridge-cli", "tier-prices"]).is_err());
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["sgbridge-cli"]).is_err());
}

// ---------------------------------------------------------------------------
// handlers
// ---------------------------------------------------------------------------

#[test]
fn price_context_prefers_document_currency() {
    let context = export::price_context(&test_config(), &price_export(Some("USD")));
    assert_eq!(context.sales_context().unwrap().currency_id(), "USD");

    let context = export::price_context(&test_config(), &price_export(None));
    assert_eq!(context.sales_context().unwrap().currency_id(), "USD");
}

#[test]
fn export_without_currency_prices_in_base_currency() {
    let mapped = export::tier_prices(&test_config(), &price_export(None)).unwrap();
    assert_eq!(mapped.len(), 1);
    assert_eq!(mapped[0].reduction, Decimal::from(10));

    let highest = export::highest_price(&test_config(), &price_export(None)).unwrap();
    assert_eq!(highest.currency_id, "USD");
    assert_eq!(highest.gross, Decimal::from(100));
}

#[test]
fn export_in_other_currency_than_base_price_fails() {
    let err = export::tier_prices(&test_config(), &price_export(Some("EUR"))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::CurrencyMismatch { .. })
    ));
    assert!(export::highest_price(&test_config(), &price_export(Some("EUR"))).is_err());
}

#[test]
fn tier_prices_use_document_currency() {
    let mapped = export::tier_prices(&test_config(), &price_export(Some("USD"))).unwrap();
    assert_eq!(mapped.len(), 1);
    assert_eq!(mapped[0].reduction, Decimal::from(10));
    assert_eq!(mapped[0].from_quantity, 5);
    assert!(mapped[0].customer_group_uid.is_none());
}

#[test]
fn highest_price_is_base_for_discounts() {
    let highest = export::highest_price(&test_config(), &price_export(Some("USD"))).unwrap();
    assert_eq!(highest.gross, Decimal::from(100));
}

#[test]
fn categories_map_subtree_and_sort_tree() {
    let export = CatalogExport {
        root_id: "root".to_string(),
        categories: vec![
            category("root", None, 1),
            category("shoes", Some("root"), 2),
            category("hats", Some("root"), 3),
        ],
        listings: BTreeMap::from([(
            "shoes".to_string(),
            vec!["p1".to_string(), "p2".to_string()],
        )]),
    };

    let (mapped, sort_tree) = export::categories(&test_config(), &export).unwrap();

    assert_eq!(mapped.len(), 3);
    assert!(mapped[0].parent_uid.is_none());
    assert_eq!(mapped[1].parent_uid.as_deref(), Some("root"));
    assert_eq!(mapped[2].sort_order, 0);
    assert_eq!(sort_tree.len(), 1);
    assert_eq!(sort_tree["shoes"]["p1"], 2);
    assert_eq!(sort_tree["shoes"]["p2"], 1);
}

#[test]
fn config_debug_redacts_api_key() {
    let rendered = format!("{:#?}", test_config());
    assert!(!rendered.contains("secret"));
    assert!(rendered.contains("[redacted]"));
}
