//! Export command handlers for the CLI.
//!
//! Each handler loads a document, builds an offline sales context from the
//! process configuration, runs the catalog mappers and prints JSON to stdout.

use std::collections::BTreeSet;
use std::path::Path;

use sgbridge_catalog::{
    CatalogError, CatalogSource, CategoryMapper, InMemorySortTreeCache, SortMap, SortTree,
    TierPriceMapper,
};
use sgbridge_core::entities::{CategoryEntity, CustomerGroup};
use sgbridge_core::wire::{ShopgateCategory, TierPrice};
use sgbridge_core::{
    load_catalog_export, load_price_export, AppConfig, CatalogExport, ContextManager, Price,
    PriceExport, SalesChannel, SalesContext,
};

const OFFLINE_TOKEN: &str = "offline";

/// Context for exporting `export`, priced in the document currency, else in
/// the currency of its base price.
pub(crate) fn price_context(config: &AppConfig, export: &PriceExport) -> ContextManager {
    let mut channel = SalesChannel::from_app_config(config);
    let currency_id = export
        .currency_id
        .as_ref()
        .unwrap_or(&export.base_price.currency_id);
    channel.currency_id.clone_from(currency_id);

    ContextManager::with_context(SalesContext {
        token: OFFLINE_TOKEN.to_string(),
        sales_channel: channel,
        current_customer_group: CustomerGroup::default(),
        currency_iso: export.currency_iso.clone().unwrap_or_default(),
        customer: None,
    })
}

pub(crate) fn tier_prices(config: &AppConfig, export: &PriceExport) -> anyhow::Result<Vec<TierPrice>> {
    let context = price_context(config, export);
    let groups: BTreeSet<String> = export.customer_groups.iter().cloned().collect();
    let mapped = TierPriceMapper::new(&context).map_tier_prices(
        &export.tiers,
        &export.base_price,
        &groups,
    )?;
    tracing::info!(
        tiers = export.tiers.len(),
        bands = mapped.len(),
        "mapped advanced prices"
    );
    Ok(mapped)
}

pub(crate) fn highest_price(config: &AppConfig, export: &PriceExport) -> anyhow::Result<Price> {
    let context = price_context(config, export);
    Ok(TierPriceMapper::new(&context).highest_qualifying_price(&export.tiers, &export.base_price)?)
}

/// Catalog source backed by an export document. Listings are taken in
/// document order whatever sort key the category asks for.
pub(crate) struct DocumentCatalog<'a> {
    export: &'a CatalogExport,
}

impl<'a> DocumentCatalog<'a> {
    pub(crate) fn new(export: &'a CatalogExport) -> Self {
        Self { export }
    }
}

impl CatalogSource for DocumentCatalog<'_> {
    fn child_categories(&self, root_category_id: &str) -> Result<Vec<CategoryEntity>, CatalogError> {
        Ok(self
            .export
            .categories
            .iter()
            .filter(|category| category.id != root_category_id)
            .cloned()
            .collect())
    }

    fn product_listing(
        &self,
        category_id: &str,
        order: Option<&str>,
    ) -> Result<Vec<String>, CatalogError> {
        if let Some(order) = order {
            tracing::debug!(category_id, order, "document listing ignores sort key");
        }
        Ok(self
            .export
            .listings
            .get(category_id)
            .cloned()
            .unwrap_or_default())
    }
}

pub(crate) fn categories(
    config: &AppConfig,
    export: &CatalogExport,
) -> anyhow::Result<(Vec<ShopgateCategory>, SortMap)> {
    let mut channel = SalesChannel::from_app_config(config);
    channel.navigation_category_id = Some(export.root_id.clone());
    let context = ContextManager::with_context(SalesContext {
        token: OFFLINE_TOKEN.to_string(),
        sales_channel: channel,
        current_customer_group: CustomerGroup::default(),
        currency_iso: String::new(),
        customer: None,
    });

    let mapped = CategoryMapper::new(&context).map_all(&export.categories, &export.root_id)?;
    let sort_tree = SortTree::new(
        &context,
        DocumentCatalog::new(export),
        InMemorySortTreeCache::new(config.sort_tree_ttl()),
    )
    .get_sort_tree(None)?;

    tracing::info!(
        categories = mapped.len(),
        sorted_categories = sort_tree.len(),
        "mapped catalog"
    );
    Ok((mapped, sort_tree))
}

pub(crate) fn run_tier_prices(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let export = load_price_export(path)?;
    let mapped = tier_prices(config, &export)?;
    println!("{}", serde_json::to_string_pretty(&mapped)?);
    Ok(())
}

pub(crate) fn run_highest_price(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let export = load_price_export(path)?;
    let price = highest_price(config, &export)?;
    println!("{}", serde_json::to_string_pretty(&price)?);
    Ok(())
}

pub(crate) fn run_categories(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let export = load_catalog_export(path)?;
    let (mapped, sort_tree) = categories(config, &export)?;
    let output = serde_json::json!({
        "categories": mapped,
        "sort_tree": sort_tree,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
