//! Per-category product positions, built from the storefront listing and
//! cached between exports.
//!
//! Shopgate sorts category products by a descending number, so the first
//! product of a listing gets the highest value (`count - index`).

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use serde_json::Value;
use sgbridge_core::entities::CategoryEntity;
use sgbridge_core::ContextManager;

use crate::error::CatalogError;

pub const CACHE_KEY: &str = "shopgate.sort.tree";

/// `category id -> (product id -> sort number)`.
pub type SortMap = BTreeMap<String, BTreeMap<String, u32>>;

/// Catalog lookups the sort tree depends on.
pub trait CatalogSource {
    /// Direct and nested child categories of `root_category_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Source`] if the lookup fails.
    fn child_categories(&self, root_category_id: &str) -> Result<Vec<CategoryEntity>, CatalogError>;

    /// Product ids of a category listing in storefront order. `order` is a
    /// listing sort key such as `price-asc` or `topseller`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Source`] if the listing cannot be loaded.
    fn product_listing(
        &self,
        category_id: &str,
        order: Option<&str>,
    ) -> Result<Vec<String>, CatalogError>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn child_categories(&self, root_category_id: &str) -> Result<Vec<CategoryEntity>, CatalogError> {
        (**self).child_categories(root_category_id)
    }

    fn product_listing(
        &self,
        category_id: &str,
        order: Option<&str>,
    ) -> Result<Vec<String>, CatalogError> {
        (**self).product_listing(category_id, order)
    }
}

pub trait SortTreeCache {
    fn get(&mut self, key: &str) -> Option<SortMap>;
    fn save(&mut self, key: &str, tree: SortMap);
}

impl<T: SortTreeCache + ?Sized> SortTreeCache for &mut T {
    fn get(&mut self, key: &str) -> Option<SortMap> {
        (**self).get(key)
    }

    fn save(&mut self, key: &str, tree: SortMap) {
        (**self).save(key, tree);
    }
}

/// Process-local cache with a fixed time-to-live per entry.
#[derive(Debug)]
pub struct InMemorySortTreeCache {
    ttl: Duration,
    entries: HashMap<String, (Instant, SortMap)>,
}

impl InMemorySortTreeCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }
}

impl SortTreeCache for InMemorySortTreeCache {
    fn get(&mut self, key: &str) -> Option<SortMap> {
        let expired = match self.entries.get(key) {
            Some((stored_at, tree)) if stored_at.elapsed() < self.ttl => return Some(tree.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    fn save(&mut self, key: &str, tree: SortMap) {
        self.entries.insert(key.to_string(), (Instant::now(), tree));
    }
}

pub struct SortTree<'a, S, C> {
    context: &'a ContextManager,
    source: S,
    cache: C,
}

impl<'a, S, C> SortTree<'a, S, C>
where
    S: CatalogSource,
    C: SortTreeCache,
{
    pub fn new(context: &'a ContextManager, source: S, cache: C) -> Self {
        Self {
            context,
            source,
            cache,
        }
    }

    /// Returns the cached sort tree, building it from `root_category_id` (or
    /// the channel's navigation category) on a cache miss.
    ///
    /// The cache entry is not keyed by root, so the first build wins until
    /// the entry expires.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the context is missing, no root can be
    /// determined, or a catalog lookup fails.
    pub fn get_sort_tree(&mut self, root_category_id: Option<&str>) -> Result<SortMap, CatalogError> {
        if let Some(tree) = self.cache.get(CACHE_KEY) {
            return Ok(tree);
        }

        tracing::debug!("building new sort order cache");
        let tree = self.build(root_category_id)?;
        self.cache.save(CACHE_KEY, tree.clone());
        Ok(tree)
    }

    fn build(&self, root_category_id: Option<&str>) -> Result<SortMap, CatalogError> {
        let root = match root_category_id {
            Some(root) => root.to_string(),
            None => {
                let channel = &self.context.sales_context()?.sales_channel;
                channel.navigation_category_id.clone().ok_or_else(|| {
                    CatalogError::MissingNavigationCategory {
                        sales_channel_id: channel.id.clone(),
                    }
                })?
            }
        };

        let mut tree = SortMap::new();
        for category in self.source.child_categories(&root)? {
            let order = category.slot_config.as_ref().and_then(sort_order_key);
            let products = self
                .source
                .product_listing(&category.id, order.as_deref())?;

            let max = u32::try_from(products.len()).unwrap_or(u32::MAX);
            let positions = products
                .into_iter()
                .zip((1..=max).rev())
                .collect::<BTreeMap<_, _>>();
            if !positions.is_empty() {
                tree.insert(category.id, positions);
            }
        }

        Ok(tree)
    }
}

/// Reads the default listing sort key from a category's CMS slot config.
///
/// Slots are merged in order, so the last slot carrying a `defaultSorting`
/// entry decides; returns `None` if that entry has no string `value`.
#[must_use]
pub fn sort_order_key(slot_config: &Value) -> Option<String> {
    let slots = slot_config.as_object()?;
    let default_sorting = slots
        .values()
        .filter_map(|slot| slot.get("defaultSorting"))
        .last()?;
    default_sorting
        .get("value")
        .and_then(Value::as_str)
        .map(str::to_string)
}
