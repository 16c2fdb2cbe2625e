//! Storefront categories → Shopgate categories.

use sgbridge_core::entities::{CategoryEntity, Media};
use sgbridge_core::wire::{ShopgateCategory, ShopgateImage};
use sgbridge_core::{ContextManager, SalesChannel};

use crate::error::CatalogError;

/// Media uid used when a category references media that was not loaded.
const UNLOADED_MEDIA_UID: &str = "1";

pub struct CategoryMapper<'a> {
    context: &'a ContextManager,
}

impl<'a> CategoryMapper<'a> {
    #[must_use]
    pub fn new(context: &'a ContextManager) -> Self {
        Self { context }
    }

    /// Maps one category. `max_position` is the highest position in the
    /// export, and `root_id` the export root, which is emitted without a
    /// parent.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Context`] if no sales context is active.
    pub fn map(
        &self,
        category: &CategoryEntity,
        max_position: i64,
        root_id: &str,
    ) -> Result<ShopgateCategory, CatalogError> {
        let channel = &self.context.sales_context()?.sales_channel;

        Ok(ShopgateCategory {
            uid: category.id.clone(),
            sort_order: max_position - category.auto_increment,
            name: category.name.clone(),
            parent_uid: if category.id == root_id {
                None
            } else {
                category.parent_id.clone()
            },
            deeplink: deeplink(category, channel),
            is_anchor: true,
            is_active: category.active,
            image: category
                .media_id
                .as_ref()
                .map(|_| category_image(category.media.as_ref(), &category.name)),
        })
    }

    /// Maps a whole category list, positioning against its highest
    /// `auto_increment`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Context`] if no sales context is active.
    pub fn map_all(
        &self,
        categories: &[CategoryEntity],
        root_id: &str,
    ) -> Result<Vec<ShopgateCategory>, CatalogError> {
        let max_position = categories
            .iter()
            .map(|category| category.auto_increment)
            .max()
            .unwrap_or_default();

        categories
            .iter()
            .map(|category| self.map(category, max_position, root_id))
            .collect()
    }
}

fn deeplink(category: &CategoryEntity, channel: &SalesChannel) -> String {
    let Some(seo) = category
        .seo_urls
        .iter()
        .find(|seo| seo.sales_channel_id == channel.id)
    else {
        return String::new();
    };

    if let Some(url) = seo.url.as_deref().filter(|url| !url.is_empty()) {
        return url.to_string();
    }

    channel
        .domains
        .iter()
        .find(|domain| domain.sales_channel_id == channel.id)
        .map(|domain| format!("{}{}", domain.url, seo.path_info))
        .unwrap_or_default()
}

fn category_image(media: Option<&Media>, category_name: &str) -> ShopgateImage {
    let Some(media) = media else {
        return ShopgateImage {
            uid: UNLOADED_MEDIA_UID.to_string(),
            sort_order: 1,
            url: String::new(),
            title: category_name.to_string(),
            alt: String::new(),
        };
    };

    ShopgateImage {
        uid: media.id.clone(),
        sort_order: 1,
        url: media.url.clone(),
        title: media
            .title
            .clone()
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| category_name.to_string()),
        alt: media.alt.clone().unwrap_or_default(),
    }
}
