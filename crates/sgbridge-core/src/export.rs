use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::entities::CategoryEntity;
use crate::pricing::{Price, ProductPrice};
use crate::ConfigError;

/// A product's price data as handed to the tier-price export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceExport {
    /// Currency to export in; falls back to the configured currency.
    #[serde(default)]
    pub currency_id: Option<String>,
    #[serde(default)]
    pub currency_iso: Option<String>,
    pub base_price: Price,
    /// Every customer group id known to the shop.
    #[serde(default)]
    pub customer_groups: Vec<String>,
    #[serde(default)]
    pub tiers: Vec<ProductPrice>,
}

/// A category subtree with the storefront listing of every category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogExport {
    pub root_id: String,
    #[serde(default)]
    pub categories: Vec<CategoryEntity>,
    /// Product ids per category id, in listing order.
    #[serde(default)]
    pub listings: BTreeMap<String, Vec<String>>,
}

/// Load a price export document.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_price_export(path: &Path) -> Result<PriceExport, ConfigError> {
    load_document(path)
}

/// Load a catalog export document.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_catalog_export(path: &Path) -> Result<CatalogExport, ConfigError> {
    load_document(path)
}

/// Files ending in `.yaml` or `.yml` are read as YAML, everything else as
/// JSON.
fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DocumentIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let parse_error = |reason: String| ConfigError::DocumentParse {
        path: path.display().to_string(),
        reason,
    };

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))
    }
}
