use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub sales_channel_id: String,
    pub currency_id: String,
    pub language_id: Option<String>,
    pub navigation_category_id: Option<String>,
    pub sort_tree_ttl_secs: u64,
    pub shopgate_customer_number: Option<String>,
    pub shopgate_shop_number: Option<String>,
    pub shopgate_api_key: Option<String>,
}

impl AppConfig {
    /// Sort-tree cache lifetime as a [`Duration`].
    #[must_use]
    pub fn sort_tree_ttl(&self) -> Duration {
        Duration::from_secs(self.sort_tree_ttl_secs)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("sales_channel_id", &self.sales_channel_id)
            .field("currency_id", &self.currency_id)
            .field("language_id", &self.language_id)
            .field("navigation_category_id", &self.navigation_category_id)
            .field("sort_tree_ttl_secs", &self.sort_tree_ttl_secs)
            .field("shopgate_customer_number", &self.shopgate_customer_number)
            .field("shopgate_shop_number", &self.shopgate_shop_number)
            .field(
                "shopgate_api_key",
                &self.shopgate_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
