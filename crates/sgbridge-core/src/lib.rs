pub mod app_config;
pub mod config;
pub mod context;
pub mod data_bag;
pub mod entities;
pub mod export;
pub mod pricing;
pub mod rules;
pub mod wire;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use context::{ContextManager, SalesChannel, SalesContext};
pub use data_bag::RequestDataBag;
pub use export::{load_catalog_export, load_price_export, CatalogExport, PriceExport};
pub use pricing::{Price, ProductPrice};
pub use rules::{CustomerGroupCondition, GroupOperator, RuleNode};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The caller never established a sales channel context. This is a
    /// programming error on the caller side and is never retried.
    #[error("missing sales context: {0}")]
    MissingContext(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read export document {path}: {source}")]
    DocumentIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse export document {path}: {reason}")]
    DocumentParse { path: String, reason: String },
}
