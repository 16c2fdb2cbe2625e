use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load bridge configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load bridge configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function, so tests
/// can drive it from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let sales_channel_id = require("SGBRIDGE_SALES_CHANNEL_ID")?;
    let currency_id = require("SGBRIDGE_CURRENCY_ID")?;

    let env = parse_environment(&or_default("SGBRIDGE_ENV", "development"));
    let log_level = or_default("SGBRIDGE_LOG_LEVEL", "info");
    let sort_tree_ttl_secs = parse_u64("SGBRIDGE_SORT_TREE_TTL_SECS", "3600")?;

    Ok(AppConfig {
        env,
        log_level,
        sales_channel_id,
        currency_id,
        language_id: optional("SGBRIDGE_LANGUAGE_ID"),
        navigation_category_id: optional("SGBRIDGE_NAVIGATION_CATEGORY_ID"),
        sort_tree_ttl_secs,
        shopgate_customer_number: optional("SGBRIDGE_SHOPGATE_CUSTOMER_NUMBER"),
        shopgate_shop_number: optional("SGBRIDGE_SHOPGATE_SHOP_NUMBER"),
        shopgate_api_key: optional("SGBRIDGE_SHOPGATE_API_KEY"),
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
