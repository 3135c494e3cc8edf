//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                      | Default     |
//! |-------------------------------|-------------|
//! | `PANTRY_PORT`                 | `5000`      |
//! | `PANTRY_DB_PATH`              | `pantry.db` |
//! | `PANTRY_DB_MAX_CONNECTIONS`   | `5`         |
//! | `PANTRY_GROCERY_LOW_STOCK`    | `3`         |
//! | `PANTRY_INVENTORY_LOW_STOCK`  | `5`         |
//! | `PANTRY_CORS_ANY_ORIGIN`      | `true`      |

use std::env;
use std::str::FromStr;

use pantry_core::LowStockPolicy;
use serde::Serialize;

/// API configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite database file
    pub db_path: String,

    /// Pool size
    pub db_max_connections: u32,

    /// Low-stock thresholds for both catalogs
    pub low_stock: LowStockPolicy,

    /// Allow cross-origin requests from any origin
    pub cors_any_origin: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 5000,
            db_path: "pantry.db".to_string(),
            db_max_connections: 5,
            low_stock: LowStockPolicy::default(),
            cors_any_origin: true,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            port: parse_or(&lookup, "PANTRY_PORT", defaults.port)?,

            db_path: lookup("PANTRY_DB_PATH")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.db_path),

            db_max_connections: parse_or(
                &lookup,
                "PANTRY_DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,

            low_stock: LowStockPolicy::new(
                parse_or(
                    &lookup,
                    "PANTRY_GROCERY_LOW_STOCK",
                    defaults.low_stock.grocery_threshold,
                )?,
                parse_or(
                    &lookup,
                    "PANTRY_INVENTORY_LOW_STOCK",
                    defaults.low_stock.inventory_threshold,
                )?,
            ),

            cors_any_origin: parse_or(&lookup, "PANTRY_CORS_ANY_ORIGIN", defaults.cors_any_origin)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "PANTRY_DB_MAX_CONNECTIONS".to_string(),
            ));
        }
        if !config.low_stock.grocery_threshold.is_finite() {
            return Err(ConfigError::InvalidValue("PANTRY_GROCERY_LOW_STOCK".to_string()));
        }
        if !config.low_stock.inventory_threshold.is_finite() {
            return Err(ConfigError::InvalidValue("PANTRY_INVENTORY_LOW_STOCK".to_string()));
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
