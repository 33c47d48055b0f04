//! Configuration schema definitions
//!
//! Every section and field has a default, so a partial file (or none at
//! all) is always a valid configuration.

use foodsave_search::{ProductSearchSettings, SortKey, StoreSearchSettings, Suggestions};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub browse: BrowseConfig,

    #[serde(default)]
    pub suggestions: Suggestions,

    #[serde(default)]
    pub verification: VerificationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Matcher settings for the two search surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    #[serde(default)]
    pub products: ProductSearchSettings,

    #[serde(default)]
    pub stores: StoreSearchSettings,
}

/// Browse view configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Ordering used when the caller does not pick one
    #[serde(default)]
    pub default_sort: SortKey,

    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            default_sort: SortKey::default(),
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    20
}

/// Phone verification code settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Lifetime of a sent code
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Failed attempts allowed before the code is locked
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    600
}

fn default_max_attempts() -> u32 {
    5
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of the compact formatter
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
