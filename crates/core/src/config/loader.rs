//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use foodsave_search::{ProductSearcher, StoreSearcher};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist. Without one, the first existing
    /// standard location is used, and defaults apply when none exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        tracing::debug!(path = ?config_path, "configuration loaded");

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Product searcher built from the `[search.products]` section
    pub fn product_searcher(&self) -> Result<ProductSearcher> {
        Ok(ProductSearcher::new(self.schema.search.products.clone())?)
    }

    /// Store searcher built from the `[search.stores]` section
    pub fn store_searcher(&self) -> Result<StoreSearcher> {
        Ok(StoreSearcher::new(self.schema.search.stores.clone())?)
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        ".foodsave.toml",
        "foodsave.toml",
        ".config/foodsave.toml",
    ];

    candidates
        .iter()
        .map(PathBuf::from)
        .chain(dirs::config_dir().map(|dir| dir.join("foodsave").join("config.toml")))
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::from(e).with_context(format!("Failed to read config file {}", path.display()))
    })?;

    let schema: ConfigSchema = toml::from_str(&content).map_err(|e| {
        Error::from(e).with_context(format!("Failed to parse config file {}", path.display()))
    })?;

    validate(&schema)?;
    Ok(schema)
}

fn validate(schema: &ConfigSchema) -> Result<()> {
    if schema.browse.page_size == 0 {
        return Err(Error::new(
            ErrorCode::InvalidConfigValue,
            "browse.page_size must be at least 1",
        ));
    }
    if schema.suggestions.popular_limit == 0 || schema.suggestions.recent_limit == 0 {
        return Err(Error::new(
            ErrorCode::InvalidConfigValue,
            "suggestions.popular_limit and suggestions.recent_limit must be at least 1",
        ));
    }
    if schema.verification.ttl_secs == 0 || schema.verification.max_attempts == 0 {
        return Err(Error::new(
            ErrorCode::InvalidConfigValue,
            "verification.ttl_secs and verification.max_attempts must be positive",
        ));
    }
    Ok(())
}
