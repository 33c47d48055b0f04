//! Store search over the stores embedded in a product collection.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matcher::{FuzzyMatcher, MatchOptions, WeightedKey};
use crate::model::{Product, Store};

static DEFAULT_STORE_MATCHER: Lazy<FuzzyMatcher> =
    Lazy::new(|| FuzzyMatcher::from_trusted(default_store_keys(), MatchOptions::default()));

/// Store fields searched by default: name 0.7, address 0.3.
pub fn default_store_keys() -> Vec<WeightedKey> {
    vec![WeightedKey::new("name", 0.7), WeightedKey::new("address", 0.3)]
}

/// Configurable field set and options for store search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSearchSettings {
    pub keys: Vec<WeightedKey>,
    pub options: MatchOptions,
}

impl Default for StoreSearchSettings {
    fn default() -> Self {
        Self {
            keys: default_store_keys(),
            options: MatchOptions::default(),
        }
    }
}

/// Distinct stores in product order, keeping the first copy of each id.
///
/// Later copies are dropped even when their fields differ.
pub fn unique_stores(products: &[Product]) -> Vec<Store> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|p| seen.insert(p.store.id.as_str()))
        .map(|p| p.store.clone())
        .collect()
}

/// Store search with a validated matcher.
#[derive(Debug, Clone)]
pub struct StoreSearcher {
    matcher: FuzzyMatcher,
}

impl Default for StoreSearcher {
    fn default() -> Self {
        Self {
            matcher: DEFAULT_STORE_MATCHER.clone(),
        }
    }
}

impl StoreSearcher {
    /// Creates a searcher from settings.
    ///
    /// # Errors
    /// `InvalidConfiguration` when the keys or options are malformed.
    pub fn new(settings: StoreSearchSettings) -> Result<Self> {
        Ok(Self {
            matcher: FuzzyMatcher::new(settings.keys, settings.options)?,
        })
    }

    /// Stores selling products in `products` that match `query`, best first.
    ///
    /// Unlike product search there is no "list everything" mode: a blank
    /// query returns no stores.
    pub fn search(&self, products: &[Product], query: &str) -> Vec<Store> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let stores = unique_stores(products);
        self.matcher.filter(&stores, query)
    }
}

/// Stores matching `query` with the default weights, best first.
pub fn search_stores(products: &[Product], query: &str) -> Vec<Store> {
    StoreSearcher::default().search(products, query)
}
