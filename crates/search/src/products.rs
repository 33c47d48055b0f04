//! Product search.
//!
//! Field weights reflect relevance priority: a hit in the product name
//! matters far more than a hit in the name of the store selling it.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::matcher::{FuzzyMatcher, MatchOptions, WeightedKey};
use crate::model::Product;
use crate::SearchResult;

/// Category value meaning "no category constraint".
pub const ALL_CATEGORIES: &str = "all";

/// The category to filter on, if `category` constrains anything.
///
/// Absent, empty and [`ALL_CATEGORIES`] all mean every category.
pub(crate) fn category_constraint(category: Option<&str>) -> Option<&str> {
    category.filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
}

static DEFAULT_PRODUCT_MATCHER: Lazy<FuzzyMatcher> =
    Lazy::new(|| FuzzyMatcher::from_trusted(default_product_keys(), MatchOptions::default()));

/// Product fields searched by default: name 0.6, description 0.3, store name 0.1.
pub fn default_product_keys() -> Vec<WeightedKey> {
    vec![
        WeightedKey::new("name", 0.6),
        WeightedKey::new("description", 0.3),
        WeightedKey::new("store.name", 0.1),
    ]
}

/// Configurable field set and options for product search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSearchSettings {
    pub keys: Vec<WeightedKey>,
    pub options: MatchOptions,
}

impl Default for ProductSearchSettings {
    fn default() -> Self {
        Self {
            keys: default_product_keys(),
            options: MatchOptions::default(),
        }
    }
}

/// Product search with a validated matcher.
#[derive(Debug, Clone)]
pub struct ProductSearcher {
    matcher: FuzzyMatcher,
}

impl Default for ProductSearcher {
    fn default() -> Self {
        Self {
            matcher: DEFAULT_PRODUCT_MATCHER.clone(),
        }
    }
}

impl ProductSearcher {
    /// Creates a searcher from settings.
    ///
    /// # Errors
    /// `InvalidConfiguration` when the keys or options are malformed.
    pub fn new(settings: ProductSearchSettings) -> Result<Self> {
        Ok(Self {
            matcher: FuzzyMatcher::new(settings.keys, settings.options)?,
        })
    }

    /// Products matching `query` with their scores, best first.
    pub fn search_scored<'a>(&self, products: &'a [Product], query: &str) -> Vec<SearchResult<&'a Product>> {
        self.matcher.search(products, query)
    }

    /// Products matching `query`, best first. A blank query returns every product.
    pub fn search(&self, products: &[Product], query: &str) -> Vec<Product> {
        self.matcher.filter(products, query)
    }

    /// Fuzzy search narrowed by category and discounted price bounds.
    ///
    /// A category of `None` or `"all"` and absent bounds leave that dimension
    /// unconstrained. Filtering keeps the relevance order.
    ///
    /// # Errors
    /// `InvalidInput` when a price bound is NaN or infinite. Bounds are
    /// checked before any scoring happens.
    pub fn search_advanced(
        &self,
        products: &[Product],
        query: &str,
        category: Option<&str>,
        min_price: Option<f64>,
        max_price: Option<f64>,
    ) -> Result<Vec<Product>> {
        check_bound("minPrice", min_price)?;
        check_bound("maxPrice", max_price)?;

        let mut filtered = self.search(products, query);

        if let Some(category) = category_constraint(category) {
            filtered.retain(|p| p.category == category);
        }
        if let Some(min) = min_price {
            filtered.retain(|p| p.discounted_price >= min);
        }
        if let Some(max) = max_price {
            filtered.retain(|p| p.discounted_price <= max);
        }

        Ok(filtered)
    }
}

fn check_bound(name: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(SearchError::input(format!(
            "{name} must be a finite number, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// Products matching `query` with the default weights, best first.
///
/// A blank query returns `products` unchanged.
pub fn search_products(products: &[Product], query: &str) -> Vec<Product> {
    DEFAULT_PRODUCT_MATCHER.filter(products, query)
}

/// [`search_products`] narrowed by category and discounted price bounds.
///
/// # Errors
/// `InvalidInput` when a price bound is NaN or infinite.
pub fn search_products_advanced(
    products: &[Product],
    query: &str,
    category: Option<&str>,
    min_price: Option<f64>,
    max_price: Option<f64>,
) -> Result<Vec<Product>> {
    ProductSearcher::default().search_advanced(products, query, category, min_price, max_price)
}
