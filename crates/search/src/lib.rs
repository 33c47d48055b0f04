//! Typo-tolerant product and store search for FoodSave.
//!
//! This crate provides:
//! - A weighted multi-field fuzzy matcher
//! - Product search with category and price narrowing
//! - Store search over the stores embedded in products
//! - Range filters, sorting and pagination for the browse view
//! - Search-box suggestions
//! - WASM bindings for browser usage
//!
//! Every operation is a pure function of its inputs: collections are
//! borrowed for the call and results are new vectors.
//!
//! # Example
//!
//! ```
//! use foodsave_search::{search_products, Product};
//!
//! let products: Vec<Product> = serde_json::from_str(r#"[{
//!     "id": "2", "name": "Молоко Nestle 3.2%", "originalPrice": 12000,
//!     "discountedPrice": 8000, "discountPercentage": 33, "category": "dairy",
//!     "expiryDate": "2024-01-14",
//!     "store": { "id": "1", "name": "Korzinka", "address": "Чиланзар" }
//! }]"#).unwrap();
//!
//! // Misspelled query still finds the milk.
//! let results = search_products(&products, "малако");
//! assert_eq!(results.len(), 1);
//! ```

mod error;
pub mod filters;
mod fuzzy;
pub mod matcher;
pub mod model;
mod products;
pub mod sort;
mod stores;
mod suggest;

#[cfg(test)]
mod test_support;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{Result, SearchError, SearchErrorCode};
pub use filters::{apply_filters, ProductFilters, Range};
pub use fuzzy::{fuzzy_match, has_alphabet_run, levenshtein_distance, substring_edit_costs};
pub use matcher::{FuzzyMatcher, MatchOptions, WeightedKey};
pub use model::{Coordinates, Product, Searchable, Store, WorkingHours};
pub use products::{
    default_product_keys, search_products, search_products_advanced, ProductSearchSettings,
    ProductSearcher, ALL_CATEGORIES,
};
pub use sort::{browse, browse_with, paginate, sort_products, BrowseQuery, Page, Pagination, SortKey};
pub use stores::{default_store_keys, search_stores, unique_stores, StoreSearchSettings, StoreSearcher};
pub use suggest::{calculate_relevance, RelevanceScore, SuggestionList, Suggestions};

/// Search result with relevance score.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchResult<T> {
    /// The matched item
    pub item: T,
    /// Position of the item in the searched collection
    pub index: usize,
    /// Match score, 0.0 is perfect (lower is better)
    pub score: f64,
}
