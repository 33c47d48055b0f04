//! Browse pipeline: search, category, filters, then a final ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SearchError};
use crate::filters::ProductFilters;
use crate::model::Product;
use crate::products::{category_constraint, ProductSearcher};

/// Final ordering of browse results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Nearest store first
    #[default]
    Distance,
    /// Largest discount first
    Discount,
    /// Soonest expiry first
    Expiry,
    /// Best rated store first
    Rating,
}

impl SortKey {
    /// All sort keys, in display order.
    pub const ALL: [SortKey; 4] = [
        SortKey::Distance,
        SortKey::Discount,
        SortKey::Expiry,
        SortKey::Rating,
    ];

    /// Lowercase name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Distance => "distance",
            SortKey::Discount => "discount",
            SortKey::Expiry => "expiry",
            SortKey::Rating => "rating",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| SearchError::input(format!("unknown sort key {s:?}")))
    }
}

/// Sorts `products` by `key`. Ties keep their current relative order.
///
/// # Errors
/// `InvalidInput` when sorting by expiry and any product carries a malformed
/// expiry date. Dates are parsed before anything is reordered.
pub fn sort_products(products: &mut [Product], key: SortKey) -> Result<()> {
    if key == SortKey::Expiry {
        let dates = products
            .iter()
            .map(Product::expiry)
            .collect::<Result<Vec<_>>>()?;
        let mut keyed: Vec<_> = dates.into_iter().zip(products.iter().cloned()).collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        for (slot, (_, product)) in products.iter_mut().zip(keyed) {
            *slot = product;
        }
    } else {
        products.sort_by(|a, b| compare_by(key, a, b));
    }
    Ok(())
}

/// What a user is looking at: free text, category, optional filters and ordering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowseQuery {
    pub query: String,
    /// Category id; `None` or `"all"` means every category
    pub category: Option<String>,
    #[serde(alias = "sortBy")]
    pub sort: SortKey,
    pub filters: Option<ProductFilters>,
}

impl BrowseQuery {
    /// Query for `text` with no other constraints.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            query: text.into(),
            ..Self::default()
        }
    }

    /// Restricts the query to a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the final ordering.
    #[must_use]
    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Adds narrowing filters.
    #[must_use]
    pub fn with_filters(mut self, filters: ProductFilters) -> Self {
        self.filters = Some(filters);
        self
    }
}

/// Runs the full browse pipeline with the default product searcher.
///
/// # Errors
/// See [`browse_with`].
pub fn browse(products: &[Product], query: &BrowseQuery) -> Result<Vec<Product>> {
    browse_with(&ProductSearcher::default(), products, query)
}

/// Fuzzy search, category selection, optional filters, then the sort key.
///
/// # Errors
/// `InvalidInput` for malformed filters, or for malformed expiry dates when
/// sorting by expiry. Both are checked before any scoring work.
pub fn browse_with(
    searcher: &ProductSearcher,
    products: &[Product],
    query: &BrowseQuery,
) -> Result<Vec<Product>> {
    let expires_before = match &query.filters {
        Some(filters) => filters.validate()?,
        None => None,
    };
    if query.sort == SortKey::Expiry {
        for product in products {
            product.expiry()?;
        }
    }

    let mut results = searcher.search(products, &query.query);

    if let Some(category) = category_constraint(query.category.as_deref()) {
        results.retain(|p| p.category == category);
    }
    if let Some(filters) = &query.filters {
        results.retain(|p| filters.matches(p, expires_before));
    }

    sort_products(&mut results, query.sort)?;

    debug!(
        candidates = products.len(),
        results = results.len(),
        sort = %query.sort,
        "browse pipeline completed"
    );

    Ok(results)
}

/// Pagination details of a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Slices `items` into the 1-based `page` of size `limit`.
///
/// Page 0 is treated as page 1; a page past the end is empty.
///
/// # Errors
/// `InvalidInput` when `limit` is 0.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> Result<Page<T>> {
    if limit == 0 {
        return Err(SearchError::input("page limit must be at least 1"));
    }

    let page = page.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(limit).min(total);
    let end = start.saturating_add(limit).min(total);

    Ok(Page {
        data: items[start..end].to_vec(),
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        },
    })
}

/// Compares two products the way `key` orders them.
///
/// Unparseable expiry dates compare equal; [`sort_products`] rejects them instead.
pub fn compare_by(key: SortKey, a: &Product, b: &Product) -> Ordering {
    match key {
        SortKey::Distance => a.store.distance.total_cmp(&b.store.distance),
        SortKey::Discount => b.discount_percentage.cmp(&a.discount_percentage),
        SortKey::Rating => b.store.rating.total_cmp(&a.store.rating),
        SortKey::Expiry => match (a.expiry(), b.expiry()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => Ordering::Equal,
        },
    }
}
