//! Range, rating and urgency filters.
//!
//! A [`ProductFilters`] value is a plain conjunction of per-field checks. It
//! never reorders its input, so it can be applied before or after a
//! relevance search without disturbing the ranking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::model::{parse_date, Product};

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Range containing every finite value.
    pub const ANY: Range = Range {
        min: f64::MIN,
        max: f64::MAX,
    };

    /// Creates a new range.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies within the range.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.min.is_nan() || self.max.is_nan() {
            return Err(SearchError::input(format!("{name} bounds must be numbers")));
        }
        Ok(())
    }
}

/// Narrowing filters applied on top of a search.
///
/// A field left out of a deserialized filter object places no constraint
/// on its dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductFilters {
    /// Allowed categories; empty means any
    pub categories: Vec<String>,
    /// Discounted price range
    pub price_range: Range,
    /// Discount percentage range
    pub discount_range: Range,
    /// Maximum store distance in kilometers
    #[serde(alias = "distance")]
    pub max_distance: f64,
    /// Keep products expiring on or before this date (`YYYY-MM-DD`)
    #[serde(alias = "expiryDate")]
    pub expires_before: Option<String>,
    /// Keep only urgent products
    #[serde(alias = "isUrgent")]
    pub urgent_only: bool,
    /// Minimum store rating
    #[serde(alias = "rating")]
    pub min_rating: f64,
}

impl Default for ProductFilters {
    fn default() -> Self {
        Self::unrestricted()
    }
}

impl ProductFilters {
    /// Filters that accept every product.
    pub fn unrestricted() -> Self {
        Self {
            categories: Vec::new(),
            price_range: Range::ANY,
            discount_range: Range::ANY,
            max_distance: f64::MAX,
            expires_before: None,
            urgent_only: false,
            min_rating: 0.0,
        }
    }

    /// Starting state of the filter panel: up to 100 000 sum, any
    /// discount, within 10 km.
    pub fn filter_panel() -> Self {
        Self {
            price_range: Range::new(0.0, 100_000.0),
            discount_range: Range::new(0.0, 100.0),
            max_distance: 10.0,
            ..Self::unrestricted()
        }
    }

    /// Checks the filters and resolves the expiry bound.
    ///
    /// # Errors
    /// `InvalidInput` for NaN bounds or a malformed expiry date.
    pub fn validate(&self) -> Result<Option<NaiveDate>> {
        self.price_range.validate("price range")?;
        self.discount_range.validate("discount range")?;
        if self.max_distance.is_nan() {
            return Err(SearchError::input("maximum distance must be a number"));
        }
        if self.min_rating.is_nan() {
            return Err(SearchError::input("minimum rating must be a number"));
        }

        self.expires_before
            .as_deref()
            .map(|value| {
                parse_date(value).ok_or_else(|| {
                    SearchError::input(format!("malformed expiry date bound {value:?}"))
                })
            })
            .transpose()
    }

    /// Returns true if `product` passes every check.
    ///
    /// `expires_before` is the resolved bound from [`ProductFilters::validate`].
    /// A product whose own expiry date cannot be parsed fails an expiry bound.
    pub fn matches(&self, product: &Product, expires_before: Option<NaiveDate>) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }
        if !self.price_range.contains(product.discounted_price) {
            return false;
        }
        if !self.discount_range.contains(f64::from(product.discount_percentage)) {
            return false;
        }
        if product.store.distance > self.max_distance {
            return false;
        }
        if product.store.rating < self.min_rating {
            return false;
        }
        if self.urgent_only && !product.is_urgent {
            return false;
        }
        if let Some(bound) = expires_before {
            match product.expiry() {
                Ok(date) if date <= bound => {}
                _ => return false,
            }
        }
        true
    }
}

/// Products passing `filters`, in input order.
///
/// # Errors
/// `InvalidInput` when the filters themselves are malformed.
pub fn apply_filters(products: &[Product], filters: &ProductFilters) -> Result<Vec<Product>> {
    let expires_before = filters.validate()?;
    Ok(products
        .iter()
        .filter(|p| filters.matches(p, expires_before))
        .cloned()
        .collect())
}
