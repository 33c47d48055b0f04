//! Product and store records as supplied by the catalog.
//!
//! Field names follow the camelCase layout of the product collection
//! document, so a catalog can be deserialized directly with `serde_json`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Geographic position of a store.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

/// Opening hours as displayed ("09:00").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub open: String,
    pub close: String,
}

/// A partner store.
///
/// Products embed a full copy of their store, so two products may carry
/// diverging copies of the same store id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub coordinates: Coordinates,
    /// Customer rating, 0 to 5
    #[serde(default)]
    pub rating: f64,
    /// Distance from the searching user in kilometers
    #[serde(default)]
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<WorkingHours>,
    /// Food-waste reduction rating, 0 to 5
    #[serde(default)]
    pub eco_rating: f64,
    #[serde(default)]
    pub total_products_sold: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A discounted, near-expiry product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub original_price: f64,
    pub discounted_price: f64,
    /// Whole percent, 0 to 100
    pub discount_percentage: u8,
    #[serde(default)]
    pub image: String,
    pub category: String,
    /// Calendar date as supplied by the catalog; see [`Product::expiry`].
    pub expiry_date: String,
    pub store: Store,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Parses the expiry date.
    ///
    /// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp, in
    /// which case the UTC calendar date is used.
    pub fn expiry(&self) -> Result<NaiveDate> {
        parse_date(&self.expiry_date).ok_or_else(|| {
            SearchError::input(format!(
                "product {} has malformed expiry date {:?}",
                self.id, self.expiry_date
            ))
        })
    }
}

/// Parse a calendar date in either `YYYY-MM-DD` or RFC 3339 form.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

/// Resolves dotted field paths to searchable text.
///
/// Unknown paths resolve to `None` and simply never match.
pub trait Searchable {
    /// Text stored under `path`, if the record has such a field.
    fn field_text(&self, path: &str) -> Option<&str>;
}

impl Searchable for Store {
    fn field_text(&self, path: &str) -> Option<&str> {
        match path {
            "id" => Some(&self.id),
            "name" => Some(&self.name),
            "address" => Some(&self.address),
            _ => None,
        }
    }
}

impl Searchable for Product {
    fn field_text(&self, path: &str) -> Option<&str> {
        match path {
            "id" => Some(&self.id),
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            "category" => Some(&self.category),
            _ => path
                .strip_prefix("store.")
                .and_then(|rest| self.store.field_text(rest)),
        }
    }
}
