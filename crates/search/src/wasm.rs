//! WASM bindings for browser usage.
//!
//! Every export takes and returns JSON strings. Malformed input never
//! throws into JavaScript: an unparsable product array or invalid
//! parameters yield `{"error": "..."}`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::model::Product;
use crate::sort::BrowseQuery;

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

fn error_json(error: &crate::SearchError) -> String {
    serde_json::json!({ "error": error.to_string() }).to_string()
}

fn parse_products(products_json: &str) -> crate::Result<Vec<Product>> {
    Ok(serde_json::from_str(products_json)?)
}

/// Search a JSON product array. A blank query returns every product.
#[wasm_bindgen]
pub fn search_products(products_json: &str, query: &str) -> String {
    match parse_products(products_json) {
        Ok(products) => to_json(&crate::search_products(&products, query)),
        Err(e) => error_json(&e),
    }
}

/// Search the distinct stores of a JSON product array.
#[wasm_bindgen]
pub fn search_stores(products_json: &str, query: &str) -> String {
    match parse_products(products_json) {
        Ok(products) => to_json(&crate::search_stores(&products, query)),
        Err(e) => error_json(&e),
    }
}

/// Run the browse pipeline.
///
/// # Arguments
/// * `products_json` - JSON array of products
/// * `query_json` - JSON object with `query`, `category`, `sort`, `filters`
#[wasm_bindgen]
pub fn browse(products_json: &str, query_json: &str) -> String {
    let products = match parse_products(products_json) {
        Ok(products) => products,
        Err(e) => return error_json(&e),
    };
    let query: BrowseQuery = match serde_json::from_str(query_json) {
        Ok(query) => query,
        Err(e) => return error_json(&e.into()),
    };

    match crate::browse(&products, &query) {
        Ok(results) => to_json(&results),
        Err(e) => error_json(&e),
    }
}

/// Calculate Levenshtein edit distance between two strings.
#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    crate::levenshtein_distance(a, b)
}
