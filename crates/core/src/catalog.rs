//! Product catalog loading
//!
//! The catalog document is a JSON array of products, each embedding a
//! copy of its store.

use crate::error::{Error, ErrorCode, Result, ResultExt};
use foodsave_search::Product;
use std::path::Path;

/// Parse a catalog document.
pub fn parse_products(json: &str) -> Result<Vec<Product>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(Error::new(
            ErrorCode::CatalogParseError,
            "Catalog must be a JSON array of products",
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// Read and parse a catalog file.
pub fn load_products(path: impl AsRef<Path>) -> Result<Vec<Product>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    let content = std::fs::read_to_string(path)
        .context(format!("Reading catalog {}", path.display()))?;
    let products = parse_products(&content)
        .context(format!("Parsing catalog {}", path.display()))?;

    tracing::debug!(path = %path.display(), count = products.len(), "catalog loaded");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = r#"[
        {
            "id": "1",
            "name": "Сливочный плавленый сыр",
            "originalPrice": 32000,
            "discountedPrice": 24000,
            "discountPercentage": 25,
            "category": "dairy",
            "expiryDate": "2024-01-15",
            "isUrgent": true,
            "store": {
                "id": "1",
                "name": "Korzinka.uz - Чиланзар",
                "address": "Чиланзар, 9 квартал",
                "distance": 0.8,
                "rating": 4.5
            }
        }
    ]"#;

    #[test]
    fn test_parse_products() {
        let products = parse_products(CATALOG).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].store.name, "Korzinka.uz - Чиланзар");
        assert!(products[0].is_urgent);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_products(r#"{"id": "1"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogParseError);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_products("[{").unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogParseError);
    }

    #[test]
    fn test_load_products_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let products = load_products(file.path()).unwrap();
        assert_eq!(products[0].id, "1");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_products("/nonexistent/products.json").unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_load_adds_context() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let err = load_products(file.path()).unwrap_err();
        assert!(err.context.unwrap().starts_with("Parsing catalog"));
    }
}
