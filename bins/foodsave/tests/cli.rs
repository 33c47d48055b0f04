//! End-to-end tests for the foodsave binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const CATALOG: &str = r#"[
    {
        "id": "1", "name": "Сливочный плавленый сыр", "originalPrice": 32000,
        "discountedPrice": 24000, "discountPercentage": 25, "category": "dairy",
        "expiryDate": "2024-01-15", "isUrgent": true,
        "store": { "id": "1", "name": "Korzinka.uz - Чиланзар", "address": "Чиланзар, 9 квартал",
                   "distance": 0.8, "rating": 4.5 }
    },
    {
        "id": "2", "name": "Молоко Nestle 3.2%", "originalPrice": 12000,
        "discountedPrice": 8000, "discountPercentage": 33, "category": "dairy",
        "expiryDate": "2024-01-14",
        "store": { "id": "1", "name": "Korzinka.uz - Чиланзар", "address": "Чиланзар, 9 квартал",
                   "distance": 0.8, "rating": 4.5 }
    },
    {
        "id": "3", "name": "Кофе Nescafe Gold", "originalPrice": 35000,
        "discountedPrice": 21000, "discountPercentage": 40, "category": "grocery",
        "expiryDate": "2024-02-10",
        "store": { "id": "3", "name": "Carrefour - Мирабад", "address": "ул. Мирабадская, 25",
                   "distance": 2.1, "rating": 4.7 }
    }
]"#;

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn foodsave(catalog: &NamedTempFile, config: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("foodsave").unwrap();
    cmd.arg("--catalog")
        .arg(catalog.path())
        .arg("--config")
        .arg(config.path())
        .env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.arg("--json").output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn products_tolerates_typos() {
    let (catalog, config) = (temp_file(CATALOG), temp_file(""));
    let found = json_stdout(foodsave(&catalog, &config).args(["products", "малако"]));

    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], "2");
}

#[test]
fn products_with_category_and_price() {
    let (catalog, config) = (temp_file(CATALOG), temp_file(""));
    let found = json_stdout(foodsave(&catalog, &config).args([
        "products",
        "",
        "--category",
        "dairy",
        "--max-price",
        "10000",
    ]));

    let ids: Vec<&str> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["2"]);
}

#[test]
fn stores_are_distinct() {
    let (catalog, config) = (temp_file(CATALOG), temp_file(""));
    let found = json_stdout(foodsave(&catalog, &config).args(["stores", "korzinka"]));

    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], "1");
}

#[test]
fn browse_sorts_and_paginates() {
    let (catalog, config) = (temp_file(CATALOG), temp_file("[browse]\npage_size = 2\n"));
    let page = json_stdout(foodsave(&catalog, &config).args(["browse", "--sort", "discount"]));

    assert_eq!(page["pagination"]["total"], 3);
    assert_eq!(page["pagination"]["totalPages"], 2);
    assert_eq!(page["data"][0]["id"], "3");
    assert_eq!(page["data"][1]["id"], "2");
}

#[test]
fn browse_applies_filters() {
    let (catalog, config) = (temp_file(CATALOG), temp_file(""));
    let page = json_stdout(foodsave(&catalog, &config).args([
        "browse",
        "--filters",
        r#"{"isUrgent": true}"#,
    ]));

    assert_eq!(page["pagination"]["total"], 1);
    assert_eq!(page["data"][0]["id"], "1");
}

#[test]
fn suggest_uses_configured_lists() {
    let (catalog, config) = (
        temp_file(CATALOG),
        temp_file("[suggestions]\npopular = [\"кефир\", \"сыр\"]\nrecent = []\n"),
    );
    let lists = json_stdout(foodsave(&catalog, &config).args(["suggest", "сыр"]));

    assert_eq!(lists["popular"], serde_json::json!(["сыр"]));
    assert_eq!(lists["recent"], serde_json::json!([]));
}

#[test]
fn missing_catalog_fails() {
    let config = temp_file("");
    Command::cargo_bin("foodsave")
        .unwrap()
        .args(["--catalog", "/nonexistent/products.json", "--config"])
        .arg(config.path())
        .args(["products", "сыр"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn invalid_price_bound_is_a_validation_error() {
    let (catalog, config) = (temp_file(CATALOG), temp_file(""));
    foodsave(&catalog, &config)
        .args(["products", "сыр", "--min-price", "NaN"])
        .assert()
        .code(2);
}

#[test]
fn malformed_config_fails_with_config_exit_code() {
    let (catalog, config) = (temp_file(CATALOG), temp_file("[browse\n"));
    foodsave(&catalog, &config)
        .args(["products", "сыр"])
        .assert()
        .code(3);
}
