//! Fixture builders shared by unit tests.

use crate::model::{Coordinates, Product, Store};

pub(crate) fn store(id: &str, name: &str) -> Store {
    Store {
        id: id.to_string(),
        name: name.to_string(),
        address: String::new(),
        coordinates: Coordinates::default(),
        rating: 4.0,
        distance: 1.0,
        phone: None,
        email: None,
        website: None,
        working_hours: None,
        eco_rating: 4.0,
        total_products_sold: 0,
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn product(id: &str, name: &str, category: &str, price: f64, store: Store) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        original_price: price * 1.5,
        discounted_price: price,
        discount_percentage: 33,
        image: String::new(),
        category: category.to_string(),
        expiry_date: "2024-01-15".to_string(),
        store,
        description: String::new(),
        is_urgent: false,
        quantity: None,
        unit: None,
        tags: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}

fn chilanzar() -> Store {
    Store {
        address: "ул. Чиланзарская, 15".to_string(),
        coordinates: Coordinates { lat: 41.2995, lng: 69.2401 },
        rating: 4.5,
        distance: 0.8,
        eco_rating: 4.2,
        total_products_sold: 1250,
        ..store("1", "Korzinka.uz - Чиланзар")
    }
}

fn mirabad() -> Store {
    Store {
        address: "ул. Мирабадская, 25".to_string(),
        coordinates: Coordinates { lat: 41.3111, lng: 69.2797 },
        rating: 4.7,
        distance: 2.1,
        eco_rating: 4.5,
        total_products_sold: 2100,
        ..store("3", "Carrefour - Мирабад")
    }
}

/// Three products across two stores: cheese, milk and coffee.
pub(crate) fn catalog() -> Vec<Product> {
    vec![
        Product {
            original_price: 36000.0,
            discount_percentage: 33,
            expiry_date: "2024-01-15".to_string(),
            is_urgent: true,
            description: "Сливочный сыр высокого качества, отличный для завтрака и перекусов."
                .to_string(),
            ..product("1", "Сливочный плавленый сыр \"President\"", "dairy", 24000.0, chilanzar())
        },
        Product {
            original_price: 12000.0,
            discount_percentage: 33,
            expiry_date: "2024-01-14".to_string(),
            description: "Свежее пастеризованное молоко высшего качества.".to_string(),
            ..product("2", "Молоко \"Nestle\" 3.2%", "dairy", 8000.0, chilanzar())
        },
        Product {
            original_price: 35000.0,
            discount_percentage: 40,
            expiry_date: "2024-02-10".to_string(),
            description: "Ароматный растворимый кофе для бодрого утра и приятных встреч."
                .to_string(),
            ..product("3", "Кофе растворимый \"Nescafe Gold\"", "grocery", 21000.0, mirabad())
        },
    ]
}
