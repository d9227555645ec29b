use std::path::PathBuf;
use std::rc::Rc;

use catalog_categories::CatalogContext;
use catalog_core::CatalogError;
use catalog_loader::{LoadError, load_catalog, load_catalog_into, load_data_from_json};
use catalog_products::{NeverConfirm, PriceChange};
use catalog_sales::Order;
use serde_json::json;

/// A JSON file in the temp dir, removed on drop.
struct TempJson {
    path: PathBuf,
}

impl TempJson {
    fn write(contents: &str) -> Self {
        catalog_observability::init();
        let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::now_v7()));
        std::fs::write(&path, contents).expect("failed to write temp catalog");
        Self { path }
    }

    fn json(value: serde_json::Value) -> Self {
        Self::write(&value.to_string())
    }
}

impl Drop for TempJson {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn store_document() -> serde_json::Value {
    json!([
        {
            "name": "Smartphones",
            "description": "Phones for everyday use",
            "products": [
                {"name": "Galaxy S23 Ultra", "description": "256GB, gray", "price": 180000.0,
                 "quantity": 5, "efficiency": 95.5, "model": "S23 Ultra", "memory": 256, "color": "Gray"},
                {"name": "Iphone 15", "description": "512GB, gray space", "price": 210000.0,
                 "quantity": 8, "efficiency": 98.2, "model": "15", "memory": 512, "color": "Gray space"},
                {"name": "Charger", "description": "65W", "price": 3000.0, "quantity": 10}
            ]
        },
        {
            "name": "Garden",
            "description": "Everything for the lawn",
            "products": [
                {"name": "Premium grass", "description": "Dense", "price": 500.0, "quantity": 20,
                 "country": "Russia", "germination_period": "7 days", "color": "Green"},
                {"name": "Charger", "description": "65W", "price": 3500.0, "quantity": 2}
            ]
        }
    ])
}

#[test]
fn loads_document_from_disk() {
    let file = TempJson::json(store_document());
    let catalog = load_catalog(&file.path).unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.context().total_categories(), 2);
    assert_eq!(catalog.context().total_unique_products(), 5);
    assert_eq!(catalog.unique_products().len(), 4);

    let charger = catalog.find_product("Charger").unwrap();
    assert_eq!(charger.borrow().quantity(), 12);
    assert_eq!(charger.borrow().price(), 3500.0);

    let smartphones = catalog.category("Smartphones").unwrap();
    let names: Vec<String> = smartphones
        .iter()
        .map(|p| p.borrow().name().to_string())
        .collect();
    assert_eq!(names, vec!["Galaxy S23 Ultra", "Iphone 15", "Charger"]);
}

#[test]
fn missing_file_yields_empty_catalog() {
    let path = std::env::temp_dir().join("catalog-does-not-exist.json");
    let catalog = load_data_from_json(&path);
    assert!(catalog.is_empty());
    assert_eq!(catalog.context().total_categories(), 0);

    match load_catalog(&path).unwrap_err() {
        LoadError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn invalid_json_yields_empty_catalog() {
    let file = TempJson::write("invalid json");
    assert!(load_data_from_json(&file.path).is_empty());
    assert!(matches!(load_catalog(&file.path), Err(LoadError::Json(_))));
}

#[test]
fn invalid_product_yields_empty_catalog() {
    let file = TempJson::json(json!([
        {"name": "Broken", "description": "", "products": [
            {"name": "Nothing left", "description": "", "price": 10.0, "quantity": -1}
        ]}
    ]));
    assert!(load_data_from_json(&file.path).is_empty());
}

#[test]
fn overflowing_stock_yields_empty_catalog() {
    let file = TempJson::json(json!([
        {"name": "A", "description": "", "products": [
            {"name": "X", "description": "", "price": 1.0, "quantity": i64::MAX},
            {"name": "X", "description": "", "price": 1.0, "quantity": 1}
        ]}
    ]));
    assert!(load_data_from_json(&file.path).is_empty());

    match load_catalog(&file.path).unwrap_err() {
        LoadError::InvalidProduct { source, .. } => {
            assert_eq!(source, CatalogError::quantity_overflow(i64::MAX, 1));
        }
        other => panic!("Expected InvalidProduct error, got {other:?}"),
    }
}

#[test]
fn orders_reduce_stock_seen_by_every_category() {
    let file = TempJson::json(store_document());
    let catalog = load_catalog(&file.path).unwrap();

    let charger = catalog.find_product("Charger").unwrap();
    let order = Order::place(&charger, 4).unwrap();
    assert_eq!(order.total_price(), 4.0 * 3500.0);

    for category in &catalog {
        let listed = category.find("Charger").unwrap();
        assert!(Rc::ptr_eq(listed, &charger));
        assert_eq!(listed.borrow().quantity(), 8);
    }

    let err = Order::place(&charger, 9).unwrap_err();
    assert_eq!(err, CatalogError::insufficient_stock(9, 8));
}

#[test]
fn price_cut_without_confirmation_is_kept_out() {
    let file = TempJson::json(store_document());
    let catalog = load_catalog(&file.path).unwrap();
    let grass = catalog.find_product("Premium grass").unwrap();

    let change = grass.borrow_mut().set_price(100.0, &NeverConfirm);
    assert_eq!(change, PriceChange::Declined { requested: 100.0 });
    assert_eq!(grass.borrow().price(), 500.0);
}

#[test]
fn shared_context_accumulates_until_reset() {
    let file = TempJson::json(store_document());
    let context = CatalogContext::new();

    load_catalog_into(&file.path, &context).unwrap();
    load_catalog_into(&file.path, &context).unwrap();
    assert_eq!(context.total_categories(), 4);
    assert_eq!(context.total_unique_products(), 10);

    context.reset();
    assert_eq!(context.total_categories(), 0);
    assert_eq!(context.total_unique_products(), 0);
}

#[test]
fn catalog_display_lines() {
    let file = TempJson::json(store_document());
    let catalog = load_catalog(&file.path).unwrap();
    let garden = catalog.category("Garden").unwrap();

    assert_eq!(garden.to_string(), "Garden, product count: 32 pcs.");
    assert_eq!(
        garden.products(),
        "Premium grass, 500.0 rub. Remaining: 20 pcs. (Country: Russia, Germination period: 7 days)\n\
         Charger, 3500.0 rub. Remaining: 12 pcs."
    );
    assert!(catalog.total_stock_value() > 0.0);
}
