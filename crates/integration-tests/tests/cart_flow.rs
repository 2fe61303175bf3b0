//! End-to-end cart flows over file-backed storage.
//!
//! These tests exercise the same path the CLI takes: a catalog, a
//! `CartStore` over `FileStorage` in a temp directory, and the
//! `CartService` on top.

use apteka_core::ProductId;
use apteka_integration_tests::sample_catalog;
use apteka_storefront::cart::CartStore;
use apteka_storefront::services::{CartError, CartService};
use apteka_storefront::storage::{FileStorage, MemoryStorage, Storage, keys};
use apteka_storefront::views::CartView;
use rust_decimal::Decimal;

const YES: fn(&str) -> bool = |_| true;

fn id(n: i32) -> ProductId {
    ProductId::new(n)
}

#[test]
fn cart_survives_process_restart() {
    let catalog = sample_catalog();
    let dir = tempfile::tempdir().expect("tempdir");

    // First session: add items
    {
        let mut store = CartStore::open(FileStorage::new(dir.path()));
        let mut service = CartService::new(&catalog, &mut store);
        service.add_item(id(7), 2, &YES).expect("add 7");
        service.add_item(id(10), 1, &YES).expect("add 10");
    }

    // Second session: same state, same order
    let store = CartStore::open(FileStorage::new(dir.path()));
    let ids: Vec<ProductId> = store.items().iter().map(|l| l.product_id).collect();
    assert_eq!(ids, [id(7), id(10)]);
    assert_eq!(store.quantity_of(id(7)), 2);
    assert_eq!(store.total_item_count(), 3);
}

#[test]
fn corrupt_cart_file_degrades_to_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("cart.json"), "definitely not json").expect("write");

    let store = CartStore::open(FileStorage::new(dir.path()));
    assert!(store.is_empty());
}

#[test]
fn add_quantities_accumulate_per_product() {
    let catalog = sample_catalog();
    let mut store = CartStore::open(MemoryStorage::new());
    let mut service = CartService::new(&catalog, &mut store);

    for quantity in [1, 2, 3] {
        service.add_item(id(7), quantity, &YES).expect("add");
    }

    assert_eq!(store.len(), 1);
    assert_eq!(store.quantity_of(id(7)), 6);
}

#[test]
fn failed_adds_leave_cart_unchanged() {
    let catalog = sample_catalog();
    let mut store = CartStore::open(MemoryStorage::new());
    let mut service = CartService::new(&catalog, &mut store);

    service.add_item(id(7), 1, &YES).expect("add");

    // Unknown product
    assert_eq!(
        service.add_item(id(99), 1, &YES),
        Err(CartError::ProductNotFound(id(99)))
    );
    // Out of stock
    assert!(matches!(
        service.add_item(id(9), 1, &YES),
        Err(CartError::OutOfStock(_))
    ));
    // Prescription declined
    assert_eq!(
        service.add_item(id(11), 1, &|_: &str| false),
        Err(CartError::PrescriptionDeclined)
    );

    assert_eq!(store.len(), 1);
    assert_eq!(store.total_item_count(), 1);
}

#[test]
fn update_to_zero_matches_remove() {
    let catalog = sample_catalog();

    let mut via_remove = CartStore::open(MemoryStorage::new());
    let mut service = CartService::new(&catalog, &mut via_remove);
    service.add_item(id(7), 2, &YES).expect("add");
    service.add_item(id(10), 1, &YES).expect("add");
    service.remove_item(id(7));

    let mut via_zero = CartStore::open(MemoryStorage::new());
    let mut service = CartService::new(&catalog, &mut via_zero);
    service.add_item(id(7), 2, &YES).expect("add");
    service.add_item(id(10), 1, &YES).expect("add");
    service.update_quantity(id(7), 0).expect("set 0");

    assert_eq!(via_remove.items(), via_zero.items());
}

#[test]
fn remove_twice_equals_remove_once() {
    let catalog = sample_catalog();
    let mut store = CartStore::open(MemoryStorage::new());
    let mut service = CartService::new(&catalog, &mut store);

    service.add_item(id(7), 1, &YES).expect("add");
    service.remove_item(id(7));
    let after_once: Vec<_> = store.items().to_vec();

    let mut service = CartService::new(&catalog, &mut store);
    service.remove_item(id(7));
    assert_eq!(store.items(), after_once.as_slice());
}

#[test]
fn totals_reflect_quantity_times_unit_price() {
    // Product 7 costs 150 and is in stock
    let catalog = sample_catalog();
    let mut store = CartStore::open(MemoryStorage::new());
    let mut service = CartService::new(&catalog, &mut store);

    service.add_item(id(7), 2, &YES).expect("add");

    assert_eq!(service.total_item_count(), 2);
    assert_eq!(service.total_price().amount, Decimal::from(300));
    assert_eq!(store.len(), 1);
    assert_eq!(store.quantity_of(id(7)), 2);
}

#[test]
fn clear_erases_the_persisted_record() {
    let catalog = sample_catalog();
    let dir = tempfile::tempdir().expect("tempdir");

    let mut store = CartStore::open(FileStorage::new(dir.path()));
    let mut service = CartService::new(&catalog, &mut store);
    service.add_item(id(7), 2, &YES).expect("add");
    assert!(dir.path().join("cart.json").exists());

    assert!(service.clear(&YES));
    assert!(!dir.path().join("cart.json").exists());
    assert!(service.total_price().is_zero());
}

#[test]
fn view_skips_products_retired_from_catalog() {
    let catalog = sample_catalog();
    let dir = tempfile::tempdir().expect("tempdir");

    let mut store = CartStore::open(FileStorage::new(dir.path()));
    let mut service = CartService::new(&catalog, &mut store);
    service.add_item(id(7), 1, &YES).expect("add");
    service.add_item(id(10), 2, &YES).expect("add");

    // Reopen against a catalog that no longer carries product 7
    let trimmed = apteka_storefront::catalog::Catalog::from_products(vec![
        apteka_integration_tests::product(10, "Vitamin C", 95, true, false, "vitamins"),
    ]);
    let store = CartStore::open(FileStorage::new(dir.path()));
    let view = CartView::build(&trimmed, &store);

    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].name, "Vitamin C");
    assert_eq!(view.subtotal, "190 ₽");
    // The stale line still counts items; it only prices at zero
    assert_eq!(view.item_count, 3);
}

#[test]
fn storage_records_are_isolated_per_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut storage = FileStorage::new(dir.path());

    storage.set(keys::CART, "[]").expect("set cart");
    storage.set(keys::ORDERS, "[]").expect("set orders");
    storage.remove(keys::CART).expect("remove cart");

    assert_eq!(storage.get(keys::CART).expect("get"), None);
    assert_eq!(storage.get(keys::ORDERS).expect("get").as_deref(), Some("[]"));
}
