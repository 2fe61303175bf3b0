//! Catalog browsing commands.

use apteka_core::ProductId;
use apteka_storefront::config::StorefrontConfig;
use apteka_storefront::error::AppError;
use apteka_storefront::views;

use super::{load_catalog, open_store};

/// List products, optionally filtered to one category.
#[allow(clippy::print_stdout)]
pub fn list(config: &StorefrontConfig, category: Option<&str>) -> Result<(), AppError> {
    let catalog = load_catalog(config)?;
    let store = open_store(config);

    let entries = views::catalog_view(&catalog, &store, category);
    if entries.is_empty() {
        println!("No products found");
        return Ok(());
    }

    for entry in entries {
        let mut badges = Vec::new();
        if !entry.in_stock {
            badges.push("out of stock".to_owned());
        }
        if entry.prescription {
            badges.push("prescription".to_owned());
        }
        if entry.in_cart > 0 {
            badges.push(format!("{} in cart", entry.in_cart));
        }
        let badges = if badges.is_empty() {
            String::new()
        } else {
            format!("  [{}]", badges.join(", "))
        };

        println!(
            "{:>4}  {:<30} {:>10}  {}{badges}",
            entry.id, entry.name, entry.price, entry.category
        );
    }

    Ok(())
}

/// Show the featured selection: the first `count` catalog entries.
#[allow(clippy::print_stdout)]
pub fn featured(config: &StorefrontConfig, count: usize) -> Result<(), AppError> {
    let catalog = load_catalog(config)?;

    for product in catalog.featured(count) {
        println!(
            "{:>4}  {:<30} {:>10}  {}",
            product.id, product.name, product.price, product.category
        );
    }

    Ok(())
}

/// Show the full details of one product.
#[allow(clippy::print_stdout)]
pub fn show(config: &StorefrontConfig, id: i32) -> Result<(), AppError> {
    let catalog = load_catalog(config)?;
    let id = ProductId::new(id);

    let Some(product) = catalog.get(id) else {
        println!("Product {id} is not in the catalog");
        return Ok(());
    };

    println!("{}  ({})", product.name, product.category);
    println!("Price: {}", product.price);
    println!(
        "Availability: {}",
        if product.in_stock {
            "in stock"
        } else {
            "out of stock"
        }
    );
    if product.prescription {
        println!("Dispensed by prescription only");
    }
    println!();
    println!("{}", product.description);

    let sections: [(&str, &Option<String>); 9] = [
        ("Form", &product.form),
        ("Pack size", &product.pack_size),
        ("Active substance", &product.active_substance),
        ("Dosage", &product.dosage),
        ("Contraindications", &product.contraindications),
        ("Side effects", &product.side_effects),
        ("Manufacturer", &product.manufacturer),
        ("Storage", &product.storage_conditions),
        ("Shelf life", &product.shelf_life),
    ];
    for (title, value) in sections {
        if let Some(text) = value {
            println!("{title}: {text}");
        }
    }
    if let Some(code) = &product.atc_code {
        println!("ATC code: {code}");
    }

    Ok(())
}
