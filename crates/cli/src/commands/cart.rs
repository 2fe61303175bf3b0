//! Cart management commands.

use apteka_core::ProductId;
use apteka_storefront::config::StorefrontConfig;
use apteka_storefront::error::AppError;
use apteka_storefront::services::CartService;
use apteka_storefront::views::CartView;

use super::{TerminalConfirmation, load_catalog, open_store};

/// Show the cart contents and totals.
#[allow(clippy::print_stdout)]
pub fn show(config: &StorefrontConfig) -> Result<(), AppError> {
    let catalog = load_catalog(config)?;
    let store = open_store(config);

    let view = CartView::build(&catalog, &store);
    if view.items.is_empty() {
        println!("The cart is empty");
        return Ok(());
    }

    for item in &view.items {
        let badge = if item.prescription { "  [prescription]" } else { "" };
        println!(
            "{:>4}  {:<30} {} x {:>3} = {:>10}{badge}",
            item.product_id, item.name, item.unit_price, item.quantity, item.line_total
        );
    }
    println!();
    println!("Items: {}", view.item_count);
    println!("Total: {}", view.subtotal);

    Ok(())
}

/// Add a product to the cart.
pub fn add(config: &StorefrontConfig, id: i32, quantity: u32, yes: bool) -> Result<(), AppError> {
    let catalog = load_catalog(config)?;
    let mut store = open_store(config);
    let confirm = TerminalConfirmation { assume_yes: yes };

    CartService::new(&catalog, &mut store).add_item(ProductId::new(id), quantity, &confirm)?;
    show(config)
}

/// Remove a product from the cart.
pub fn remove(config: &StorefrontConfig, id: i32) -> Result<(), AppError> {
    let catalog = load_catalog(config)?;
    let mut store = open_store(config);

    CartService::new(&catalog, &mut store).remove_item(ProductId::new(id));
    show(config)
}

/// Set the quantity of a product already in the cart.
pub fn set(config: &StorefrontConfig, id: i32, quantity: u32) -> Result<(), AppError> {
    let catalog = load_catalog(config)?;
    let mut store = open_store(config);

    CartService::new(&catalog, &mut store).update_quantity(ProductId::new(id), quantity)?;
    show(config)
}

/// Empty the cart, after confirmation.
#[allow(clippy::print_stdout)]
pub fn clear(config: &StorefrontConfig, yes: bool) -> Result<(), AppError> {
    let catalog = load_catalog(config)?;
    let mut store = open_store(config);
    let confirm = TerminalConfirmation { assume_yes: yes };

    if CartService::new(&catalog, &mut store).clear(&confirm) {
        println!("Cart cleared");
    } else {
        println!("Cart left as is");
    }
    Ok(())
}
