//! Order history commands.

use apteka_storefront::config::StorefrontConfig;
use apteka_storefront::error::AppError;
use apteka_storefront::services::CheckoutService;

use super::{load_catalog, open_store};

/// List past order submissions, oldest first.
#[allow(clippy::print_stdout)]
pub fn list(config: &StorefrontConfig) -> Result<(), AppError> {
    let catalog = load_catalog(config)?;
    let mut store = open_store(config);

    let history = CheckoutService::new(&catalog, &mut store).order_history();
    if history.is_empty() {
        println!("No orders yet");
        return Ok(());
    }

    for order in history {
        println!(
            "{}  {}  {}  {} item line(s)  {}",
            order.order_id,
            order.submitted_at.format("%Y-%m-%d %H:%M"),
            order.delivery_method,
            order.cart.len(),
            order.total,
        );
    }

    Ok(())
}
