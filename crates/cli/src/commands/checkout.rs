//! Order placement command.

use apteka_storefront::config::StorefrontConfig;
use apteka_storefront::error::AppError;
use apteka_storefront::services::checkout::{
    CheckoutError, CheckoutService, ContactForm, DeliveryMethod,
};

use super::{load_catalog, open_store};

/// Validate the form and submit the order from the current cart.
#[allow(clippy::print_stdout)]
pub fn run(
    config: &StorefrontConfig,
    name: String,
    phone: String,
    email: String,
    delivery: DeliveryMethod,
    pharmacy: Option<String>,
    comment: Option<String>,
) -> Result<(), AppError> {
    let catalog = load_catalog(config)?;
    let mut store = open_store(config);

    let form = ContactForm {
        full_name: name,
        phone,
        email,
        pharmacy,
        comment,
    };

    let mut checkout = CheckoutService::new(&catalog, &mut store);
    let submission = match checkout.submit(&form, delivery) {
        Ok(submission) => submission,
        Err(CheckoutError::InvalidForm(errors)) => {
            println!("The order form has errors:");
            for (field, message) in errors.messages() {
                println!("  {field}: {message}");
            }
            return Err(CheckoutError::InvalidForm(errors).into());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Order {} placed", submission.order_id);
    println!("  Items total: {}", submission.items_total);
    println!(
        "  Delivery ({}): {}",
        submission.delivery_method, submission.delivery_cost
    );
    println!("  Total: {}", submission.total);
    println!("  Contact: {} / {}", submission.phone, submission.email);
    println!("We will be in touch shortly.");

    Ok(())
}
