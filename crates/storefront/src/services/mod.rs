//! Storefront services: the operations a presentation adapter drives.

pub mod cart;
pub mod checkout;

pub use cart::{CartError, CartService, Confirmation};
pub use checkout::{
    CheckoutError, CheckoutService, ContactForm, DeliveryMethod, FormErrors, OrderSubmission,
};
