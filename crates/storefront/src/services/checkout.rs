//! Checkout: order form validation, delivery pricing, and the
//! append-only order history.

use core::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use apteka_core::{Email, FullName, Phone, Price};

use crate::cart::{CartLine, CartStore};
use crate::catalog::Catalog;
use crate::services::cart::total_price_of;
use crate::storage::{Storage, keys};

/// Courier delivery fee, waived at [`free_courier_threshold`].
fn courier_fee() -> Decimal {
    Decimal::from(300)
}

/// Items total at which courier delivery becomes free.
fn free_courier_threshold() -> Decimal {
    Decimal::from(3000)
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// Pick up at a pharmacy; always free.
    #[default]
    Pickup,
    /// Courier delivery: 300 ₽, free from 3000 ₽.
    #[serde(rename = "delivery")]
    Courier,
}

impl DeliveryMethod {
    /// Delivery cost for the given items total.
    #[must_use]
    pub fn cost(self, items_total: &Price) -> Price {
        match self {
            Self::Pickup => Price::zero(),
            Self::Courier => {
                if items_total.amount >= free_courier_threshold() {
                    Price::zero()
                } else {
                    Price::new(courier_fee(), items_total.currency_code)
                }
            }
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pickup => write!(f, "pickup"),
            Self::Courier => write!(f, "delivery"),
        }
    }
}

impl std::str::FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickup" => Ok(Self::Pickup),
            "delivery" | "courier" => Ok(Self::Courier),
            other => Err(format!(
                "unknown delivery method {other:?}, expected \"pickup\" or \"delivery\""
            )),
        }
    }
}

/// Raw order form input, exactly as the user typed it.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    /// Chosen pickup pharmacy, free-form.
    pub pharmacy: Option<String>,
    pub comment: Option<String>,
}

/// Per-field validation messages for a rejected form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl FormErrors {
    /// Whether every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.phone.is_none() && self.email.is_none()
    }

    /// The messages paired with their field names, for display.
    #[must_use]
    pub fn messages(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        if let Some(m) = &self.full_name {
            out.push(("full name", m.as_str()));
        }
        if let Some(m) = &self.phone {
            out.push(("phone", m.as_str()));
        }
        if let Some(m) = &self.email {
            out.push(("email", m.as_str()));
        }
        out
    }
}

/// Validated contact fields, normalized for storage.
#[derive(Debug, Clone)]
pub struct Contact {
    pub full_name: FullName,
    pub phone: Phone,
    pub email: Email,
}

impl ContactForm {
    /// Validate every field, collecting all failures rather than
    /// stopping at the first so the form can show each message.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] with a message per failed field.
    pub fn validate(&self) -> Result<Contact, FormErrors> {
        let full_name = FullName::parse(&self.full_name);
        let phone = Phone::parse(&self.phone);
        let email = Email::parse(&self.email);

        match (full_name, phone, email) {
            (Ok(full_name), Ok(phone), Ok(email)) => Ok(Contact {
                full_name,
                phone,
                email,
            }),
            (full_name, phone, email) => Err(FormErrors {
                full_name: full_name.err().map(|e| e.to_string()),
                phone: phone.err().map(|e| e.to_string()),
                email: email.err().map(|e| e.to_string()),
            }),
        }
    }
}

/// A submitted order: a write-once snapshot appended to the `orders`
/// history record. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    /// Generated identifier, `ORD-<millis>-<nnn>`.
    pub order_id: String,
    pub full_name: FullName,
    pub phone: Phone,
    pub email: Email,
    pub delivery_method: DeliveryMethod,
    #[serde(default)]
    pub pharmacy: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Copy of the cart at submission time.
    pub cart: Vec<CartLine>,
    pub items_total: Price,
    pub delivery_cost: Price,
    pub total: Price,
    pub submitted_at: DateTime<Utc>,
}

/// Errors from submitting an order. Nothing mutates on error.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("the cart is empty")]
    EmptyCart,

    /// One or more form fields failed validation.
    #[error("the order form has invalid fields")]
    InvalidForm(FormErrors),
}

/// Checkout over a catalog and a cart store.
pub struct CheckoutService<'a, S: Storage> {
    catalog: &'a Catalog,
    store: &'a mut CartStore<S>,
}

impl<'a, S: Storage> CheckoutService<'a, S> {
    pub fn new(catalog: &'a Catalog, store: &'a mut CartStore<S>) -> Self {
        Self { catalog, store }
    }

    /// Price the current cart for the given delivery method without
    /// submitting: (items total, delivery cost, grand total).
    #[must_use]
    pub fn quote(&self, delivery: DeliveryMethod) -> (Price, Price, Price) {
        let items_total = total_price_of(self.catalog, self.store.items());
        let delivery_cost = delivery.cost(&items_total);
        (items_total, delivery_cost, items_total + delivery_cost)
    }

    /// Validate the form and submit the order.
    ///
    /// On success the submission is appended to the order history and
    /// the cart is cleared; the returned snapshot is what was stored.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::EmptyCart`] or [`CheckoutError::InvalidForm`];
    /// neither the cart nor the history changes on error.
    pub fn submit(
        &mut self,
        form: &ContactForm,
        delivery: DeliveryMethod,
    ) -> Result<OrderSubmission, CheckoutError> {
        if self.store.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let contact = form.validate().map_err(CheckoutError::InvalidForm)?;

        let (items_total, delivery_cost, total) = self.quote(delivery);

        let submission = OrderSubmission {
            order_id: generate_order_id(),
            full_name: contact.full_name,
            phone: contact.phone,
            email: contact.email,
            delivery_method: delivery,
            pharmacy: form.pharmacy.clone(),
            comment: form.comment.clone(),
            cart: self.store.items().to_vec(),
            items_total,
            delivery_cost,
            total,
            submitted_at: Utc::now(),
        };

        self.append_to_history(&submission);
        self.store.clear();

        tracing::info!(
            order_id = %submission.order_id,
            total = %submission.total,
            "Order submitted"
        );
        Ok(submission)
    }

    /// Past submissions, oldest first. A missing or malformed history
    /// record reads as empty.
    #[must_use]
    pub fn order_history(&self) -> Vec<OrderSubmission> {
        read_history(self.store.storage())
    }

    /// Append to the `orders` record. History write failures are
    /// logged, not propagated: the order itself already succeeded.
    fn append_to_history(&mut self, submission: &OrderSubmission) {
        let mut history = read_history(self.store.storage());
        history.push(submission.clone());

        match serde_json::to_string(&history) {
            Ok(json) => {
                if let Err(e) = self.store.storage_mut().set(keys::ORDERS, &json) {
                    tracing::error!(error = %e, "Cannot persist order history");
                }
            }
            Err(e) => tracing::error!(error = %e, "Cannot serialize order history"),
        }
    }
}

fn read_history<S: Storage>(storage: &S) -> Vec<OrderSubmission> {
    match storage.get(keys::ORDERS) {
        Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Malformed order history, starting empty");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Cannot read order history");
            Vec::new()
        }
    }
}

/// Generate an order identifier: submission time in milliseconds plus
/// a random suffix to disambiguate same-millisecond orders.
fn generate_order_id() -> String {
    let suffix: u16 = rand::rng().random_range(0..1000);
    format!("ORD-{}-{:03}", Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::services::cart::CartService;
    use crate::storage::MemoryStorage;
    use apteka_core::ProductId;

    const YES: fn(&str) -> bool = |_| true;

    fn valid_form() -> ContactForm {
        ContactForm {
            full_name: "Anna Ivanova".to_owned(),
            phone: "+7 (999) 123-45-67".to_owned(),
            email: "anna@example.com".to_owned(),
            pharmacy: Some("Central pharmacy".to_owned()),
            comment: None,
        }
    }

    fn store_with(items: &[(i32, u32)]) -> (Catalog, CartStore<MemoryStorage>) {
        let catalog = sample_catalog();
        let mut store = CartStore::open(MemoryStorage::new());
        let mut service = CartService::new(&catalog, &mut store);
        for &(id, qty) in items {
            service.add_item(ProductId::new(id), qty, &YES).unwrap();
        }
        (catalog, store)
    }

    #[test]
    fn test_delivery_cost_rules() {
        let small = Price::rub(Decimal::from(2999));
        let large = Price::rub(Decimal::from(3000));

        assert!(DeliveryMethod::Pickup.cost(&small).is_zero());
        assert_eq!(
            DeliveryMethod::Courier.cost(&small).amount,
            Decimal::from(300)
        );
        assert!(DeliveryMethod::Courier.cost(&large).is_zero());
    }

    #[test]
    fn test_delivery_method_parse() {
        assert_eq!("pickup".parse(), Ok(DeliveryMethod::Pickup));
        assert_eq!("delivery".parse(), Ok(DeliveryMethod::Courier));
        assert_eq!("courier".parse(), Ok(DeliveryMethod::Courier));
        assert!("teleport".parse::<DeliveryMethod>().is_err());
    }

    #[test]
    fn test_validate_collects_all_failures() {
        let form = ContactForm {
            full_name: "A".to_owned(),
            phone: "123".to_owned(),
            email: "a@b".to_owned(),
            pharmacy: None,
            comment: None,
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.full_name.is_some());
        assert!(errors.phone.is_some());
        assert!(errors.email.is_some());
        assert_eq!(errors.messages().len(), 3);
    }

    #[test]
    fn test_validate_normalizes_fields() {
        let contact = valid_form().validate().unwrap();
        assert_eq!(contact.full_name.as_str(), "Anna Ivanova");
        assert_eq!(contact.phone.digits(), "9991234567");
        assert_eq!(contact.email.as_str(), "anna@example.com");
    }

    #[test]
    fn test_submit_empty_cart() {
        let (catalog, mut store) = store_with(&[]);
        let mut checkout = CheckoutService::new(&catalog, &mut store);
        assert!(matches!(
            checkout.submit(&valid_form(), DeliveryMethod::Pickup),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_submit_invalid_form_mutates_nothing() {
        let (catalog, mut store) = store_with(&[(7, 2)]);
        let mut checkout = CheckoutService::new(&catalog, &mut store);

        let form = ContactForm {
            phone: "123".to_owned(),
            ..valid_form()
        };
        let err = checkout.submit(&form, DeliveryMethod::Pickup).unwrap_err();
        let CheckoutError::InvalidForm(errors) = err else {
            panic!("expected InvalidForm");
        };
        assert!(errors.phone.is_some());
        assert!(errors.full_name.is_none());

        assert_eq!(store.total_item_count(), 2);
        let checkout = CheckoutService::new(&catalog, &mut store);
        assert!(checkout.order_history().is_empty());
    }

    #[test]
    fn test_submit_records_order_and_clears_cart() {
        // 2 × 150 = 300, below the free-courier threshold
        let (catalog, mut store) = store_with(&[(7, 2)]);
        let mut checkout = CheckoutService::new(&catalog, &mut store);

        let submission = checkout
            .submit(&valid_form(), DeliveryMethod::Courier)
            .unwrap();

        assert!(submission.order_id.starts_with("ORD-"));
        assert_eq!(submission.items_total.amount, Decimal::from(300));
        assert_eq!(submission.delivery_cost.amount, Decimal::from(300));
        assert_eq!(submission.total.amount, Decimal::from(600));
        assert_eq!(submission.cart.len(), 1);

        assert!(store.is_empty());
        let checkout = CheckoutService::new(&catalog, &mut store);
        let history = checkout.order_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].order_id, submission.order_id);
    }

    #[test]
    fn test_history_is_append_only() {
        let (catalog, mut store) = store_with(&[(7, 1)]);
        CheckoutService::new(&catalog, &mut store)
            .submit(&valid_form(), DeliveryMethod::Pickup)
            .unwrap();

        CartService::new(&catalog, &mut store)
            .add_item(ProductId::new(10), 1, &YES)
            .unwrap();
        CheckoutService::new(&catalog, &mut store)
            .submit(&valid_form(), DeliveryMethod::Pickup)
            .unwrap();

        let history = CheckoutService::new(&catalog, &mut store).order_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].items_total.amount, Decimal::from(150));
        assert_eq!(history[1].items_total.amount, Decimal::from(95));
    }

    #[test]
    fn test_free_courier_at_threshold() {
        // 10 × 320 = 3200, over the threshold
        let (catalog, mut store) = store_with(&[(8, 10)]);
        let mut checkout = CheckoutService::new(&catalog, &mut store);

        let submission = checkout
            .submit(&valid_form(), DeliveryMethod::Courier)
            .unwrap();
        assert!(submission.delivery_cost.is_zero());
        assert_eq!(submission.total.amount, Decimal::from(3200));
    }

    #[test]
    fn test_malformed_history_reads_empty() {
        let (catalog, mut store) = store_with(&[(7, 1)]);
        store
            .storage_mut()
            .set(keys::ORDERS, "{ corrupt")
            .unwrap();

        let mut checkout = CheckoutService::new(&catalog, &mut store);
        assert!(checkout.order_history().is_empty());

        // A submit restarts the history from the corrupt record
        checkout
            .submit(&valid_form(), DeliveryMethod::Pickup)
            .unwrap();
        let checkout = CheckoutService::new(&catalog, &mut store);
        assert_eq!(checkout.order_history().len(), 1);
    }
}
