//! Core types for Apteka.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod name;
pub mod phone;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use name::{FullName, FullNameError};
pub use phone::{Phone, PhoneError};
pub use price::{CurrencyCode, Price};
