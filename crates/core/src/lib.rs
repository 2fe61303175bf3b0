//! Apteka Core - Shared types library.
//!
//! This crate provides common types used across all Apteka components:
//! - `storefront` - Catalog, cart, and checkout logic
//! - `cli` - Command-line storefront client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and
//!   validated contact fields (email, phone, full name)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
