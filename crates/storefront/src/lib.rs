//! Apteka Storefront library.
//!
//! The storefront core: a read-only product [`catalog`], a [`cart`]
//! persisted through a key-value [`storage`] backend, the cart and
//! checkout [`services`] that mutate it, and the display [`views`] a
//! presentation adapter re-reads after every mutation.
//!
//! The core never renders anything itself; callers (the `apteka` CLI,
//! tests) drive the services and read the views back.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod services;
pub mod storage;
pub mod views;
