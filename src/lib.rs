//! Vitrine
//!
//! Vitrine is the cart core of a quote-based storefront: an owned cart
//! store with local persistence, a declarative cart presenter, and an
//! outbound order-message formatter handed off to a messaging deep link.
//! Prices are shown on the catalog shelf but never enter the cart; quotes
//! are resolved by a human after the order is submitted.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod message;
pub mod presenter;
pub mod storage;
