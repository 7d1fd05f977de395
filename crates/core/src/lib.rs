//! Fjordhem Core - Domain types and pure storefront logic.
//!
//! This crate provides the types and state transitions shared by all
//! Fjordhem components:
//! - `storefront` - Application layer (backend client, stores, session)
//! - `cli` - Command-line tools for seeding and catalog management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. Every state transition here is synchronous, total, and
//! referentially transparent, which keeps it trivially testable and usable
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and emails,
//!   plus the product catalog types
//! - [`cart`] - Cart aggregate and its reducer
//! - [`checkout`] - Order summary derivation
//! - [`catalog`] - Display window for the infinite-scroll product grid

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod types;

pub use cart::{Cart, CartAction, CartLine, reduce};
pub use catalog::DisplayWindow;
pub use checkout::OrderSummary;
pub use types::*;
