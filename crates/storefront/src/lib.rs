//! Fjordhem Storefront - Application layer for the Fjordhem shop.
//!
//! This crate owns everything between the pure domain in `fjordhem-core`
//! and a UI shell:
//!
//! - [`config`] - Environment-driven configuration with a development-mode
//!   secret guard
//! - [`api`] - REST client for the local JSON backend, with read-through
//!   caching
//! - [`store`] - Cart and products stores with an explicit
//!   subscribe/dispatch observer contract (no ambient globals)
//! - [`session`] - Signed-token session controller: login, cookie
//!   persistence, periodic revalidation
//! - [`guards`] - Reactive route guards over the session state
//! - [`catalog`] - Product grid controller with infinite-scroll windowing
//! - [`checkout`] - Order summary and the simulated purchase flow
//! - [`admin`] - Dashboard catalog operations (product CRUD)
//!
//! # Error surface
//!
//! Nothing here is fatal: backend failures carry a user-facing message
//! through [`error::AppError::user_message`], token failures silently
//! downgrade the session to logged-out, and validation problems stay
//! field-scoped in the UI shell.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod guards;
pub mod observer;
pub mod session;
pub mod store;

pub use error::{AppError, Result};
