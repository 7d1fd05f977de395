//! Application stores with the subscribe/dispatch contract.
//!
//! Stores are explicit values passed down the ownership tree - there are no
//! module-scoped globals. Each store serializes its transitions behind a
//! mutex and notifies subscribers synchronously after every dispatch.

pub mod cart;
pub mod products;

pub use cart::CartStore;
pub use products::{ProductsAction, ProductsStore, reduce_products};
