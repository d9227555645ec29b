//! `catalog-core`: shared building blocks for the catalog crates.
//!
//! This crate contains **pure domain** primitives (no IO).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{CatalogError, CatalogResult, ensure_positive_quantity, ensure_valid_price};
pub use id::OrderId;
pub use value_object::ValueObject;
