//! Products domain module.
//!
//! Priced, stocked catalog items and their variants, implemented as plain
//! in-memory domain logic (no IO beyond the optional confirmation prompt).

pub mod pricing;
pub mod product;

pub use pricing::{AlwaysConfirm, NeverConfirm, PriceConfirmation, PromptConfirmation};
pub use product::{
    LawnGrassSpec, PriceChange, Product, ProductData, ProductHandle, ProductKind, SmartphoneSpec,
    new_product,
};
