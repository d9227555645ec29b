//! Catalog error model.

use thiserror::Error;

/// Result type used across the catalog domain crates.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Domain-level error.
///
/// Covers validation failures raised while constructing or mutating catalog
/// entities. Loading concerns (IO, JSON) live in the loader crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    /// An operand was of the wrong kind (e.g. combining a smartphone with lawn grass).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A quantity that must be strictly positive was zero or negative.
    #[error("quantity must be greater than zero (got {0})")]
    ZeroOrNegativeQuantity(i64),

    /// An order asked for more units than the product has in stock.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },

    /// A price was zero, negative or not a finite number.
    #[error("price must be a positive finite number (got {0})")]
    InvalidPrice(f64),

    /// Merging stock would exceed the largest representable quantity.
    #[error("stock of {current} cannot absorb {added} more units")]
    QuantityOverflow { current: i64, added: i64 },
}

impl CatalogError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn zero_quantity(quantity: i64) -> Self {
        Self::ZeroOrNegativeQuantity(quantity)
    }

    pub fn insufficient_stock(requested: i64, available: i64) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    pub fn invalid_price(price: f64) -> Self {
        Self::InvalidPrice(price)
    }

    pub fn quantity_overflow(current: i64, added: i64) -> Self {
        Self::QuantityOverflow { current, added }
    }
}

/// Ensure `quantity` is strictly positive.
pub fn ensure_positive_quantity(quantity: i64) -> CatalogResult<()> {
    if quantity <= 0 {
        return Err(CatalogError::zero_quantity(quantity));
    }
    Ok(())
}

/// Ensure `price` is a finite number greater than zero.
pub fn ensure_valid_price(price: f64) -> CatalogResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(CatalogError::invalid_price(price));
    }
    Ok(())
}
