use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::info;

use catalog_core::{CatalogResult, OrderId};
use catalog_products::ProductHandle;

/// A placed order: stock reserved against one product.
///
/// Immutable once placed. There is no cancellation; the reserved units are
/// gone from the product's stock.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    product: ProductHandle,
    quantity: i64,
    unit_price: f64,
    total_price: f64,
    placed_at: DateTime<Utc>,
}

impl Order {
    /// Reserve `quantity` units of `product`.
    ///
    /// Fails with `ZeroOrNegativeQuantity` when `quantity <= 0` and with
    /// `InsufficientStock` when it exceeds the product's stock. On success the
    /// product's stock is decremented and the total is priced at the current
    /// unit price.
    pub fn place(product: &ProductHandle, quantity: i64) -> CatalogResult<Self> {
        Self::place_at(product, quantity, Utc::now())
    }

    /// Same as [`Order::place`] with an explicit timestamp.
    pub fn place_at(
        product: &ProductHandle,
        quantity: i64,
        placed_at: DateTime<Utc>,
    ) -> CatalogResult<Self> {
        let unit_price = {
            let mut reserved = product.borrow_mut();
            reserved.take_stock(quantity)?;
            reserved.price()
        };

        let order = Self {
            id: OrderId::new(),
            product: Rc::clone(product),
            quantity,
            unit_price,
            total_price: unit_price * quantity as f64,
            placed_at,
        };

        info!(
            order_id = %order.id,
            product = %order.product.borrow().name(),
            quantity,
            total = order.total_price,
            "order placed"
        );
        Ok(order)
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn product(&self) -> &ProductHandle {
        &self.product
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price at the time the order was placed.
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Order {}: {} x {}, total {:?} rub.",
            self.id,
            self.quantity,
            self.product.borrow().name(),
            self.total_price
        )
    }
}
