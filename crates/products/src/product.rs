use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use catalog_core::{
    CatalogError, CatalogResult, Entity, ValueObject, ensure_positive_quantity, ensure_valid_price,
};

use crate::pricing::PriceConfirmation;

/// Shared, mutable reference to a product.
///
/// One product may be listed in several categories at once; every category
/// (and every order placed against it) sees the same stock and price.
pub type ProductHandle = Rc<RefCell<Product>>;

/// Descriptive attributes of a smartphone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartphoneSpec {
    pub efficiency: String,
    pub model: String,
    pub memory: String,
    pub color: String,
}

impl ValueObject for SmartphoneSpec {}

/// Descriptive attributes of lawn grass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawnGrassSpec {
    pub country: String,
    pub germination_period: String,
    pub color: String,
}

impl ValueObject for LawnGrassSpec {}

/// Product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    Standard,
    Smartphone(SmartphoneSpec),
    LawnGrass(LawnGrassSpec),
}

impl ProductKind {
    /// Type name used in debug output.
    pub fn type_name(&self) -> &'static str {
        match self {
            ProductKind::Standard => "Product",
            ProductKind::Smartphone(_) => "Smartphone",
            ProductKind::LawnGrass(_) => "LawnGrass",
        }
    }

    /// Whether `self` and `other` are the same variant (specs may differ).
    pub fn same_variant(&self, other: &ProductKind) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}

/// Unvalidated product attributes, as read from input data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default = "standard_kind")]
    pub kind: ProductKind,
}

fn standard_kind() -> ProductKind {
    ProductKind::Standard
}

impl ProductData {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            quantity,
            kind: ProductKind::Standard,
        }
    }

    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Outcome of [`Product::set_price`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceChange {
    /// The price now equals `new`.
    Updated { old: f64, new: f64 },
    /// The requested price was zero, negative or not finite; nothing changed.
    Rejected { requested: f64 },
    /// A decrease was not confirmed; nothing changed.
    Declined { requested: f64 },
}

impl PriceChange {
    pub fn is_updated(&self) -> bool {
        matches!(self, PriceChange::Updated { .. })
    }
}

/// A priced, stocked catalog item.
#[derive(Clone, PartialEq)]
pub struct Product {
    name: String,
    description: String,
    price: f64,
    quantity: i64,
    kind: ProductKind,
}

impl Product {
    /// Create a standard product.
    ///
    /// Fails with [`CatalogError::ZeroOrNegativeQuantity`] when `quantity <= 0`
    /// and with [`CatalogError::InvalidPrice`] when `price` is not positive.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> CatalogResult<Self> {
        Self::from_data(ProductData::new(name, description, price, quantity))
    }

    pub fn smartphone(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
        spec: SmartphoneSpec,
    ) -> CatalogResult<Self> {
        Self::from_data(
            ProductData::new(name, description, price, quantity)
                .with_kind(ProductKind::Smartphone(spec)),
        )
    }

    pub fn lawn_grass(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
        spec: LawnGrassSpec,
    ) -> CatalogResult<Self> {
        Self::from_data(
            ProductData::new(name, description, price, quantity)
                .with_kind(ProductKind::LawnGrass(spec)),
        )
    }

    /// Validate `data` and build a product from it.
    pub fn from_data(data: ProductData) -> CatalogResult<Self> {
        ensure_positive_quantity(data.quantity)?;
        ensure_valid_price(data.price)?;

        Ok(Self {
            name: data.name,
            description: data.description,
            price: data.price,
            quantity: data.quantity,
            kind: data.kind,
        })
    }

    /// Wrap into a shareable handle.
    pub fn into_handle(self) -> ProductHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    /// Stock value: price × quantity.
    pub fn stock_value(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// Change the price.
    ///
    /// Non-positive prices are refused. Decreases go through `confirmation`;
    /// increases (and setting the same price) apply directly.
    pub fn set_price(&mut self, new_price: f64, confirmation: &dyn PriceConfirmation) -> PriceChange {
        if ensure_valid_price(new_price).is_err() {
            warn!(product = %self.name, requested = new_price, "price must be positive; keeping current price");
            return PriceChange::Rejected {
                requested: new_price,
            };
        }

        if new_price < self.price && !confirmation.confirm(self.price, new_price) {
            debug!(product = %self.name, current = self.price, requested = new_price, "price decrease declined");
            return PriceChange::Declined {
                requested: new_price,
            };
        }

        let old = self.price;
        self.price = new_price;
        debug!(product = %self.name, old, new = new_price, "price updated");
        PriceChange::Updated {
            old,
            new: new_price,
        }
    }

    /// Fold another listing of the same product into this one: stock is summed
    /// and the higher price wins.
    ///
    /// Fails with [`CatalogError::QuantityOverflow`] when the sum does not fit;
    /// the product is left unchanged in that case.
    pub fn merge_stock(&mut self, quantity: i64, price: f64) -> CatalogResult<()> {
        let total = self
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| CatalogError::quantity_overflow(self.quantity, quantity))?;

        self.quantity = total;
        self.price = self.price.max(price);
        debug!(
            product = %self.name,
            quantity = self.quantity,
            price = self.price,
            "merged product by name"
        );
        Ok(())
    }

    /// Whether `other` is another listing of this product: same name, same variant.
    pub fn is_listing_of(&self, other: &Product) -> bool {
        self.same_identity(other) && self.kind.same_variant(&other.kind)
    }

    /// Remove `quantity` units from stock.
    pub fn take_stock(&mut self, quantity: i64) -> CatalogResult<()> {
        ensure_positive_quantity(quantity)?;
        if quantity > self.quantity {
            return Err(CatalogError::insufficient_stock(quantity, self.quantity));
        }
        self.quantity -= quantity;
        Ok(())
    }

    /// Combined stock value of two products of the same variant.
    pub fn combine_value(&self, other: &Product) -> CatalogResult<f64> {
        if !self.kind.same_variant(&other.kind) {
            return Err(CatalogError::invalid_argument(format!(
                "cannot combine {} with {}",
                self.kind.type_name(),
                other.kind.type_name()
            )));
        }
        Ok(self.stock_value() + other.stock_value())
    }
}

impl Entity for Product {
    type Id = str;

    fn id(&self) -> &str {
        &self.name
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}, {:?} rub. Remaining: {} pcs.",
            self.name, self.price, self.quantity
        )?;
        match &self.kind {
            ProductKind::Standard => Ok(()),
            ProductKind::Smartphone(spec) => {
                write!(f, " (Model: {}, Memory: {})", spec.model, spec.memory)
            }
            ProductKind::LawnGrass(spec) => write!(
                f,
                " (Country: {}, Germination period: {})",
                spec.country, spec.germination_period
            ),
        }
    }
}

impl core::fmt::Debug for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}(name='{}', price={:?}, quantity={}",
            self.kind.type_name(),
            self.name,
            self.price,
            self.quantity
        )?;
        match &self.kind {
            ProductKind::Standard => {}
            ProductKind::Smartphone(spec) => write!(
                f,
                ", efficiency='{}', model='{}', memory='{}', color='{}'",
                spec.efficiency, spec.model, spec.memory, spec.color
            )?,
            ProductKind::LawnGrass(spec) => write!(
                f,
                ", country='{}', germination_period='{}', color='{}'",
                spec.country, spec.germination_period, spec.color
            )?,
        }
        f.write_str(")")
    }
}

/// Build a product from `data`, or merge it into a matching product in `existing`.
///
/// A match has the same name and the same variant. The matching handle absorbs
/// the stock (sum) and price (max) and is returned; otherwise a fresh handle is
/// returned. `data` is validated either way.
pub fn new_product(data: ProductData, existing: &[ProductHandle]) -> CatalogResult<ProductHandle> {
    let product = Product::from_data(data)?;

    let matching = existing
        .iter()
        .find(|handle| handle.borrow().is_listing_of(&product));

    match matching {
        Some(handle) => {
            handle
                .borrow_mut()
                .merge_stock(product.quantity, product.price)?;
            Ok(Rc::clone(handle))
        }
        None => Ok(product.into_handle()),
    }
}
