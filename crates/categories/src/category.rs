use std::iter::FusedIterator;
use std::rc::Rc;

use tracing::debug;

use catalog_core::{CatalogError, CatalogResult, Entity, ensure_positive_quantity};
use catalog_products::ProductHandle;

use crate::context::CatalogContext;

/// What [`Category::add_product`] did with a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Appended as a new entry; the unique-product counter was bumped.
    Appended,
    /// Folded into the same-named entry (stock summed, higher price kept).
    Merged,
    /// This exact product is already listed; nothing changed.
    AlreadyPresent,
}

/// An ordered collection of products, unique by name.
pub struct Category {
    name: String,
    description: String,
    products: Vec<ProductHandle>,
    context: CatalogContext,
}

impl Category {
    /// Create a category and route each of `products` through [`Category::add_product`].
    ///
    /// Counters are recorded only once every product is in, so a failed
    /// construction leaves the context's counters untouched.
    pub fn new(
        context: &CatalogContext,
        name: impl Into<String>,
        description: impl Into<String>,
        products: impl IntoIterator<Item = ProductHandle>,
    ) -> CatalogResult<Self> {
        let products: Vec<ProductHandle> = products.into_iter().collect();
        let mut category = Self {
            name: name.into(),
            description: description.into(),
            products: Vec::with_capacity(products.len()),
            context: context.clone(),
        };

        for product in products {
            category.insert(product)?;
        }

        context.record_category();
        for _ in &category.products {
            context.record_unique_product();
        }

        debug!(
            category = %category.name,
            products = category.products.len(),
            "category created"
        );
        Ok(category)
    }

    /// Add a product, merging by name.
    ///
    /// Adding a product that is already listed (the same handle) is a no-op
    /// and returns [`Membership::AlreadyPresent`]; its stock is not doubled.
    ///
    /// Fails with `ZeroOrNegativeQuantity` if the product has no stock,
    /// `InvalidArgument` if a different variant with the same name is already
    /// listed, and `QuantityOverflow` if the merged stock does not fit.
    pub fn add_product(&mut self, product: ProductHandle) -> CatalogResult<Membership> {
        let membership = self.insert(product)?;
        if membership == Membership::Appended {
            self.context.record_unique_product();
        }
        Ok(membership)
    }

    fn insert(&mut self, product: ProductHandle) -> CatalogResult<Membership> {
        let (quantity, price) = {
            let candidate = product.borrow();
            (candidate.quantity(), candidate.price())
        };
        ensure_positive_quantity(quantity)?;

        if self.products.iter().any(|listed| Rc::ptr_eq(listed, &product)) {
            return Ok(Membership::AlreadyPresent);
        }

        let same_name = {
            let candidate = product.borrow();
            match self
                .products
                .iter()
                .find(|listed| listed.borrow().same_identity(&candidate))
            {
                Some(listed) if !listed.borrow().is_listing_of(&candidate) => {
                    return Err(CatalogError::invalid_argument(format!(
                        "category '{}' already lists a {} named '{}'",
                        self.name,
                        listed.borrow().kind().type_name(),
                        candidate.name()
                    )));
                }
                found => found.cloned(),
            }
        };

        match same_name {
            Some(listed) => {
                listed.borrow_mut().merge_stock(quantity, price)?;
                Ok(Membership::Merged)
            }
            None => {
                debug!(
                    category = %self.name,
                    product = %product.borrow().name(),
                    "product appended"
                );
                self.products.push(product);
                Ok(Membership::Appended)
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn context(&self) -> &CatalogContext {
        &self.context
    }

    /// Read-only view of the member products, in insertion order.
    pub fn products_list(&self) -> &[ProductHandle] {
        &self.products
    }

    /// One display line per product, newline-joined.
    pub fn products(&self) -> String {
        self.products
            .iter()
            .map(|product| product.borrow().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a member by name.
    pub fn find(&self, name: &str) -> Option<&ProductHandle> {
        self.products
            .iter()
            .find(|product| product.borrow().id() == name)
    }

    /// Sum of stock across members, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.products
            .iter()
            .map(|product| product.borrow().quantity())
            .fold(0i64, i64::saturating_add)
    }

    /// Arithmetic mean of member prices (not weighted by stock); 0.0 when empty.
    pub fn get_average_price(&self) -> f64 {
        if self.products.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .products
            .iter()
            .map(|product| product.borrow().price())
            .sum();
        total / self.products.len() as f64
    }

    /// Single pass over the members in insertion order.
    pub fn iter(&self) -> CategoryIter<'_> {
        CategoryIter {
            inner: self.products.iter(),
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}, product count: {} pcs.",
            self.name,
            self.total_quantity()
        )
    }
}

impl core::fmt::Debug for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Category(name='{}', products={})",
            self.name,
            self.products.len()
        )
    }
}

/// Iterator over a category's products.
///
/// Yields each member once, in insertion order, then keeps returning `None`.
/// Start a fresh pass with [`Category::iter`].
#[derive(Debug, Clone)]
pub struct CategoryIter<'a> {
    inner: std::slice::Iter<'a, ProductHandle>,
}

impl<'a> Iterator for CategoryIter<'a> {
    type Item = &'a ProductHandle;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for CategoryIter<'_> {}

impl FusedIterator for CategoryIter<'_> {}

impl<'a> IntoIterator for &'a Category {
    type Item = &'a ProductHandle;
    type IntoIter = CategoryIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
