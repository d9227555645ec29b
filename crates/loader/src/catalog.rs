use std::rc::Rc;

use catalog_categories::{CatalogContext, Category};
use catalog_core::Entity;
use catalog_products::ProductHandle;

/// Every category loaded from one document, plus the counters they share.
#[derive(Debug)]
pub struct Catalog {
    context: CatalogContext,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(context: CatalogContext, categories: Vec<Category>) -> Self {
        Self {
            context,
            categories,
        }
    }

    /// A catalog with no categories and fresh counters.
    pub fn empty() -> Self {
        Self::new(CatalogContext::new(), Vec::new())
    }

    pub fn context(&self) -> &CatalogContext {
        &self.context
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn into_categories(self) -> Vec<Category> {
        self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name() == name)
    }

    pub fn category_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|category| category.name() == name)
    }

    /// Distinct products across all categories, in first-seen order.
    ///
    /// A product listed in several categories appears once.
    pub fn unique_products(&self) -> Vec<ProductHandle> {
        let mut unique: Vec<ProductHandle> = Vec::new();
        for product in self.categories.iter().flat_map(Category::iter) {
            if !unique.iter().any(|seen| Rc::ptr_eq(seen, product)) {
                unique.push(Rc::clone(product));
            }
        }
        unique
    }

    /// First product with this name, searching categories in order.
    pub fn find_product(&self, name: &str) -> Option<ProductHandle> {
        self.categories
            .iter()
            .flat_map(Category::iter)
            .find(|product| product.borrow().id() == name)
            .cloned()
    }

    /// Price × quantity summed over the distinct products.
    pub fn total_stock_value(&self) -> f64 {
        self.unique_products()
            .iter()
            .map(|product| product.borrow().stock_value())
            .sum()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
