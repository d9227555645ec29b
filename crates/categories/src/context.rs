//! Catalog-wide counters.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Counters {
    categories: Cell<u64>,
    unique_products: Cell<u64>,
}

/// Shared counters for everything built against one catalog.
///
/// Every [`Category`](crate::Category) constructed with a context bumps the
/// category count, and every product appended (not merged) into any of those
/// categories bumps the unique-product count. Clones share the same counters.
/// Both counts only ever grow.
#[derive(Debug, Clone, Default)]
pub struct CatalogContext {
    counters: Rc<Counters>,
}

impl CatalogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of categories constructed against this context.
    pub fn total_categories(&self) -> u64 {
        self.counters.categories.get()
    }

    /// Number of unique-product insertions across all categories of this context.
    pub fn total_unique_products(&self) -> u64 {
        self.counters.unique_products.get()
    }

    /// Whether `self` and `other` share counters.
    pub fn shares_counters_with(&self, other: &CatalogContext) -> bool {
        Rc::ptr_eq(&self.counters, &other.counters)
    }

    pub(crate) fn record_category(&self) {
        bump(&self.counters.categories);
    }

    pub(crate) fn record_unique_product(&self) {
        bump(&self.counters.unique_products);
    }

    /// Zero both counters.
    #[cfg(any(test, feature = "test-util"))]
    pub fn reset(&self) {
        self.counters.categories.set(0);
        self.counters.unique_products.set(0);
    }
}

fn bump(counter: &Cell<u64>) {
    counter.set(counter.get() + 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_counters() {
        let ctx = CatalogContext::new();
        let clone = ctx.clone();

        clone.record_category();
        clone.record_unique_product();
        clone.record_unique_product();

        assert_eq!(ctx.total_categories(), 1);
        assert_eq!(ctx.total_unique_products(), 2);
        assert!(ctx.shares_counters_with(&clone));
    }

    #[test]
    fn separate_contexts_are_independent() {
        let a = CatalogContext::new();
        let b = CatalogContext::new();
        a.record_category();

        assert_eq!(a.total_categories(), 1);
        assert_eq!(b.total_categories(), 0);
        assert!(!a.shares_counters_with(&b));
    }

    #[test]
    fn reset_zeroes_both_counters() {
        let ctx = CatalogContext::new();
        ctx.record_category();
        ctx.record_unique_product();
        ctx.reset();

        assert_eq!(ctx.total_categories(), 0);
        assert_eq!(ctx.total_unique_products(), 0);
    }
}
