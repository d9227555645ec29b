//! Categories domain module.
//!
//! Name-deduplicated product collections plus the counters shared by every
//! category built against one catalog.

pub mod category;
pub mod context;

pub use category::{Category, CategoryIter, Membership};
pub use context::CatalogContext;
