//! Catalog loading.
//!
//! Reads a JSON document of categories and products and assembles shared
//! product handles and categories from it. This is the only crate that does IO.

pub mod catalog;
pub mod loader;
pub mod record;

pub use catalog::Catalog;
pub use loader::{
    LoadError, LoadResult, build_catalog, load_catalog, load_catalog_into, load_data_from_json,
    parse_catalog,
};
pub use record::{CategoryRecord, ProductRecord, RecordError};
