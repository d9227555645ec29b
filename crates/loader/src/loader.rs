//! Building a [`Catalog`] from a JSON document.
//!
//! Loading runs in two phases:
//!
//! ```text
//! records
//!   ↓
//! 1. Build product handles (validates every record; standard products merge
//!    by name against everything seen so far in the document)
//!   ↓
//! 2. Build categories (each handle goes through Category::add_product)
//! ```
//!
//! The context's counters are only touched in phase 2, so a document with a
//! bad record leaves them as they were.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;
use tracing::{info, warn};

use catalog_categories::{CatalogContext, Category};
use catalog_core::CatalogError;
use catalog_products::{Product, ProductHandle, ProductKind, new_product};

use crate::catalog::Catalog;
use crate::record::CategoryRecord;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read (missing, unreadable, not UTF-8).
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not have the catalog shape.
    #[error("malformed catalog document: {0}")]
    Json(#[from] serde_json::Error),

    /// A product record failed domain validation.
    #[error("invalid product '{product}' in category '{category}': {source}")]
    InvalidProduct {
        category: String,
        product: String,
        #[source]
        source: CatalogError,
    },

    /// A category could not be assembled from its products.
    #[error("invalid category '{category}': {source}")]
    InvalidCategory {
        category: String,
        #[source]
        source: CatalogError,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Load a catalog from `path` with fresh counters.
pub fn load_catalog(path: impl AsRef<Path>) -> LoadResult<Catalog> {
    load_catalog_into(path, &CatalogContext::new())
}

/// Load a catalog from `path`, counting into an existing context.
pub fn load_catalog_into(path: impl AsRef<Path>, context: &CatalogContext) -> LoadResult<Catalog> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&json, context)?;

    info!(
        path = %path.display(),
        categories = catalog.len(),
        unique_products = context.total_unique_products(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Load a catalog from `path`, falling back to an empty catalog on any failure.
///
/// The failure is logged at `warn` and never reaches the caller; use
/// [`load_catalog`] when the reason matters.
pub fn load_data_from_json(path: impl AsRef<Path>) -> Catalog {
    let path = path.as_ref();
    match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(error) => {
            warn!(path = %path.display(), %error, "could not load catalog; continuing with an empty one");
            Catalog::empty()
        }
    }
}

/// Parse a catalog document held in memory.
pub fn parse_catalog(json: &str, context: &CatalogContext) -> LoadResult<Catalog> {
    let records: Vec<CategoryRecord> = serde_json::from_str(json)?;
    build_catalog(records, context)
}

/// Turn parsed records into categories.
pub fn build_catalog(records: Vec<CategoryRecord>, context: &CatalogContext) -> LoadResult<Catalog> {
    let staged = stage_products(records)?;

    let categories = staged
        .into_iter()
        .map(|staged| {
            Category::new(context, staged.name.clone(), staged.description, staged.products)
                .map_err(|source| LoadError::InvalidCategory {
                    category: staged.name,
                    source,
                })
        })
        .collect::<LoadResult<Vec<_>>>()?;

    Ok(Catalog::new(context.clone(), categories))
}

struct StagedCategory {
    name: String,
    description: String,
    products: Vec<ProductHandle>,
}

fn stage_products(records: Vec<CategoryRecord>) -> LoadResult<Vec<StagedCategory>> {
    let mut seen: Vec<ProductHandle> = Vec::new();
    let mut staged = Vec::with_capacity(records.len());

    for record in records {
        let mut products = Vec::with_capacity(record.products.len());

        for product in record.products {
            let data = product.into_data();
            let product_name = data.name.clone();

            let built = match data.kind {
                ProductKind::Standard => new_product(data, &seen),
                _ => Product::from_data(data).map(Product::into_handle),
            };
            let handle = built.map_err(|source| LoadError::InvalidProduct {
                category: record.name.clone(),
                product: product_name,
                source,
            })?;

            if !seen.iter().any(|known| Rc::ptr_eq(known, &handle)) {
                seen.push(Rc::clone(&handle));
            }
            products.push(handle);
        }

        staged.push(StagedCategory {
            name: record.name,
            description: record.description,
            products,
        });
    }

    Ok(staged)
}
