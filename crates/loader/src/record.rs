//! On-disk JSON shape of a catalog document.
//!
//! ```json
//! [
//!   {
//!     "name": "Smartphones",
//!     "description": "...",
//!     "products": [
//!       {"name": "...", "description": "...", "price": 180000.0, "quantity": 5,
//!        "efficiency": 95.5, "model": "S23 Ultra", "memory": 256, "color": "Gray"}
//!     ]
//!   }
//! ]
//! ```
//!
//! The product variant is decided here, once: an `efficiency` field makes a
//! smartphone, a `country` field makes lawn grass, anything else is a standard
//! product.

use serde::Deserialize;
use thiserror::Error;

use catalog_products::{LawnGrassSpec, ProductData, ProductKind, SmartphoneSpec};

/// One category entry of the document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

/// One product entry, already classified into its variant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawProductRecord")]
pub struct ProductRecord(ProductData);

impl ProductRecord {
    pub fn data(&self) -> &ProductData {
        &self.0
    }

    pub fn into_data(self) -> ProductData {
        self.0
    }
}

/// A variant was selected but one of its fields is missing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{variant} '{product}' is missing field `{field}`")]
pub struct RecordError {
    pub variant: &'static str,
    pub product: String,
    pub field: &'static str,
}

/// Descriptive attributes are free text, but documents often carry them as
/// numbers (`"memory": 256`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Descriptive {
    Text(String),
    Number(serde_json::Number),
}

impl Descriptive {
    fn into_string(self) -> String {
        match self {
            Descriptive::Text(text) => text,
            Descriptive::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawProductRecord {
    name: String,
    description: String,
    price: f64,
    quantity: i64,
    efficiency: Option<Descriptive>,
    model: Option<Descriptive>,
    memory: Option<Descriptive>,
    color: Option<Descriptive>,
    country: Option<Descriptive>,
    germination_period: Option<Descriptive>,
}

fn required(
    value: Option<Descriptive>,
    variant: &'static str,
    field: &'static str,
    product: &str,
) -> Result<String, RecordError> {
    value.map(Descriptive::into_string).ok_or_else(|| RecordError {
        variant,
        product: product.to_string(),
        field,
    })
}

impl TryFrom<RawProductRecord> for ProductRecord {
    type Error = RecordError;

    fn try_from(raw: RawProductRecord) -> Result<Self, Self::Error> {
        let RawProductRecord {
            name,
            description,
            price,
            quantity,
            efficiency,
            model,
            memory,
            color,
            country,
            germination_period,
        } = raw;

        let kind = if let Some(efficiency) = efficiency {
            ProductKind::Smartphone(SmartphoneSpec {
                efficiency: efficiency.into_string(),
                model: required(model, "Smartphone", "model", &name)?,
                memory: required(memory, "Smartphone", "memory", &name)?,
                color: required(color, "Smartphone", "color", &name)?,
            })
        } else if let Some(country) = country {
            ProductKind::LawnGrass(LawnGrassSpec {
                country: country.into_string(),
                germination_period: required(
                    germination_period,
                    "LawnGrass",
                    "germination_period",
                    &name,
                )?,
                color: required(color, "LawnGrass", "color", &name)?,
            })
        } else {
            ProductKind::Standard
        };

        Ok(ProductRecord(
            ProductData::new(name, description, price, quantity).with_kind(kind),
        ))
    }
}
