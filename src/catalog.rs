//! Product catalog
//!
//! External collaborator describing what can be purchased. Each item
//! carries an `{id, name, price}` triple; the price is shown on the shelf
//! but intentionally never propagated into cart entries, since pricing is
//! quote-based and resolved out-of-band.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a catalog fixture.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Fixture content that does not parse as YAML.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_norway::Error),

    /// A price not in `"AMOUNT CURRENCY"` form, or with an unknown
    /// currency code.
    #[error("invalid price {price:?} for catalog item {id:?}")]
    InvalidPrice {
        /// Id of the offending item.
        id: String,
        /// The raw price string.
        price: String,
    },

    /// Two items sharing one id.
    #[error("duplicate catalog id {0:?}")]
    DuplicateId(String),
}

/// Wrapper for catalog items in YAML.
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    /// Items in presentation order.
    products: Vec<ItemFixture>,
}

/// One catalog item as written in the fixture.
#[derive(Debug, Deserialize)]
struct ItemFixture {
    id: String,
    name: String,
    /// Price string, e.g. `"89.90 BRL"`.
    price: String,
}

/// One purchasable item as presented by the storefront.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogItem {
    /// Opaque identifier, unique within the catalog.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Shelf price in minor units; display only.
    pub price_minor: i64,

    /// Currency of the shelf price.
    pub currency: &'static Currency,
}

impl CatalogItem {
    /// The shelf price as a money value, for display.
    #[must_use]
    pub fn price(&self) -> Money<'_, Currency> {
        Money::from_minor(self.price_minor, self.currency)
    }
}

/// Catalog of purchasable items, keyed by id.
#[derive(Debug, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Parse a catalog from YAML fixture content.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML does not parse, a price is
    /// invalid, or an id appears twice.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let mut items = Vec::with_capacity(fixture.products.len());
        let mut index = FxHashMap::default();

        for product in fixture.products {
            let (price_minor, currency) =
                parse_price(&product.price).ok_or_else(|| CatalogError::InvalidPrice {
                    id: product.id.clone(),
                    price: product.price.clone(),
                })?;

            if index.contains_key(&product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }

            index.insert(product.id.clone(), items.len());
            items.push(CatalogItem {
                id: product.id,
                name: product.name,
                price_minor,
                currency,
            });
        }

        Ok(Self { items, index })
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.index.get(id).and_then(|position| self.items.get(*position))
    }

    /// Iterate over the items in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    /// Number of items in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the catalog has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parse a price string (e.g. `"89.90 BRL"`) into minor units and currency.
fn parse_price(price: &str) -> Option<(i64, &'static Currency)> {
    let parts: Vec<&str> = price.split_whitespace().collect();

    if parts.len() != 2 {
        return None;
    }

    let amount = parts.first()?.parse::<Decimal>().ok()?;
    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())?;

    let currency = iso::find(parts.get(1)?)?;

    Some((minor_units, currency))
}
