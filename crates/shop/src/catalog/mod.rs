//! Product catalog.
//!
//! The catalog is a static, in-memory list of products seeded once at process
//! start and never mutated. Screens read it through [`Catalog::query`] with a
//! [`query::CatalogQuery`] describing the user's current search, filters, and
//! sort selection.

pub mod query;
pub mod seed;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use kirana_core::{Price, ProductId, Rating};

/// An immutable catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog key.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Plain text description.
    pub description: String,
    /// Current selling price.
    pub price: Price,
    /// Pre-sale price, present when the product is discounted.
    pub original_price: Option<Price>,
    /// Category name (e.g., "Electronics").
    pub category: String,
    /// Free-form tags, matched by search.
    pub tags: BTreeSet<String>,
    /// Average review rating.
    pub rating: Rating,
    /// Number of reviews behind the rating.
    pub review_count: u32,
    /// Whether the product can currently be purchased.
    pub in_stock: bool,
    /// Whether the product is flagged as on sale.
    pub is_on_sale: bool,
    /// Whether the product is flagged as newly added.
    pub is_new: bool,
    /// Product image URI.
    pub image: String,
}

impl Product {
    /// Amount saved versus the original price, if the product is discounted.
    #[must_use]
    pub fn savings(&self) -> Option<rust_decimal::Decimal> {
        self.original_price
            .map(|original| original.amount - self.price.amount)
            .filter(|saved| saved > &rust_decimal::Decimal::ZERO)
    }
}

/// Errors that can occur when building a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share the same id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// Bundled catalog data failed to parse.
    #[error("invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The static product catalog.
///
/// Lookups go through a side index so cart and checkout resolution stay O(1)
/// even though the product list itself is small.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from a product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products, index })
    }

    /// The demo catalog the shipped app seeds at startup.
    #[must_use]
    pub fn demo() -> Self {
        // The seed data is checked for unique ids by tests; an empty catalog
        // here would mean the seed itself is broken.
        Self::new(seed::demo_products()).unwrap_or_else(|e| {
            warn!(error = %e, "demo catalog seed is invalid, starting empty");
            Self::default()
        })
    }

    /// Build a catalog from a bundled JSON product list.
    ///
    /// The mobile shell ships its catalog as JSON; this is the loading edge
    /// for it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON and
    /// [`CatalogError::DuplicateId`] if two entries share an id.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&pos| self.products.get(pos))
    }

    /// Whether a product id resolves.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains_key(id)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct category names, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .products
            .iter()
            .map(|p| p.category.as_str())
            .collect();
        set.into_iter().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::inr(100),
            original_price: None,
            category: category.to_owned(),
            tags: BTreeSet::new(),
            rating: Rating::clamped(4.0),
            review_count: 10,
            in_stock: true,
            is_on_sale: false,
            is_new: false,
            image: String::new(),
        }
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = Catalog::new(vec![product("p-1", "A"), product("p-1", "B")]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    }

    #[test]
    fn test_get_and_contains() {
        let catalog = Catalog::new(vec![product("p-1", "A"), product("p-2", "B")]).unwrap();
        assert!(catalog.contains(&ProductId::new("p-1")));
        assert_eq!(
            catalog.get(&ProductId::new("p-2")).unwrap().category,
            "B"
        );
        assert!(catalog.get(&ProductId::new("p-3")).is_none());
    }

    #[test]
    fn test_categories_sorted_unique() {
        let catalog = Catalog::new(vec![
            product("p-1", "Fashion"),
            product("p-2", "Electronics"),
            product("p-3", "Fashion"),
        ])
        .unwrap();
        assert_eq!(catalog.categories(), vec!["Electronics", "Fashion"]);
    }

    #[test]
    fn test_savings() {
        let mut p = product("p-1", "A");
        assert!(p.savings().is_none());

        p.original_price = Some(Price::inr(150));
        assert_eq!(p.savings().unwrap(), rust_decimal::Decimal::from(50));

        // An "original" price at or below the current price is not a saving.
        p.original_price = Some(Price::inr(100));
        assert!(p.savings().is_none());
    }

    #[test]
    fn test_demo_catalog_seeds_cleanly() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.len(), seed::demo_products().len());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_from_json_roundtrip() {
        let json = serde_json::to_string(&seed::demo_products()).unwrap();
        let catalog = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog.len(), seed::demo_products().len());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
