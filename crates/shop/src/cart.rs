//! Session cart.
//!
//! The cart is session-scoped, in-memory state. Lines reference catalog
//! products by id; adding validates the reference, after which the catalog is
//! static so lines cannot dangle. Every add appends a fresh line: two adds
//! of the same product stay two lines, and only quantity controls on an
//! existing line combine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use kirana_core::{CartLineId, ProductId};

use crate::catalog::Catalog;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product id does not resolve into the catalog.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// The cart line id does not resolve.
    #[error("cart line {0} not found")]
    LineNotFound(CartLineId),
}

/// A quantity-bearing reference to a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Line id, minted at add time.
    pub id: CartLineId,
    /// The referenced product.
    pub product_id: ProductId,
    /// Units of the product; never below 1.
    pub quantity: u32,
    /// When the line was added.
    pub added_at: DateTime<Utc>,
}

/// The session cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product to the cart.
    ///
    /// Always appends a new line with a fresh id; a quantity of zero is
    /// lifted to 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownProduct`] if the product id does not
    /// resolve into the catalog.
    pub fn add(
        &mut self,
        catalog: &Catalog,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartLineId, CartError> {
        if !catalog.contains(product_id) {
            return Err(CartError::UnknownProduct(product_id.clone()));
        }

        let line = CartLine {
            id: CartLineId::new(),
            product_id: product_id.clone(),
            quantity: quantity.max(1),
            added_at: Utc::now(),
        };
        let id = line.id;
        debug!(product = %product_id, quantity = line.quantity, "added cart line");
        self.lines.push(line);
        Ok(id)
    }

    /// Look up a line by id.
    #[must_use]
    pub fn line(&self, id: &CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == *id)
    }

    fn line_mut(&mut self, id: &CartLineId) -> Result<&mut CartLine, CartError> {
        self.lines
            .iter_mut()
            .find(|line| line.id == *id)
            .ok_or(CartError::LineNotFound(*id))
    }

    /// Increase a line's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] for an unknown line id.
    pub fn increment(&mut self, id: &CartLineId) -> Result<u32, CartError> {
        let line = self.line_mut(id)?;
        line.quantity = line.quantity.saturating_add(1);
        Ok(line.quantity)
    }

    /// Decrease a line's quantity by one, clamped at 1.
    ///
    /// Decrementing from 1 leaves the line unchanged; the decrement control
    /// never removes a line or takes it to zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] for an unknown line id.
    pub fn decrement(&mut self, id: &CartLineId) -> Result<u32, CartError> {
        let line = self.line_mut(id)?;
        line.quantity = line.quantity.saturating_sub(1).max(1);
        Ok(line.quantity)
    }

    /// Set a line's quantity directly; values below 1 clamp to 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] for an unknown line id.
    pub fn set_quantity(&mut self, id: &CartLineId, quantity: u32) -> Result<u32, CartError> {
        let line = self.line_mut(id)?;
        line.quantity = quantity.max(1);
        Ok(line.quantity)
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] for an unknown line id.
    pub fn remove(&mut self, id: &CartLineId) -> Result<CartLine, CartError> {
        let pos = self
            .lines
            .iter()
            .position(|line| line.id == *id)
            .ok_or(CartError::LineNotFound(*id))?;
        let line = self.lines.remove(pos);
        debug!(product = %line.product_id, "removed cart line");
        Ok(line)
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        debug!(lines = self.lines.len(), "cleared cart");
        self.lines.clear();
    }

    /// All lines in add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines (the tab-bar badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Sum of price × quantity across lines.
    ///
    /// A line whose product no longer resolves contributes zero rather than
    /// failing the whole computation.
    #[must_use]
    pub fn subtotal(&self, catalog: &Catalog) -> Decimal {
        self.lines
            .iter()
            .map(|line| {
                catalog
                    .get(&line.product_id)
                    .map_or(Decimal::ZERO, |product| {
                        product.price.amount * Decimal::from(line.quantity)
                    })
            })
            .sum()
    }

    /// A single line's price × quantity, if both line and product resolve.
    #[must_use]
    pub fn line_subtotal(&self, catalog: &Catalog, id: &CartLineId) -> Option<Decimal> {
        let line = self.line(id)?;
        let product = catalog.get(&line.product_id)?;
        Some(product.price.amount * Decimal::from(line.quantity))
    }
}
