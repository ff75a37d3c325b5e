//! Order total computation.
//!
//! Pure decimal arithmetic; the identity `total = subtotal + tax + shipping`
//! holds exactly. The two checkout flows deliberately apply different tax
//! rates (see [`crate::config::PricingConfig`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kirana_core::Price;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::config::PricingConfig;

/// The money breakdown of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of price × quantity.
    pub subtotal: Decimal,
    /// Tax on the subtotal.
    pub tax: Decimal,
    /// Flat shipping fee; zero for cart checkout.
    pub shipping: Decimal,
    /// Grand total.
    pub total: Decimal,
}

impl OrderTotals {
    fn from_parts(subtotal: Decimal, tax_rate: Decimal, shipping: Decimal) -> Self {
        let tax = subtotal * tax_rate;
        Self {
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }
}

/// Price a cart checkout: the cart tax rate, no shipping.
#[must_use]
pub fn price_cart(cart: &Cart, catalog: &Catalog, pricing: &PricingConfig) -> OrderTotals {
    OrderTotals::from_parts(
        cart.subtotal(catalog),
        pricing.cart_tax_rate,
        Decimal::ZERO,
    )
}

/// Price a direct order: the GST rate plus the flat shipping fee.
#[must_use]
pub fn price_direct(unit_price: Price, quantity: u32, pricing: &PricingConfig) -> OrderTotals {
    let subtotal = unit_price.amount * Decimal::from(quantity.max(1));
    OrderTotals::from_parts(subtotal, pricing.order_tax_rate, pricing.shipping_fee)
}
