//! Checkout flows.
//!
//! Two paths produce an [`Order`]:
//!
//! - **Cart checkout** prices the whole cart at the cart tax rate with no
//!   shipping fee and clears the cart on success.
//! - **Direct order** ("buy now" from a product page) prices a single product
//!   at the GST rate plus a flat shipping fee and requires shipping details.
//!
//! The two rates differ in the shipped app; the divergence is preserved and
//! both are configurable.

mod pricing;

pub use pricing::{OrderTotals, price_cart, price_direct};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use kirana_core::{Email, EmailError, OrderId, Phone, PhoneError, Price, ProductId};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::config::PricingConfig;

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Cart checkout requires at least one line.
    #[error("cart is empty")]
    EmptyCart,

    /// A product id did not resolve into the catalog.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// A required shipping field was left blank.
    #[error("missing shipping field: {0}")]
    MissingShippingField(&'static str),

    /// The shipping email is malformed.
    #[error("invalid shipping email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The shipping phone number is malformed.
    #[error("invalid shipping phone: {0}")]
    InvalidPhone(#[from] PhoneError),
}

/// Shipping form input, as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
}

/// Validated shipping details carried on a direct order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub name: String,
    pub email: Email,
    pub phone: Phone,
    pub address: String,
    pub city: String,
    pub pincode: String,
}

impl ShippingForm {
    /// Validate the form: every field required, email and phone well-formed.
    ///
    /// # Errors
    ///
    /// Returns the first failing field so the screen can alert on it.
    pub fn validate(&self) -> Result<ShippingDetails, CheckoutError> {
        let name = required(&self.name, "name")?;
        let email_raw = required(&self.email, "email")?;
        let phone_raw = required(&self.phone, "phone")?;
        let address = required(&self.address, "address")?;
        let city = required(&self.city, "city")?;
        let pincode = required(&self.pincode, "pincode")?;

        Ok(ShippingDetails {
            name,
            email: Email::parse(&email_raw)?,
            phone: Phone::parse(&phone_raw)?,
            address,
            city,
            pincode,
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CheckoutError::MissingShippingField(field));
    }
    Ok(trimmed.to_owned())
}

/// A snapshot of one purchased product.
///
/// Orders copy the name and unit price so they stay meaningful even if a
/// future catalog revision changes the product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub lines: Vec<OrderLine>,
    pub totals: OrderTotals,
    /// Present only on direct orders.
    pub shipping: Option<ShippingDetails>,
    pub placed_at: DateTime<Utc>,
}

/// Checkout service.
///
/// Stateless apart from the pricing configuration; both flows read the
/// catalog and (for cart checkout) consume the cart.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    pricing: PricingConfig,
}

impl CheckoutService {
    /// Create a checkout service with the given pricing configuration.
    #[must_use]
    pub const fn new(pricing: PricingConfig) -> Self {
        Self { pricing }
    }

    /// Check out the whole cart.
    ///
    /// On success the cart is cleared (checkout confirmation destroys the
    /// cart contents) and the order is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for an empty cart and
    /// [`CheckoutError::UnknownProduct`] if a line no longer resolves.
    #[instrument(skip_all)]
    pub fn checkout_cart(
        &self,
        cart: &mut Cart,
        catalog: &Catalog,
    ) -> Result<Order, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut lines = Vec::with_capacity(cart.lines().len());
        for line in cart.lines() {
            let product = catalog
                .get(&line.product_id)
                .ok_or_else(|| CheckoutError::UnknownProduct(line.product_id.clone()))?;
            lines.push(OrderLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                unit_price: product.price,
                quantity: line.quantity,
            });
        }

        let totals = pricing::price_cart(cart, catalog, &self.pricing);
        cart.clear();

        let order = Order {
            id: OrderId::new(),
            lines,
            totals,
            shipping: None,
            placed_at: Utc::now(),
        };
        info!(order = %order.id, total = %order.totals.total, "cart checkout complete");
        Ok(order)
    }

    /// Place a direct order for a single product.
    ///
    /// Validates the shipping form, prices at the GST rate plus the flat
    /// shipping fee, and leaves the cart untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownProduct`] for an unresolvable product
    /// and shipping validation errors for a bad form.
    #[instrument(skip_all, fields(product = %product_id))]
    pub fn place_direct_order(
        &self,
        catalog: &Catalog,
        product_id: &ProductId,
        quantity: u32,
        shipping: &ShippingForm,
    ) -> Result<Order, CheckoutError> {
        let details = shipping.validate()?;
        let product = catalog
            .get(product_id)
            .ok_or_else(|| CheckoutError::UnknownProduct(product_id.clone()))?;

        let quantity = quantity.max(1);
        let totals = pricing::price_direct(product.price, quantity, &self.pricing);

        let order = Order {
            id: OrderId::new(),
            lines: vec![OrderLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                unit_price: product.price,
                quantity,
            }],
            totals,
            shipping: Some(details),
            placed_at: Utc::now(),
        };
        info!(order = %order.id, total = %order.totals.total, "direct order placed");
        Ok(order)
    }
}
