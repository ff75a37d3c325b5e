//! Application state shared across screens.
//!
//! [`App`] wires configuration, the seeded catalog, the services, and the
//! session into one handle. Screens hold it for the app's lifetime and call
//! the high-level operations below; everything is single-threaded and
//! event-driven, so no locking is involved.

use tracing::info;

use kirana_core::{CartLineId, ProductId};

use crate::catalog::query::CatalogQuery;
use crate::catalog::{Catalog, Product};
use crate::checkout::{CheckoutService, Order, ShippingForm};
use crate::config::{ConfigError, ShopConfig};
use crate::error::Result;
use crate::models::User;
use crate::services::auth::{AuthService, MockIdentityProvider};
use crate::session::Session;

/// Application state: config, catalog, services, and session.
#[derive(Debug)]
pub struct App {
    config: ShopConfig,
    catalog: Catalog,
    auth: AuthService<MockIdentityProvider>,
    checkout: CheckoutService,
    session: Session,
}

impl App {
    /// Build the app from environment configuration with the demo catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a set environment variable is invalid.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(ShopConfig::from_env()?))
    }

    /// Build the app with the demo catalog.
    #[must_use]
    pub fn new(config: ShopConfig) -> Self {
        Self::with_catalog(config, Catalog::demo())
    }

    /// Build the app with a specific catalog.
    #[must_use]
    pub fn with_catalog(config: ShopConfig, catalog: Catalog) -> Self {
        info!(products = catalog.len(), "app state initialized");
        let auth = AuthService::mock(config.auth.clone());
        let checkout = CheckoutService::new(config.pricing.clone());
        Self {
            config,
            catalog,
            auth,
            checkout,
            session: Session::new(),
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// The product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The authentication service.
    #[must_use]
    pub const fn auth(&self) -> &AuthService<MockIdentityProvider> {
        &self.auth
    }

    /// The session state.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session state, for screens that drive it directly.
    pub const fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    // =========================================================================
    // High-level operations
    // =========================================================================

    /// Run the catalog query pipeline.
    #[must_use]
    pub fn browse(&self, query: &CatalogQuery) -> Vec<&Product> {
        self.catalog.query(query)
    }

    /// Add a product to the session cart.
    ///
    /// # Errors
    ///
    /// Returns a cart error if the product does not resolve.
    pub fn add_to_cart(&mut self, product_id: &ProductId, quantity: u32) -> Result<CartLineId> {
        let id = self
            .session
            .cart_mut()
            .add(&self.catalog, product_id, quantity)?;
        Ok(id)
    }

    /// Check out the session cart. Clears the cart on success.
    ///
    /// # Errors
    ///
    /// Returns a checkout error for an empty cart.
    pub fn checkout(&mut self) -> Result<Order> {
        let order = self
            .checkout
            .checkout_cart(self.session.cart_mut(), &self.catalog)?;
        Ok(order)
    }

    /// Place a direct order for one product; the cart is untouched.
    ///
    /// # Errors
    ///
    /// Returns a checkout error for a bad shipping form or an unresolvable
    /// product.
    pub fn buy_now(
        &self,
        product_id: &ProductId,
        quantity: u32,
        shipping: &ShippingForm,
    ) -> Result<Order> {
        let order =
            self.checkout
                .place_direct_order(&self.catalog, product_id, quantity, shipping)?;
        Ok(order)
    }

    /// Sign a user into the session.
    pub fn login(&mut self, user: User) {
        self.session.login(user);
    }

    /// Sign out, tearing down session state.
    pub fn logout(&mut self) {
        self.session.logout();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(ShopConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_default_seeds_demo_catalog() {
        let app = App::default();
        assert!(!app.catalog().is_empty());
        assert!(!app.session().is_logged_in());
    }

    #[test]
    fn test_add_to_cart_and_checkout() {
        let mut app = App::default();
        let product_id = app.catalog().products().first().unwrap().id.clone();

        app.add_to_cart(&product_id, 2).unwrap();
        assert_eq!(app.session().cart().total_quantity(), 2);

        let order = app.checkout().unwrap();
        assert_eq!(order.lines.len(), 1);
        assert!(app.session().cart().is_empty());
    }

    #[test]
    fn test_checkout_empty_cart_surfaces_screen_copy() {
        let mut app = App::default();
        let err = app.checkout().unwrap_err();
        assert_eq!(
            err.user_message(),
            "Please add some items to your cart before checkout."
        );
    }

    #[test]
    fn test_browse_delegates_to_pipeline() {
        let app = App::default();
        let results = app.browse(&CatalogQuery::new());
        assert_eq!(results.len(), app.catalog().len());
    }
}
