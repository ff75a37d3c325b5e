//! Integration tests for Kirana.
//!
//! These drive whole user journeys through the public API only: sign in with
//! an OTP, browse, fill the cart, check out, sign out. Everything runs
//! in-process with the mock identity provider set to zero latency.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kirana-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use kirana_core::ProductId;
    use kirana_shop::catalog::query::{Availability, CatalogQuery, SortKey};
    use kirana_shop::checkout::ShippingForm;
    use kirana_shop::config::{AuthConfig, ShopConfig};
    use kirana_shop::services::auth::{AuthService, ContactKind, NewUser};
    use kirana_shop::state::App;

    /// App with zero simulated latency.
    fn app() -> App {
        let config = ShopConfig {
            auth: AuthConfig::instant(),
            ..ShopConfig::default()
        };
        App::new(config)
    }

    fn shipping() -> ShippingForm {
        ShippingForm {
            name: "Asha Rao".to_owned(),
            email: "asha@example.com".to_owned(),
            phone: "9876543210".to_owned(),
            address: "12 MG Road".to_owned(),
            city: "Bengaluru".to_owned(),
            pincode: "560001".to_owned(),
        }
    }

    #[tokio::test]
    async fn otp_signup_to_checkout_journey() {
        let mut app = app();

        // Sign up: request an OTP, verify it, create the account.
        let challenge = app
            .auth()
            .generate_otp("asha@example.com", ContactKind::Email)
            .await
            .unwrap();
        let verification = app
            .auth()
            .verify_otp(challenge.code.as_str(), &challenge)
            .await;
        assert!(verification.success);

        let user = app
            .auth()
            .create_user(NewUser {
                name: "Asha Rao".to_owned(),
                email: Some("asha@example.com".to_owned()),
                phone: None,
            })
            .await
            .unwrap();
        app.login(user);
        assert!(app.session().is_logged_in());

        // Browse popular in-stock products and take the top two.
        let mut query = CatalogQuery::new();
        query.sort = SortKey::Popularity;
        query.availability.insert(Availability::InStock);
        let picks: Vec<ProductId> = app
            .browse(&query)
            .into_iter()
            .take(2)
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(picks.len(), 2);

        // Fill the cart.
        for id in &picks {
            app.add_to_cart(id, 1).unwrap();
        }
        assert_eq!(app.session().cart().total_quantity(), 2);

        // Check out: cart clears, identity holds.
        let order = app.checkout().unwrap();
        assert!(app.session().cart().is_empty());
        assert_eq!(order.lines.len(), 2);
        assert_eq!(
            order.totals.total,
            order.totals.subtotal + order.totals.tax + order.totals.shipping
        );
        assert_eq!(order.totals.shipping, Decimal::ZERO);

        // Still signed in after checkout.
        assert!(app.session().is_logged_in());
    }

    #[tokio::test]
    async fn wrong_otp_blocks_then_retry_succeeds() {
        let app = app();

        let challenge = app
            .auth()
            .generate_otp("9876543210", ContactKind::Phone)
            .await
            .unwrap();

        let wrong = app.auth().verify_otp("000000", &challenge).await;
        assert!(!wrong.success);
        assert_eq!(wrong.message, "Invalid OTP. Please try again.");

        // Re-entry with the right code recovers.
        let right = app
            .auth()
            .verify_otp(challenge.code.as_str(), &challenge)
            .await;
        assert!(right.success);
    }

    #[tokio::test]
    async fn logout_tears_down_cart_and_user() {
        let mut app = app();

        let user = app
            .auth()
            .login_user("asha@example.com", ContactKind::Email)
            .await
            .unwrap();
        app.login(user);

        let product = app.catalog().products().first().unwrap().id.clone();
        app.add_to_cart(&product, 3).unwrap();
        assert!(!app.session().cart().is_empty());

        app.logout();

        assert!(!app.session().is_logged_in());
        assert!(app.session().cart().is_empty());
    }

    #[tokio::test]
    async fn google_sign_in_journey() {
        let mut app = app();

        let user = app.auth().google_sign_in().await.unwrap();
        assert_eq!(user.name, "Google User");
        app.login(user);
        assert!(app.session().is_logged_in());
    }

    #[tokio::test]
    async fn buy_now_uses_gst_and_leaves_cart_alone() {
        let mut app = app();

        let cart_product = app.catalog().products().first().unwrap().id.clone();
        app.add_to_cart(&cart_product, 1).unwrap();

        let direct_product = app.catalog().products().get(1).unwrap().clone();
        let order = app
            .buy_now(&direct_product.id, 2, &shipping())
            .unwrap();

        // GST at 18% plus the flat shipping fee, exact identity.
        let subtotal = direct_product.price.amount * Decimal::from(2);
        assert_eq!(order.totals.subtotal, subtotal);
        assert_eq!(order.totals.tax, subtotal * Decimal::new(18, 2));
        assert_eq!(order.totals.shipping, Decimal::from(50));
        assert_eq!(
            order.totals.total,
            subtotal + order.totals.tax + order.totals.shipping
        );
        assert!(order.shipping.is_some());

        // The session cart is untouched by a direct order.
        assert_eq!(app.session().cart().total_quantity(), 1);
    }

    #[tokio::test]
    async fn cart_and_direct_tax_rates_diverge() {
        let mut app = app();
        let product = app.catalog().products().first().unwrap().clone();

        app.add_to_cart(&product.id, 1).unwrap();
        let cart_order = app.checkout().unwrap();
        let direct_order = app.buy_now(&product.id, 1, &shipping()).unwrap();

        // Same product, same quantity: the two flows price differently today.
        assert_eq!(cart_order.totals.subtotal, direct_order.totals.subtotal);
        assert!(cart_order.totals.tax < direct_order.totals.tax);
        assert_eq!(cart_order.totals.shipping, Decimal::ZERO);
        assert_eq!(direct_order.totals.shipping, Decimal::from(50));
    }

    #[tokio::test]
    async fn deterministic_provider_can_replace_the_mock() {
        // The trait seam: a custom provider slots under the same service.
        use chrono::Utc;
        use kirana_core::{Email, Phone, UserId};
        use kirana_shop::models::User;
        use kirana_shop::services::auth::{Contact, IdentityProvider, OtpCode};

        struct NeverExists;

        impl IdentityProvider for NeverExists {
            async fn generate_code(&self, _contact: &Contact) -> OtpCode {
                OtpCode::new("123456")
            }

            async fn verify_code(&self, submitted: &str, expected: &OtpCode) -> bool {
                expected.matches(submitted)
            }

            async fn find_account(&self, _contact: &Contact) -> Option<User> {
                None
            }

            async fn create_account(
                &self,
                name: String,
                email: Option<Email>,
                phone: Option<Phone>,
            ) -> User {
                User {
                    id: UserId::new(),
                    name,
                    email,
                    phone,
                    created_at: Utc::now(),
                }
            }

            async fn google_account(&self) -> User {
                self.create_account("Google User".to_owned(), None, None)
                    .await
            }
        }

        let auth = AuthService::new(NeverExists);

        // No account ever exists, so lookup answers false...
        assert!(
            !auth
                .check_user_exists("asha@example.com", ContactKind::Email)
                .await
                .unwrap()
        );

        // ...and login falls through to account creation.
        let user = auth
            .login_user("asha@example.com", ContactKind::Email)
            .await
            .unwrap();
        assert_eq!(user.name, "asha");

        // The service's OTP flow runs unchanged over the custom provider.
        let challenge = auth
            .generate_otp("asha@example.com", ContactKind::Email)
            .await
            .unwrap();
        assert_eq!(challenge.code.as_str(), "123456");
        assert!(auth.verify_otp("123456", &challenge).await.success);
        assert!(!auth.verify_otp("654321", &challenge).await.success);
    }
}
