//! Unified error handling.
//!
//! Module-level errors fold into [`AppError`] at the crate boundary. The
//! mobile shell surfaces failures as blocking alerts, so every variant maps
//! to a user-facing message via [`AppError::user_message`]; internal detail
//! stays in the `Display`/`Error` chain for logs.

use thiserror::Error;

use crate::cart::CartError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;

/// Application-level error type for the shop services.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout operation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration failed to load.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// The alert text shown to the user.
    ///
    /// Mirrors the copy the shipped screens alert with; never leaks
    /// internals.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Cart(err) => match err {
                CartError::UnknownProduct(_) => "This product is no longer available.".to_owned(),
                CartError::LineNotFound(_) => "That item is no longer in your cart.".to_owned(),
            },
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => {
                    "Please add some items to your cart before checkout.".to_owned()
                }
                CheckoutError::UnknownProduct(_) => {
                    "This product is no longer available.".to_owned()
                }
                CheckoutError::MissingShippingField(_) => {
                    "Please fill in all shipping information".to_owned()
                }
                CheckoutError::InvalidEmail(_) => {
                    "Please enter a valid email address".to_owned()
                }
                CheckoutError::InvalidPhone(_) => {
                    "Please enter a valid 10-digit phone number".to_owned()
                }
            },
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) => "Please enter a valid email address".to_owned(),
                AuthError::InvalidPhone(_) => {
                    "Please enter a valid 10-digit phone number".to_owned()
                }
                AuthError::EmptyName => "Please enter your full name".to_owned(),
                AuthError::MissingContact => {
                    "Please enter your email or phone number".to_owned()
                }
            },
            Self::Config(_) => "Something went wrong. Please restart the app.".to_owned(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
