//! Shop configuration loaded from environment variables.
//!
//! Every value has a default matching the shipped app, so configuration is
//! entirely optional; the environment only exists to tweak behavior in
//! development (e.g., zeroing the simulated network delays).
//!
//! # Environment Variables
//!
//! - `KIRANA_CART_TAX_RATE` - Tax rate for cart checkout (default: 0.08)
//! - `KIRANA_ORDER_TAX_RATE` - GST rate for direct orders (default: 0.18)
//! - `KIRANA_SHIPPING_FEE` - Flat shipping fee for direct orders (default: 50)
//! - `KIRANA_AUTH_SEND_DELAY_MS` - Simulated OTP delivery latency (default: 1000)
//! - `KIRANA_AUTH_VERIFY_DELAY_MS` - Simulated OTP verification latency (default: 1000)
//! - `KIRANA_AUTH_LOOKUP_DELAY_MS` - Simulated account lookup latency (default: 500)
//! - `KIRANA_AUTH_ACCOUNT_DELAY_MS` - Simulated create/login latency (default: 1000)
//! - `KIRANA_AUTH_GOOGLE_DELAY_MS` - Simulated Google sign-in latency (default: 1500)

use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Environment variable {0} out of range: {1}")]
    OutOfRange(String, String),
}

/// Shop application configuration.
#[derive(Debug, Clone, Default)]
pub struct ShopConfig {
    /// Tax rates and fees for the two checkout flows.
    pub pricing: PricingConfig,
    /// Simulated latencies for the mock identity provider.
    pub auth: AuthConfig,
}

/// Pricing configuration.
///
/// The cart checkout and the direct buy-now flow apply different tax rates.
/// That divergence ships in the app today; both rates are surfaced here
/// rather than unified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    /// Tax rate applied when checking out the cart.
    pub cart_tax_rate: Decimal,
    /// GST rate applied when placing a direct order.
    pub order_tax_rate: Decimal,
    /// Flat shipping fee charged only on direct orders.
    pub shipping_fee: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            cart_tax_rate: Decimal::new(8, 2),
            order_tax_rate: Decimal::new(18, 2),
            shipping_fee: Decimal::from(50),
        }
    }
}

/// Simulated latencies for the mock identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Delay before an OTP "arrives".
    pub send_delay: Duration,
    /// Delay before a verification result comes back.
    pub verify_delay: Duration,
    /// Delay for the account existence lookup.
    pub lookup_delay: Duration,
    /// Delay for account creation and login.
    pub account_delay: Duration,
    /// Delay for the Google sign-in round trip.
    pub google_delay: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            send_delay: Duration::from_millis(1000),
            verify_delay: Duration::from_millis(1000),
            lookup_delay: Duration::from_millis(500),
            account_delay: Duration::from_millis(1000),
            google_delay: Duration::from_millis(1500),
        }
    }
}

impl AuthConfig {
    /// All delays zeroed. Useful for tests and scripted demos.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            send_delay: Duration::ZERO,
            verify_delay: Duration::ZERO,
            lookup_delay: Duration::ZERO,
            account_delay: Duration::ZERO,
            google_delay: Duration::ZERO,
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Unset
    /// variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse or is out of
    /// range (rates must be in `[0, 1)`, amounts non-negative).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            pricing: PricingConfig::from_env()?,
            auth: AuthConfig::from_env()?,
        })
    }
}

impl PricingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            cart_tax_rate: parse_rate("KIRANA_CART_TAX_RATE", defaults.cart_tax_rate)?,
            order_tax_rate: parse_rate("KIRANA_ORDER_TAX_RATE", defaults.order_tax_rate)?,
            shipping_fee: parse_amount("KIRANA_SHIPPING_FEE", defaults.shipping_fee)?,
        })
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            send_delay: parse_millis("KIRANA_AUTH_SEND_DELAY_MS", defaults.send_delay)?,
            verify_delay: parse_millis("KIRANA_AUTH_VERIFY_DELAY_MS", defaults.verify_delay)?,
            lookup_delay: parse_millis("KIRANA_AUTH_LOOKUP_DELAY_MS", defaults.lookup_delay)?,
            account_delay: parse_millis("KIRANA_AUTH_ACCOUNT_DELAY_MS", defaults.account_delay)?,
            google_delay: parse_millis("KIRANA_AUTH_GOOGLE_DELAY_MS", defaults.google_delay)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a tax rate from the environment, falling back to a default.
fn parse_rate(key: &str, default: Decimal) -> Result<Decimal, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => validate_rate(key, &raw),
        Err(_) => Ok(default),
    }
}

/// Parse a non-negative amount from the environment, falling back to a default.
fn parse_amount(key: &str, default: Decimal) -> Result<Decimal, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => validate_amount(key, &raw),
        Err(_) => Ok(default),
    }
}

/// Parse a millisecond duration from the environment, falling back to a default.
fn parse_millis(key: &str, default: Duration) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => validate_millis(key, &raw),
        Err(_) => Ok(default),
    }
}

/// Validate a raw rate string: a decimal in `[0, 1)`.
fn validate_rate(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    let rate = raw
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))?;
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(ConfigError::OutOfRange(
            key.to_owned(),
            format!("rate {rate} must be in [0, 1)"),
        ));
    }
    Ok(rate)
}

/// Validate a raw amount string: a non-negative decimal.
fn validate_amount(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    let amount = raw
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))?;
    if amount < Decimal::ZERO {
        return Err(ConfigError::OutOfRange(
            key.to_owned(),
            format!("amount {amount} must be non-negative"),
        ));
    }
    Ok(amount)
}

/// Validate a raw milliseconds string.
fn validate_millis(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let millis = raw
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))?;
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let pricing = PricingConfig::default();
        assert_eq!(pricing.cart_tax_rate, Decimal::new(8, 2));
        assert_eq!(pricing.order_tax_rate, Decimal::new(18, 2));
        assert_eq!(pricing.shipping_fee, Decimal::from(50));
    }

    #[test]
    fn test_default_delays() {
        let auth = AuthConfig::default();
        assert_eq!(auth.send_delay, Duration::from_millis(1000));
        assert_eq!(auth.google_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_instant_delays() {
        let auth = AuthConfig::instant();
        assert_eq!(auth.send_delay, Duration::ZERO);
        assert_eq!(auth.verify_delay, Duration::ZERO);
    }

    #[test]
    fn test_validate_rate_valid() {
        assert_eq!(validate_rate("TEST", "0.08").unwrap(), Decimal::new(8, 2));
        assert_eq!(validate_rate("TEST", "0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_validate_rate_rejects_garbage() {
        assert!(matches!(
            validate_rate("TEST", "eight percent"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_validate_rate_rejects_out_of_range() {
        assert!(matches!(
            validate_rate("TEST", "1.0"),
            Err(ConfigError::OutOfRange(_, _))
        ));
        assert!(matches!(
            validate_rate("TEST", "-0.05"),
            Err(ConfigError::OutOfRange(_, _))
        ));
    }

    #[test]
    fn test_validate_amount_rejects_negative() {
        assert!(matches!(
            validate_amount("TEST", "-50"),
            Err(ConfigError::OutOfRange(_, _))
        ));
        assert_eq!(validate_amount("TEST", "50").unwrap(), Decimal::from(50));
    }

    #[test]
    fn test_validate_millis() {
        assert_eq!(
            validate_millis("TEST", "250").unwrap(),
            Duration::from_millis(250)
        );
        assert!(matches!(
            validate_millis("TEST", "fast"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }
}
