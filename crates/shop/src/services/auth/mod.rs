//! Mock authentication service.
//!
//! The identity capability is a trait ([`IdentityProvider`]) so that a real
//! backend can replace the mock without touching the screens.
//! [`MockIdentityProvider`] is the only implementation shipped: it generates
//! random six-digit codes, flips a coin for "does this account exist", and
//! fabricates accounts that always succeed after a simulated network delay.
//!
//! No credentials are stored, nothing is hashed, and no OTP is actually
//! delivered anywhere.

mod error;

pub use error::AuthError;

use core::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{info, instrument};

use kirana_core::{Email, Phone, UserId};

use crate::config::AuthConfig;
use crate::models::User;

/// Which contact channel the user typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Email,
    Phone,
}

impl ContactKind {
    /// Channel name used in user-facing messages ("email" / "phone").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

/// A validated contact: where an OTP would be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    Email(Email),
    Phone(Phone),
}

impl Contact {
    /// Parse and validate a raw contact string.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] or [`AuthError::InvalidPhone`] for
    /// a malformed value.
    pub fn parse(raw: &str, kind: ContactKind) -> Result<Self, AuthError> {
        match kind {
            ContactKind::Email => Ok(Self::Email(Email::parse(raw)?)),
            ContactKind::Phone => Ok(Self::Phone(Phone::parse(raw)?)),
        }
    }

    /// The channel this contact belongs to.
    #[must_use]
    pub const fn kind(&self) -> ContactKind {
        match self {
            Self::Email(_) => ContactKind::Email,
            Self::Phone(_) => ContactKind::Phone,
        }
    }

    /// Display name derived from the contact: the email local part, or the
    /// phone number itself.
    #[must_use]
    pub fn derived_name(&self) -> String {
        match self {
            Self::Email(email) => email.local_part().to_owned(),
            Self::Phone(phone) => phone.as_str().to_owned(),
        }
    }

    /// The email, if this contact is one.
    #[must_use]
    pub const fn email(&self) -> Option<&Email> {
        match self {
            Self::Email(email) => Some(email),
            Self::Phone(_) => None,
        }
    }

    /// The phone, if this contact is one.
    #[must_use]
    pub const fn phone(&self) -> Option<&Phone> {
        match self {
            Self::Email(_) => None,
            Self::Phone(phone) => Some(phone),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(email) => write!(f, "{email}"),
            Self::Phone(phone) => write!(f, "{phone}"),
        }
    }
}

/// A six-digit one-time passcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Number of digits in a code.
    pub const LENGTH: usize = 6;

    /// Wrap a code value. Providers mint these.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a submitted string matches this code exactly.
    #[must_use]
    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An issued OTP challenge.
///
/// The generated code rides along in the challenge; there is no delivery
/// channel in the mock, so the caller (and the dev console) can see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Where the code was "sent".
    pub contact: Contact,
    /// The expected code.
    pub code: OtpCode,
    /// User-facing confirmation message.
    pub message: String,
    /// When the challenge was issued.
    pub issued_at: DateTime<Utc>,
}

/// The outcome of an OTP verification.
///
/// A mismatch is a normal value, never an error: the screen shows the
/// message and lets the user retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerification {
    /// Whether the submitted code matched.
    pub success: bool,
    /// User-facing result message.
    pub message: String,
}

/// Signup form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// The identity capability behind the auth flows.
///
/// A real backend would implement this against an actual identity provider;
/// the screens only ever see [`AuthService`].
pub trait IdentityProvider {
    /// Generate (and notionally deliver) a fresh code for a contact.
    async fn generate_code(&self, contact: &Contact) -> OtpCode;

    /// Check a submitted code against the expected one.
    async fn verify_code(&self, submitted: &str, expected: &OtpCode) -> bool;

    /// Look up an account by contact.
    async fn find_account(&self, contact: &Contact) -> Option<User>;

    /// Create an account. Always succeeds in the mock.
    async fn create_account(
        &self,
        name: String,
        email: Option<Email>,
        phone: Option<Phone>,
    ) -> User;

    /// Complete a Google sign-in round trip.
    async fn google_account(&self) -> User;
}

/// The shipped provider: random codes, coin-flip lookups, timed delays.
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    config: AuthConfig,
}

impl MockIdentityProvider {
    /// Create a provider with the given simulated latencies.
    #[must_use]
    pub const fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    fn fabricate_user(contact: &Contact) -> User {
        User {
            id: UserId::new(),
            name: contact.derived_name(),
            email: contact.email().cloned(),
            phone: contact.phone().cloned(),
            created_at: Utc::now(),
        }
    }
}

impl IdentityProvider for MockIdentityProvider {
    async fn generate_code(&self, _contact: &Contact) -> OtpCode {
        sleep(self.config.send_delay).await;
        let code = rand::rng().random_range(100_000..1_000_000_u32);
        OtpCode::new(code.to_string())
    }

    async fn verify_code(&self, submitted: &str, expected: &OtpCode) -> bool {
        sleep(self.config.verify_delay).await;
        expected.matches(submitted)
    }

    async fn find_account(&self, contact: &Contact) -> Option<User> {
        sleep(self.config.lookup_delay).await;
        // No account store exists; flip a coin like the prototype backend.
        if rand::rng().random_bool(0.5) {
            Some(Self::fabricate_user(contact))
        } else {
            None
        }
    }

    async fn create_account(
        &self,
        name: String,
        email: Option<Email>,
        phone: Option<Phone>,
    ) -> User {
        sleep(self.config.account_delay).await;
        User {
            id: UserId::new(),
            name,
            email,
            phone,
            created_at: Utc::now(),
        }
    }

    async fn google_account(&self) -> User {
        sleep(self.config.google_delay).await;
        User {
            id: UserId::new(),
            name: "Google User".to_owned(),
            email: Email::parse("user@gmail.com").ok(),
            phone: None,
            created_at: Utc::now(),
        }
    }
}

/// Authentication service.
///
/// Validates user input, delegates the identity work to the provider, and
/// shapes results the way the screens expect.
#[derive(Debug, Clone)]
pub struct AuthService<P = MockIdentityProvider> {
    provider: P,
}

impl AuthService<MockIdentityProvider> {
    /// An auth service backed by the mock provider.
    #[must_use]
    pub const fn mock(config: AuthConfig) -> Self {
        Self {
            provider: MockIdentityProvider::new(config),
        }
    }
}

impl<P: IdentityProvider> AuthService<P> {
    /// An auth service over an arbitrary provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Generate an OTP for a contact.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed contact; generation itself
    /// always succeeds.
    #[instrument(skip_all)]
    pub async fn generate_otp(
        &self,
        contact: &str,
        kind: ContactKind,
    ) -> Result<OtpChallenge, AuthError> {
        let contact = Contact::parse(contact, kind)?;
        let code = self.provider.generate_code(&contact).await;

        // The prototype logs the code to the dev console; keep that visible.
        info!(%contact, %code, "OTP sent");

        Ok(OtpChallenge {
            message: format!("OTP sent to your {}", contact.kind().as_str()),
            code,
            contact,
            issued_at: Utc::now(),
        })
    }

    /// Verify a submitted code against a challenge.
    ///
    /// Succeeds iff the submitted code equals the generated one. A mismatch
    /// (or a malformed submission) is a failure *value*, never an error.
    #[instrument(skip_all)]
    pub async fn verify_otp(&self, submitted: &str, challenge: &OtpChallenge) -> OtpVerification {
        let success = submitted.len() == OtpCode::LENGTH
            && self.provider.verify_code(submitted, &challenge.code).await;

        if success {
            OtpVerification {
                success: true,
                message: "OTP verified successfully".to_owned(),
            }
        } else {
            OtpVerification {
                success: false,
                message: "Invalid OTP. Please try again.".to_owned(),
            }
        }
    }

    /// Whether an account exists for a contact.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed contact.
    #[instrument(skip_all)]
    pub async fn check_user_exists(
        &self,
        contact: &str,
        kind: ContactKind,
    ) -> Result<bool, AuthError> {
        let contact = Contact::parse(contact, kind)?;
        Ok(self.provider.find_account(&contact).await.is_some())
    }

    /// Create an account from the signup form.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name, a missing contact, or a
    /// malformed email/phone.
    #[instrument(skip_all)]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, AuthError> {
        let name = new_user.name.trim();
        if name.is_empty() {
            return Err(AuthError::EmptyName);
        }

        let email = new_user
            .email
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(Email::parse)
            .transpose()?;
        let phone = new_user
            .phone
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(Phone::parse)
            .transpose()?;

        if email.is_none() && phone.is_none() {
            return Err(AuthError::MissingContact);
        }

        let user = self
            .provider
            .create_account(name.to_owned(), email, phone)
            .await;
        info!(user = %user.id, "account created");
        Ok(user)
    }

    /// Log in with a contact: look the account up, or create it.
    ///
    /// Always succeeds for a valid contact: the mock backend has no notion
    /// of a rejected login.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed contact.
    #[instrument(skip_all)]
    pub async fn login_user(&self, contact: &str, kind: ContactKind) -> Result<User, AuthError> {
        let contact = Contact::parse(contact, kind)?;

        let user = match self.provider.find_account(&contact).await {
            Some(existing) => existing,
            None => {
                self.provider
                    .create_account(
                        contact.derived_name(),
                        contact.email().cloned(),
                        contact.phone().cloned(),
                    )
                    .await
            }
        };
        info!(user = %user.id, "login complete");
        Ok(user)
    }

    /// Complete a Google sign-in.
    ///
    /// # Errors
    ///
    /// The mock never fails; the `Result` is the boundary a real provider
    /// would need.
    #[instrument(skip_all)]
    pub async fn google_sign_in(&self) -> Result<User, AuthError> {
        let user = self.provider.google_account().await;
        info!(user = %user.id, "google sign-in complete");
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> AuthService<MockIdentityProvider> {
        AuthService::mock(AuthConfig::instant())
    }

    /// Deterministic provider for exercising the service wiring.
    struct FixedProvider;

    impl IdentityProvider for FixedProvider {
        async fn generate_code(&self, _contact: &Contact) -> OtpCode {
            OtpCode::new("123456".to_owned())
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

    #[tokio::test]
    async fn test_generate_otp_is_six_digits() {
        let challenge = service()
            .generate_otp("asha@example.com", ContactKind::Email)
            .await
            .unwrap();

        assert_eq!(challenge.code.as_str().len(), OtpCode::LENGTH);
        assert!(challenge.code.as_str().chars().all(|c| c.is_ascii_digit()));
        assert_eq!(challenge.message, "OTP sent to your email");
    }

    #[tokio::test]
    async fn test_generate_otp_rejects_bad_contact() {
        let svc = service();
        assert!(matches!(
            svc.generate_otp("not-an-email", ContactKind::Email).await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            svc.generate_otp("12345", ContactKind::Phone).await,
            Err(AuthError::InvalidPhone(_))
        ));
    }

    #[tokio::test]
    async fn test_verify_otp_succeeds_iff_codes_match() {
        let svc = service();
        let challenge = svc
            .generate_otp("9876543210", ContactKind::Phone)
            .await
            .unwrap();

        let ok = svc.verify_otp(challenge.code.as_str(), &challenge).await;
        assert!(ok.success);
        assert_eq!(ok.message, "OTP verified successfully");

        let bad = svc.verify_otp("000000", &challenge).await;
        // One-in-a-million flake if the generated code is exactly 000000;
        // the generator never emits codes below 100000, so this is safe.
        assert!(!bad.success);
        assert_eq!(bad.message, "Invalid OTP. Please try again.");
    }

    #[tokio::test]
    async fn test_verify_otp_rejects_short_submission() {
        let svc = AuthService::new(FixedProvider);
        let challenge = svc
            .generate_otp("asha@example.com", ContactKind::Email)
            .await
            .unwrap();

        let result = svc.verify_otp("123", &challenge).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_check_user_exists_validates_contact() {
        let svc = service();
        assert!(svc.check_user_exists("x@y", ContactKind::Email).await.is_err());
        // Valid contact: either answer is fine, it must just not error.
        assert!(
            svc.check_user_exists("asha@example.com", ContactKind::Email)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_create_user_validations() {
        let svc = service();

        let empty_name = NewUser {
            name: "  ".to_owned(),
            email: Some("asha@example.com".to_owned()),
            phone: None,
        };
        assert!(matches!(
            svc.create_user(empty_name).await,
            Err(AuthError::EmptyName)
        ));

        let no_contact = NewUser {
            name: "Asha".to_owned(),
            email: None,
            phone: Some(String::new()),
        };
        assert!(matches!(
            svc.create_user(no_contact).await,
            Err(AuthError::MissingContact)
        ));

        let bad_phone = NewUser {
            name: "Asha".to_owned(),
            email: None,
            phone: Some("98-76".to_owned()),
        };
        assert!(matches!(
            svc.create_user(bad_phone).await,
            Err(AuthError::InvalidPhone(_))
        ));
    }

    #[tokio::test]
    async fn test_create_user_builds_account() {
        let svc = service();
        let user = svc
            .create_user(NewUser {
                name: "Asha Rao".to_owned(),
                email: Some("asha@example.com".to_owned()),
                phone: Some("9876543210".to_owned()),
            })
            .await
            .unwrap();

        assert_eq!(user.name, "Asha Rao");
        assert_eq!(user.email.unwrap().as_str(), "asha@example.com");
        assert_eq!(user.phone.unwrap().as_str(), "9876543210");
    }

    #[tokio::test]
    async fn test_login_derives_name_from_email_local_part() {
        let svc = service();
        let user = svc
            .login_user("asha@example.com", ContactKind::Email)
            .await
            .unwrap();

        // Found or created, the mock fabricates from the contact either way.
        assert_eq!(user.name, "asha");
        assert_eq!(user.email.unwrap().as_str(), "asha@example.com");
        assert!(user.phone.is_none());
    }

    #[tokio::test]
    async fn test_login_with_phone_keeps_number_as_name() {
        let svc = AuthService::new(FixedProvider);
        let user = svc
            .login_user("9876543210", ContactKind::Phone)
            .await
            .unwrap();
        assert_eq!(user.name, "9876543210");
        assert!(user.email.is_none());
    }

    #[tokio::test]
    async fn test_google_sign_in_fixed_profile() {
        let user = service().google_sign_in().await.unwrap();
        assert_eq!(user.name, "Google User");
        assert_eq!(user.email.unwrap().as_str(), "user@gmail.com");
    }
}
