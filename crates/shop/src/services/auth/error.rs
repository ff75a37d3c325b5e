//! Authentication error types.

use thiserror::Error;

use kirana_core::{EmailError, PhoneError};

/// Errors that can occur during authentication operations.
///
/// Every variant is a user-input validation failure: local, recoverable by
/// re-entry, and surfaced to the user as an alert message.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid phone number format.
    #[error("invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// Signup requires a non-empty name.
    #[error("name cannot be empty")]
    EmptyName,

    /// Signup requires an email or a phone number.
    #[error("an email or phone number is required")]
    MissingContact,
}
