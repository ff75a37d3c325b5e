//! User domain types.
//!
//! A user exists only inside a signed-in session; nothing is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kirana_core::{Email, Phone, UserId};

/// A signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID, minted when the account is created.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, if the account was created with one.
    pub email: Option<Email>,
    /// Phone number, if the account was created with one.
    pub phone: Option<Phone>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The contact string shown on the profile screen.
    #[must_use]
    pub fn contact_display(&self) -> String {
        self.email
            .as_ref()
            .map(ToString::to_string)
            .or_else(|| self.phone.as_ref().map(ToString::to_string))
            .unwrap_or_default()
    }

    /// Merge a partial profile update into the user.
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
    }
}

/// A partial profile update from the profile screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<Phone>,
}
