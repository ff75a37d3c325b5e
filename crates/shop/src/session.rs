//! Session state.
//!
//! One [`Session`] exists per app run: the current user (if signed in) and
//! the cart. It is created at app start and mutated only by discrete UI
//! events on the single UI thread; logout tears the whole thing down.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::Cart;
use crate::models::{User, UserUpdate};

/// Session-scoped state: current user and cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    user: Option<User>,
    cart: Cart,
}

impl Session {
    /// A fresh signed-out session with an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign a user in.
    pub fn login(&mut self, user: User) {
        info!(user = %user.id, "session login");
        self.user = Some(user);
    }

    /// Sign out, dropping the user and clearing the cart.
    ///
    /// Cart contents are session property, so they do not survive a logout.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user = %user.id, "session logout");
        }
        self.cart.clear();
    }

    /// Merge a profile update into the signed-in user. No-op when signed out.
    pub fn update_user(&mut self, update: UserUpdate) {
        if let Some(user) = self.user.as_mut() {
            user.apply(update);
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// The session cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access to the session cart.
    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use chrono::Utc;
    use kirana_core::UserId;

    fn user(name: &str) -> User {
        User {
            id: UserId::new(),
            name: name.to_owned(),
            email: None,
            phone: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fresh_session_is_signed_out() {
        let session = Session::new();
        assert!(!session.is_logged_in());
        assert!(session.current_user().is_none());
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_login_sets_user() {
        let mut session = Session::new();
        session.login(user("Asha"));
        assert!(session.is_logged_in());
        assert_eq!(session.current_user().unwrap().name, "Asha");
    }

    #[test]
    fn test_logout_clears_user_and_cart() {
        let catalog = Catalog::demo();
        let mut session = Session::new();
        session.login(user("Asha"));
        session
            .cart_mut()
            .add(&catalog, &catalog.products().first().unwrap().id, 2)
            .unwrap();

        session.logout();

        assert!(!session.is_logged_in());
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_update_user_when_signed_out_is_noop() {
        let mut session = Session::new();
        session.update_user(UserUpdate {
            name: Some("Ghost".to_owned()),
            ..UserUpdate::default()
        });
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_update_user_merges() {
        let mut session = Session::new();
        session.login(user("Asha"));
        session.update_user(UserUpdate {
            name: Some("Asha Rao".to_owned()),
            ..UserUpdate::default()
        });
        assert_eq!(session.current_user().unwrap().name, "Asha Rao");
    }
}
