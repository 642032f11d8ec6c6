//! # Session Container
//!
//! The current user identity, or anonymous.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Session Lifecycle                               │
//! │                                                                     │
//! │              login / register (always succeed)                      │
//! │   ┌───────────┐ ─────────────────────────────► ┌───────────────┐   │
//! │   │ anonymous │                                │ authenticated │   │
//! │   └───────────┘ ◄───────────────────────────── └───────────────┘   │
//! │                            logout                    │  ▲          │
//! │                                                      └──┘          │
//! │                                                update_profile      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Is a Mock
//! There is no password verification and no token lifecycle. `login`
//! synthesizes a user from the email itself: the display name is the
//! local-part, and the role is admin only for the one designated address.
//! The provider layer validates the email shape (and, at registration
//! only, the password length) before calling in here; the container
//! accepts unconditionally.

use uuid::Uuid;

use crate::types::{Role, User};
use crate::ADMIN_EMAIL;

// =============================================================================
// Profile Update
// =============================================================================

/// Partial profile edit; only the provided fields are merged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

// =============================================================================
// Session
// =============================================================================

/// The session container: at most one current user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// Creates an anonymous session.
    pub fn new() -> Self {
        Session { user: None }
    }

    /// Restores a session from a previously persisted user record.
    pub fn from_user(user: Option<User>) -> Self {
        Session { user }
    }

    /// Signs in with the given email. Always succeeds.
    ///
    /// ## Behavior
    /// - Display name is the email local-part (`hana@x.kr` → `hana`)
    /// - Role is admin only when the email equals the designated address
    /// - A fresh identifier is assigned on every login
    pub fn login(&mut self, email: &str) -> &User {
        let name = email.split('@').next().unwrap_or(email).to_string();
        let role = if email == ADMIN_EMAIL {
            Role::Admin
        } else {
            Role::User
        };
        self.user = Some(User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name,
            role,
        });
        self.user.as_ref().expect("user was just set")
    }

    /// Registers a new account. Always succeeds; the role is always
    /// `user`.
    pub fn register(&mut self, email: &str, name: &str) -> &User {
        self.user = Some(User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role: Role::User,
        });
        self.user.as_ref().expect("user was just set")
    }

    /// Clears the session back to anonymous.
    pub fn logout(&mut self) {
        self.user = None;
    }

    /// Merges the provided fields into the current user. Returns the
    /// updated record, or `None` when anonymous.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Option<&User> {
        let user = self.user.as_mut()?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        Some(user)
    }

    /// The current user, if any.
    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Derived: is anyone signed in?
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Derived: is the current user an admin?
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(User::is_admin).unwrap_or(false)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_synthesizes_user_from_email() {
        let mut session = Session::new();
        let user = session.login("hana@example.com");

        assert_eq!(user.name, "hana");
        assert_eq!(user.email, "hana@example.com");
        assert_eq!(user.role, Role::User);
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_only_designated_email_is_admin() {
        let mut session = Session::new();

        session.login(ADMIN_EMAIL);
        assert!(session.is_admin());

        // Close but not equal
        session.login("admin@example.org");
        assert!(!session.is_admin());
        session.login("Admin@example.com");
        assert!(!session.is_admin());
    }

    #[test]
    fn test_register_is_plain_user() {
        let mut session = Session::new();
        let user = session.register("park@books.kr", "박지민");

        assert_eq!(user.name, "박지민");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_logout_clears_session() {
        let mut session = Session::new();
        session.login("a@b.co");
        assert!(session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.current().is_none());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_update_profile_merges_only_given_fields() {
        let mut session = Session::new();
        session.login("hana@example.com");

        session.update_profile(ProfileUpdate {
            name: Some("김하나".to_string()),
            email: None,
        });

        let user = session.current().unwrap();
        assert_eq!(user.name, "김하나");
        assert_eq!(user.email, "hana@example.com");
    }

    #[test]
    fn test_update_profile_while_anonymous_is_none() {
        let mut session = Session::new();
        assert!(session
            .update_profile(ProfileUpdate {
                name: Some("x".to_string()),
                email: None,
            })
            .is_none());
    }
}
