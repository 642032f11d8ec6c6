//! # Session Operations
//!
//! Login, registration, logout, and profile editing.
//!
//! ## Identity Is a Mock
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Login Flow                                       │
//! │                                                                     │
//! │  login("hana@example.com", "anything")                              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Validate the email shape (name@domain) and nothing else; the       │
//! │  password is never looked at on sign-in.                            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Synthesize user: name = "hana", role = admin only for the one      │
//! │  designated address                                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Persist under `user` (log-and-continue), return the session view   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use seojae_core::session::ProfileUpdate;
use seojae_core::validation::{validate_email, validate_name, validate_password};
use seojae_core::{Role, User};
use seojae_store::keys;

use super::require_user;
use crate::error::ApiError;
use crate::state::{SessionState, StoreState};

// =============================================================================
// DTOs
// =============================================================================

/// User record for the UI shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl From<&User> for UserDto {
    fn from(u: &User) -> Self {
        UserDto {
            id: u.id.clone(),
            email: u.email.clone(),
            name: u.name.clone(),
            role: u.role,
        }
    }
}

/// The session as screens consume it: the record plus the two derived
/// booleans every screen branches on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub user: Option<UserDto>,
    pub is_authenticated: bool,
    pub is_admin: bool,
}

/// Partial profile edit input; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

fn snapshot(session: &SessionState) -> SessionView {
    session.with_session(|s| SessionView {
        user: s.current().map(UserDto::from),
        is_authenticated: s.is_authenticated(),
        is_admin: s.is_admin(),
    })
}

// =============================================================================
// Operations
// =============================================================================

/// The current session view.
pub fn get_session(session: &SessionState) -> SessionView {
    debug!("get_session");
    snapshot(session)
}

/// Signs in. Always succeeds for any syntactically valid email; the
/// password is ignored.
pub async fn login(
    store: &StoreState,
    session: &SessionState,
    email: &str,
    _password: &str,
) -> Result<SessionView, ApiError> {
    validate_email(email)?;

    let email = email.trim();
    let user = session.with_session_mut(|s| s.login(email).clone());
    info!(user_id = %user.id, admin = user.is_admin(), "Signed in");

    persist_user(store, &user).await;
    Ok(snapshot(session))
}

/// Registers a new account. Always succeeds once the input shape is valid.
pub async fn register(
    store: &StoreState,
    session: &SessionState,
    email: &str,
    password: &str,
    name: &str,
) -> Result<SessionView, ApiError> {
    validate_email(email)?;
    validate_password(password)?;
    validate_name(name)?;

    let email = email.trim();
    let name = name.trim();
    let user = session.with_session_mut(|s| s.register(email, name).clone());
    info!(user_id = %user.id, "Registered");

    persist_user(store, &user).await;
    Ok(snapshot(session))
}

/// Signs out: clears the in-memory session and deletes the persisted
/// identity.
pub async fn logout(store: &StoreState, session: &SessionState) -> SessionView {
    session.with_session_mut(|s| s.logout());
    info!("Signed out");

    if let Err(err) = store.inner().remove(keys::USER).await {
        warn!(error = %err, "Failed to delete persisted user");
    }
    snapshot(session)
}

/// Merges the provided fields into the current profile and persists.
pub async fn update_profile(
    store: &StoreState,
    session: &SessionState,
    input: ProfileInput,
) -> Result<SessionView, ApiError> {
    require_user(session)?;

    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }

    let update = ProfileUpdate {
        name: input.name.map(|n| n.trim().to_string()),
        email: input.email.map(|e| e.trim().to_string()),
    };
    let user = session.with_session_mut(|s| s.update_profile(update).cloned());

    if let Some(user) = user {
        info!(user_id = %user.id, "Profile updated");
        persist_user(store, &user).await;
    }
    Ok(snapshot(session))
}

/// Writes the user record under the `user` key, logging on failure.
///
/// Same log-and-continue policy as the cart: the in-memory session stays
/// authoritative for the running session.
async fn persist_user(store: &StoreState, user: &User) {
    if let Err(err) = store.inner().put(keys::USER, user).await {
        warn!(error = %err, "Failed to persist user; in-memory state kept");
    }
}
