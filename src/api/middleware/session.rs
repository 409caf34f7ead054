//! Session middleware configuration.
//!
//! Sessions live in process memory; restarting the server logs everyone out.

use tower_sessions::cookie::{time::Duration, SameSite};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::{SessionSettings, SESSION_COOKIE_NAME};

/// Create the session layer backed by an in-memory store.
pub fn session_layer(settings: &SessionSettings) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            settings.expiry_minutes,
        )))
        .with_secure(settings.secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
