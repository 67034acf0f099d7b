//! Session store adapter.
//!
//! Responsibility:
//! - Build the session layer (encrypted + authenticated cookie, strict same-site,
//!   http-only, secure, inactivity expiry). Adding the layer is what "enables"
//!   sessions for a group of routes.
//! - Typed put/get/exists/remove helpers over `tower_sessions::Session`, handed to
//!   handlers and middleware as the `AppSession` extractor.
//!
//! Notes:
//! - The cookie only carries the (encrypted) session id; values live in the store.
//! - A session record is written lazily, the first time a value is put.

use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use serde::{Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha512};
use tower_sessions::cookie::time::Duration;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::PrivateCookie;
use tower_sessions::session::Error as SessionError;
use tower_sessions::{Expiry, Session, SessionManagerLayer, SessionStore};

use crate::config::SessionSettings;

pub const SESSION_COOKIE: &str = "session";

/// Reserved key holding the logged-in user's id.
pub const AUTHENTICATED_USER_ID: &str = "authenticated_user_id";

/// One-shot notice shown on the next rendered page.
pub const FLASH: &str = "flash";

pub fn layer<S>(store: S, settings: &SessionSettings) -> SessionManagerLayer<S, PrivateCookie>
where
    S: SessionStore + Clone,
{
    let lifetime = Duration::try_from(settings.lifetime).unwrap_or(Duration::hours(12));

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_secure(settings.secure)
        .with_same_site(SameSite::Strict)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(lifetime))
        .with_private(cookie_key(&settings.secret))
}

/// Stretches the configured secret into the 64-byte key the cookie jar requires.
fn cookie_key(secret: &[u8]) -> Key {
    let digest = Sha512::digest(secret);
    Key::from(digest.as_slice())
}

#[derive(Clone, Debug)]
pub struct AppSession(Session);

impl AppSession {
    pub async fn put<T>(&self, key: &str, value: T) -> Result<(), SessionError>
    where
        T: Serialize + Send + Sync,
    {
        self.0.insert(key, value).await
    }

    pub async fn get<T>(&self, key: &str) -> Result<Option<T>, SessionError>
    where
        T: DeserializeOwned,
    {
        self.0.get(key).await
    }

    pub async fn get_int(&self, key: &str) -> Result<Option<i64>, SessionError> {
        self.get::<i64>(key).await
    }

    pub async fn get_string(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.get::<String>(key).await
    }

    /// Reads and removes a string value (flash messages).
    /// Only touches the store when the key is present, so pages without a
    /// pending message do not create a session.
    pub async fn pop_string(&self, key: &str) -> Result<Option<String>, SessionError> {
        let value = self.get_string(key).await?;
        if value.is_some() {
            self.remove(key).await?;
        }
        Ok(value)
    }

    pub async fn exists(&self, key: &str) -> Result<bool, SessionError> {
        Ok(self.0.get_value(key).await?.is_some())
    }

    pub async fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.0.remove_value(key).await.map(|_| ())
    }

    /// Issues a new session id, keeping the data. Called on privilege change (login).
    pub async fn renew(&self) -> Result<(), SessionError> {
        self.0.cycle_id().await
    }
}

impl<S> FromRequestParts<S> for AppSession
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::from_request_parts(parts, state).await.map(Self)
    }
}
