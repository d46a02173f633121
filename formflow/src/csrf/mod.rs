//! Anti-CSRF tokens
//!
//! Tokens are issued per form (keyed by the form fingerprint) and stored in
//! the caller's session. Issuing a new token for a form replaces the old
//! one. Tokens are:
//! - 32 bytes from the thread-local CSPRNG, base64url encoded without padding
//! - Stored with their issue time and rejected once older than the TTL
//! - Compared in constant time

use std::collections::HashMap;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use parking_lot::Mutex;
use rand::RngCore;
use subtle::ConstantTimeEq;

use crate::config::SecuritySettings;
use crate::error::{FormError, SessionError};

/// Session storage, provided by the surrounding web framework
pub trait Session {
    /// Read a value
    ///
    /// # Errors
    ///
    /// Backend failure.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Store a value, replacing any previous one
    ///
    /// # Errors
    ///
    /// Backend failure.
    fn insert(&self, key: &str, value: String) -> Result<(), SessionError>;

    /// Delete a value
    ///
    /// # Errors
    ///
    /// Backend failure.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// In-process session, for tests and single-user tools
#[derive(Debug, Default)]
pub struct MemorySession {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySession {
    /// Number of stored values
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// Whether nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl Session for MemorySession {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn insert(&self, key: &str, value: String) -> Result<(), SessionError> {
        self.values.lock().insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.values.lock().remove(key);
        Ok(())
    }
}

/// Token issue, check and clear, keyed by form id
pub trait TokenStore {
    /// Generate and store a fresh token, replacing any previous one
    ///
    /// # Errors
    ///
    /// Session failure.
    fn issue(&self, form_id: &str) -> Result<String, FormError>;

    /// Whether `token` is the live token for `form_id`
    ///
    /// # Errors
    ///
    /// Session failure.
    fn check(&self, form_id: &str, token: &str) -> Result<bool, FormError>;

    /// Forget the token for `form_id`
    ///
    /// # Errors
    ///
    /// Session failure.
    fn clear(&self, form_id: &str) -> Result<(), FormError>;
}

/// Generate a token: 32 random bytes, base64url without padding
#[must_use]
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Session-backed [`TokenStore`]
///
/// # Examples
///
/// ```rust
/// use formflow::csrf::{CsrfTokens, MemorySession, TokenStore};
///
/// let tokens = CsrfTokens::new(MemorySession::default());
/// let token = tokens.issue("form-a").unwrap();
/// assert!(tokens.check("form-a", &token).unwrap());
/// assert!(!tokens.check("form-b", &token).unwrap());
/// ```
#[derive(Debug)]
pub struct CsrfTokens<S> {
    session: S,
    ttl_secs: i64,
}

impl<S: Session> CsrfTokens<S> {
    /// Wrap a session with the default 24 hour TTL
    #[must_use]
    pub fn new(session: S) -> Self {
        Self::with_settings(session, &SecuritySettings::default())
    }

    /// Wrap a session with configured settings
    #[must_use]
    pub fn with_settings(session: S, settings: &SecuritySettings) -> Self {
        Self {
            session,
            ttl_secs: i64::try_from(settings.token_ttl_secs).unwrap_or(i64::MAX),
        }
    }

    /// The wrapped session
    pub const fn session(&self) -> &S {
        &self.session
    }

    fn key(form_id: &str) -> String {
        format!("{form_id}.csrf_token")
    }
}

impl<S: Session> TokenStore for CsrfTokens<S> {
    fn issue(&self, form_id: &str) -> Result<String, FormError> {
        let token = generate_token();
        let stored = format!("{token}:{}", Utc::now().timestamp());
        self.session.insert(&Self::key(form_id), stored)?;
        Ok(token)
    }

    fn check(&self, form_id: &str, token: &str) -> Result<bool, FormError> {
        if token.is_empty() {
            return Ok(false);
        }
        let Some(stored) = self.session.get(&Self::key(form_id))? else {
            return Ok(false);
        };
        let Some((expected, issued)) = stored.rsplit_once(':') else {
            return Ok(false);
        };
        let Ok(issued) = issued.parse::<i64>() else {
            return Ok(false);
        };
        if Utc::now().timestamp().saturating_sub(issued) > self.ttl_secs {
            return Ok(false);
        }
        Ok(bool::from(expected.as_bytes().ct_eq(token.as_bytes())))
    }

    fn clear(&self, form_id: &str) -> Result<(), FormError> {
        self.session.remove(&Self::key(form_id))?;
        Ok(())
    }
}
