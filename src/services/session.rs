//! Session token storage
//!
//! The bearer token handed out by the backend is kept in the key-value store
//! together with the username. Obtaining the token is up to the caller.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{FinplanError, FinplanResult};
use crate::storage::KeyValueStore;

pub const TOKEN_KEY: &str = "auth_token";
pub const USERNAME_KEY: &str = "auth_username";

/// Name shown when the session doesn't tell us who is logged in
pub const FALLBACK_USER: &str = "User";

#[derive(Deserialize)]
struct TokenClaims {
    username: Option<String>,
}

/// Read the `username` claim from a JWT-style token without verifying it
pub fn decode_username(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    // accept padded and standard-alphabet payloads too
    let payload: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: TokenClaims = serde_json::from_slice(&bytes).ok()?;
    claims.username.filter(|name| !name.is_empty())
}

/// Stored session
pub struct SessionStore<'a, S: KeyValueStore> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> SessionStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Remember a token and, when known, the username it belongs to
    pub fn login(&self, token: &str, username: Option<&str>) -> FinplanResult<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(FinplanError::Session("Token cannot be empty".into()));
        }

        self.store.set(TOKEN_KEY, token)?;
        match username.map(str::trim).filter(|u| !u.is_empty()) {
            Some(username) => self.store.set(USERNAME_KEY, username)?,
            None => self.store.remove(USERNAME_KEY)?,
        }

        info!("session stored");
        Ok(())
    }

    pub fn logout(&self) -> FinplanResult<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USERNAME_KEY)?;
        info!("session cleared");
        Ok(())
    }

    pub fn token(&self) -> FinplanResult<Option<String>> {
        self.store.get(TOKEN_KEY)
    }

    pub fn is_logged_in(&self) -> FinplanResult<bool> {
        Ok(self.token()?.is_some())
    }

    /// The logged-in user's name, `None` when logged out
    ///
    /// Prefers the stored username, then the token's `username` claim (which
    /// is then stored), then [`FALLBACK_USER`].
    pub fn current_user(&self) -> FinplanResult<Option<String>> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };

        if let Some(username) = self.store.get(USERNAME_KEY)? {
            return Ok(Some(username));
        }

        match decode_username(&token) {
            Some(username) => {
                debug!(%username, "username read from token");
                self.store.set(USERNAME_KEY, &username)?;
                Ok(Some(username))
            }
            None => Ok(Some(FALLBACK_USER.to_string())),
        }
    }

    /// `Authorization` header value for requests, when logged in
    pub fn authorization_header(&self) -> FinplanResult<Option<String>> {
        Ok(self.token()?.map(|token| format!("Bearer {}", token)))
    }
}

/// Login form input
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are required
    pub fn validate(&self) -> FinplanResult<()> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(FinplanError::Validation(
                "Please enter both username and password".into(),
            ));
        }
        Ok(())
    }

    /// Registration also requires the password to be typed twice
    pub fn validate_registration(&self, confirm_password: &str) -> FinplanResult<()> {
        self.validate()?;
        if self.password != confirm_password {
            return Err(FinplanError::Validation("Passwords do not match".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use base64::engine::general_purpose::STANDARD;

    fn token_with(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.signature", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_decode_username() {
        let token = token_with(r#"{"username":"somchai","userId":3}"#);
        assert_eq!(decode_username(&token).as_deref(), Some("somchai"));

        let padded = format!("a.{}.b", STANDARD.encode(r#"{"username":"ann"}"#));
        assert_eq!(decode_username(&padded).as_deref(), Some("ann"));

        assert_eq!(decode_username("not-a-token"), None);
        assert_eq!(decode_username(&token_with(r#"{"sub":"1"}"#)), None);
        assert_eq!(decode_username("a.!!!.b"), None);
    }

    #[test]
    fn test_login_logout() {
        let store = MemoryStore::new();
        let session = SessionStore::new(&store);
        assert!(!session.is_logged_in().unwrap());
        assert_eq!(session.current_user().unwrap(), None);

        session.login("abc.def.ghi", Some("somchai")).unwrap();
        assert!(session.is_logged_in().unwrap());
        assert_eq!(session.current_user().unwrap().as_deref(), Some("somchai"));
        assert_eq!(
            session.authorization_header().unwrap().as_deref(),
            Some("Bearer abc.def.ghi")
        );

        session.logout().unwrap();
        assert!(!session.is_logged_in().unwrap());
        assert_eq!(store.get(USERNAME_KEY).unwrap(), None);
        assert_eq!(session.authorization_header().unwrap(), None);
    }

    #[test]
    fn test_username_from_token_is_cached() {
        let store = MemoryStore::new();
        let session = SessionStore::new(&store);

        session
            .login(&token_with(r#"{"username":"ann"}"#), None)
            .unwrap();
        assert_eq!(session.current_user().unwrap().as_deref(), Some("ann"));
        assert_eq!(store.get(USERNAME_KEY).unwrap().as_deref(), Some("ann"));
    }

    #[test]
    fn test_undecodable_token_falls_back() {
        let store = MemoryStore::new();
        let session = SessionStore::new(&store);

        session.login("opaque", None).unwrap();
        assert_eq!(
            session.current_user().unwrap().as_deref(),
            Some(FALLBACK_USER)
        );
        assert_eq!(store.get(USERNAME_KEY).unwrap(), None);
    }

    #[test]
    fn test_empty_token_rejected() {
        let store = MemoryStore::new();
        let session = SessionStore::new(&store);
        assert!(matches!(
            session.login("  ", None),
            Err(FinplanError::Session(_))
        ));
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("ann", "secret").validate().is_ok());
        assert!(Credentials::new("", "secret").validate().is_err());
        assert!(Credentials::new("ann", "").validate().is_err());

        let creds = Credentials::new("ann", "secret");
        assert!(creds.validate_registration("secret").is_ok());
        let err = creds.validate_registration("Secret").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Passwords do not match");
    }
}
