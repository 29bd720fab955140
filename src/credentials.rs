//! Application credentials type.

use std::fmt;

/// Credentials identifying the application to the backend.
///
/// This type holds the application id, the REST API key, and an optional
/// session token for user-scoped requests. It is immutable; a client
/// authenticated as a different user is a new client with new credentials.
///
/// # Security
///
/// The REST API key and session token are never exposed in Debug output
/// to prevent accidental logging.
///
/// # Example
///
/// ```
/// use appbase::Credentials;
///
/// let creds = Credentials::new("my-app-id", "my-rest-key")
///     .with_session_token("r:abc123");
/// assert_eq!(creds.application_id(), "my-app-id");
/// ```
#[derive(Clone)]
pub struct Credentials {
    application_id: String,
    rest_api_key: String,
    session_token: String,
}

impl Credentials {
    /// Create new application credentials with no session token.
    pub fn new(application_id: impl Into<String>, rest_api_key: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            rest_api_key: rest_api_key.into(),
            session_token: String::new(),
        }
    }

    /// Attach a session token for user-scoped requests.
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = session_token.into();
        self
    }

    /// Returns the application id.
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Returns the REST API key.
    ///
    /// # Security
    ///
    /// Use this only when constructing request headers.
    pub(crate) fn rest_api_key(&self) -> &str {
        &self.rest_api_key
    }

    /// Returns the session token, empty when none was set.
    pub(crate) fn session_token(&self) -> &str {
        &self.session_token
    }
}

// Intentionally hide secrets in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("application_id", &self.application_id)
            .field("rest_api_key", &"[REDACTED]")
            .field("session_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hides_secrets_in_debug() {
        let creds = Credentials::new("my-app-id", "secret-key").with_session_token("r:tok123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("my-app-id"));
        assert!(!debug.contains("secret-key"));
        assert!(!debug.contains("r:tok123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn session_token_defaults_to_empty() {
        let creds = Credentials::new("app", "key");
        assert_eq!(creds.session_token(), "");
    }
}
