//! Server base URL type.

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::Error;

/// Default production endpoint.
const DEFAULT_SERVER_URL: &str = "https://api.appbase.dev";

/// A validated AppBase server base URL.
///
/// This type ensures the URL is absolute, uses HTTPS (or HTTP for
/// localhost, which mock servers need), and is normalized for endpoint
/// construction.
///
/// # Example
///
/// ```
/// use appbase::ServerUrl;
///
/// let server = ServerUrl::new("https://api.appbase.dev").unwrap();
/// assert_eq!(server.endpoint("classes/Game"),
///            "https://api.appbase.dev/classes/Game");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServerUrl(Url);

impl ServerUrl {
    /// Create a new server URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, has no host, or uses
    /// a scheme other than HTTPS (HTTP is allowed for localhost only).
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| Error::ServerUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        // The url crate keeps a trailing slash on root paths; strip it so
        // joining never produces a double slash.
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(Error::ServerUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            });
        }

        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(Error::ServerUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            });
        }

        if url.host_str().is_none() {
            return Err(Error::ServerUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ServerUrl {
    fn default() -> Self {
        // The default endpoint is a known-valid HTTPS URL.
        Self(Url::parse(DEFAULT_SERVER_URL).expect("default server URL is valid"))
    }
}

impl fmt::Display for ServerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServerUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ServerUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let server = ServerUrl::new("https://api.appbase.dev").unwrap();
        assert_eq!(server.host(), Some("api.appbase.dev"));
    }

    #[test]
    fn valid_localhost_http() {
        let server = ServerUrl::new("http://localhost:1337").unwrap();
        assert_eq!(server.host(), Some("localhost"));
    }

    #[test]
    fn default_is_production_endpoint() {
        let server = ServerUrl::default();
        assert_eq!(server.host(), Some("api.appbase.dev"));
    }

    #[test]
    fn endpoint_construction() {
        let server = ServerUrl::new("https://api.appbase.dev").unwrap();
        assert_eq!(
            server.endpoint("classes/Game/abc123"),
            "https://api.appbase.dev/classes/Game/abc123"
        );
    }

    #[test]
    fn endpoint_normalizes_trailing_slash() {
        let server = ServerUrl::new("https://api.appbase.dev/").unwrap();
        assert_eq!(server.endpoint("login"), "https://api.appbase.dev/login");
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ServerUrl::new("http://api.appbase.dev").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ServerUrl::new("/classes/Game").is_err());
    }
}
