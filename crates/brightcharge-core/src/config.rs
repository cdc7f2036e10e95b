//! OAuth application configuration.

use std::fmt;

use crate::error::Error;

/// OAuth client configuration for the Fleet Auth endpoints.
///
/// Holds the application's client id, client secret, and the redirect URI
/// registered with the authorization server.
///
/// # Security
///
/// The client secret is never exposed in Debug output to prevent accidental
/// logging.
///
/// # Example
///
/// ```
/// use brightcharge_core::OAuthConfig;
///
/// let oauth = OAuthConfig::new("client-id", "client-secret", "https://example.com/callback");
/// assert_eq!(oauth.client_id(), "client-id");
/// ```
#[derive(Clone)]
pub struct OAuthConfig {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl OAuthConfig {
    /// Create a new OAuth configuration.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Load the configuration from `TESLA_CLIENT_ID`, `TESLA_CLIENT_SECRET`,
    /// and `TESLA_REDIRECT_URI`.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is unset or empty.
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            client_id: require_env("TESLA_CLIENT_ID")?,
            client_secret: require_env("TESLA_CLIENT_SECRET")?,
            redirect_uri: require_env("TESLA_REDIRECT_URI")?,
        })
    }

    /// Returns the OAuth client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth client secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing token requests.
    /// Never log or display this value.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the registered redirect URI.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }
}

fn require_env(name: &str) -> Result<String, Error> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::InvalidInput {
            value: name.to_string(),
            reason: "environment variable not set".to_string(),
        }),
    }
}

// Intentionally hide the client secret in Debug output
impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_hides_secret_in_debug() {
        let oauth = OAuthConfig::new("id-123", "secret-456", "https://example.com/cb");
        let debug = format!("{:?}", oauth);
        assert!(debug.contains("id-123"));
        assert!(!debug.contains("secret-456"));
        assert!(debug.contains("[REDACTED]"));
    }
}
