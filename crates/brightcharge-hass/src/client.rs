//! Home Assistant HTTP client.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, instrument, trace};

use brightcharge_core::{BaseUrl, EntityState, Error, Result};

/// States endpoint path.
const STATES: &str = "/api/states";

/// Request timeout; Home Assistant lives on the local network and should
/// answer quickly.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for a Home Assistant instance.
///
/// Reads entity states over the REST API with a long-lived access token.
/// The client is stateless: every call is an independent poll.
///
/// # Example
///
/// ```no_run
/// use brightcharge_core::BaseUrl;
/// use brightcharge_hass::HassClient;
///
/// # async fn example() -> brightcharge_core::Result<()> {
/// let base = BaseUrl::new("https://hass.example.com")?;
/// let client = HassClient::new(base, "long-lived-token")?;
///
/// for entity in client.solar_states().await? {
///     println!("{}: {} W", entity.entity_id, entity.state);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HassClient {
    client: reqwest::Client,
    base: BaseUrl,
    token: String,
}

impl HassClient {
    /// Create a new client for the given Home Assistant base URL and
    /// long-lived access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty.
    pub fn new(base: BaseUrl, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::InvalidInput {
                value: "token".to_string(),
                reason: "Home Assistant access token must not be empty".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("brightcharge/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Ok(Self {
            client,
            base,
            token,
        })
    }

    /// Returns the base URL this client is configured for.
    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    /// Fetch all entity states.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn states(&self) -> Result<Vec<EntityState>> {
        let url = self.base.endpoint(STATES);
        debug!("Fetching entity states");

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers())
            .send()
            .await?;

        let status = response.status();
        trace!(status = %status, "states response");

        if status.is_success() {
            let states = response.json::<Vec<EntityState>>().await?;
            Ok(states)
        } else {
            let status = status.as_u16();
            match response.text().await {
                Ok(body) => Err(Error::from_error_body(status, &body)),
                Err(err) => Err(err.into()),
            }
        }
    }

    /// Fetch the solar production and grid power sensor states.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn solar_states(&self) -> Result<Vec<EntityState>> {
        let states = self.states().await?;
        let solar: Vec<EntityState> = states
            .into_iter()
            .filter(EntityState::is_solar_entity)
            .collect();

        debug!(count = solar.len(), "Solar entities found");
        Ok(solar)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", self.token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("invalid token characters"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

// Custom Debug impl that hides the access token
impl std::fmt::Debug for HassClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HassClient")
            .field("base", &self.base)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_token() {
        let base = BaseUrl::new("https://hass.example.com").unwrap();
        assert!(HassClient::new(base, "  ").is_err());
    }

    #[test]
    fn debug_hides_token() {
        let base = BaseUrl::new("https://hass.example.com").unwrap();
        let client = HassClient::new(base, "very-secret-token").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("very-secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
