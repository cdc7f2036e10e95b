//! Fleet API client with OAuth token lifecycle management.

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use brightcharge_core::{
    AccessToken, BaseUrl, Error, OAuthConfig, PartnerGrant, PartnerToken, RefreshToken, Result,
    UserSession, Vehicle, VehicleData, VehicleId,
};

use crate::endpoints::{
    AUTHORIZE, AuthorizationCodeRequest, CHARGE_START, CHARGE_STOP, EmptyBody, PARTNER_ACCOUNTS,
    PartnerTokenRequest, PartnerTokenResponse, RefreshTokenRequest, SCOPE, SET_CHARGE_LIMIT,
    SET_CHARGING_AMPS, SetChargeLimitRequest, SetChargingAmpsRequest, TokenResponse, VEHICLES,
    VehicleDataResponse, VehiclesResponse, command_path, vehicle_data_path,
};
use crate::http::FleetHttp;

/// Production Fleet Auth base URL.
pub const DEFAULT_AUTH_BASE: &str = "https://auth.tesla.com";

/// Production Fleet API base URL (North America region).
pub const DEFAULT_API_BASE: &str = "https://fleet-api.prd.na.vn.cloud.tesla.com";

/// An OAuth authorization URL with its CSRF state value.
///
/// The caller sends the user to `url` and must verify that the `state`
/// parameter echoed back on the redirect matches `state`.
#[derive(Debug, Clone)]
pub struct AuthorizeUrl {
    pub url: String,
    pub state: String,
}

/// A client for the Tesla Fleet API and Fleet Auth endpoints.
///
/// The client owns the partner token and at most one user session at a time.
/// Authenticated calls transparently refresh a stale access token before the
/// request goes out; a failed refresh clears the session entirely, so the
/// next call fails with [`Error::NotAuthenticated`] until
/// [`FleetClient::authenticate`] succeeds again.
///
/// # Thread Safety
///
/// The client is safe to share behind an `Arc`. The session lock is held
/// across a refresh exchange, so concurrent callers that find the token
/// stale produce a single refresh request between them.
///
/// # Example
///
/// ```no_run
/// use brightcharge_core::OAuthConfig;
/// use brightcharge_fleet::FleetClient;
///
/// # async fn example() -> brightcharge_core::Result<()> {
/// let client = FleetClient::new(OAuthConfig::from_env()?);
/// let session = client.authenticate("authorization-code").await?;
/// println!("token expires at {}", session.expires_at());
///
/// for vehicle in client.vehicles().await? {
///     println!("{}: {}", vehicle.display_name, vehicle.state);
/// }
/// # Ok(())
/// # }
/// ```
pub struct FleetClient {
    http: FleetHttp,
    oauth: OAuthConfig,
    session: Mutex<Option<UserSession>>,
    partner: Mutex<Option<PartnerGrant>>,
}

impl FleetClient {
    /// Create a client against the production base URLs.
    pub fn new(oauth: OAuthConfig) -> Self {
        let auth_base = BaseUrl::new(DEFAULT_AUTH_BASE).expect("default auth base is valid");
        let api_base = BaseUrl::new(DEFAULT_API_BASE).expect("default API base is valid");
        Self::with_bases(oauth, auth_base, api_base)
    }

    /// Create a client against explicit base URLs.
    pub fn with_bases(oauth: OAuthConfig, auth_base: BaseUrl, api_base: BaseUrl) -> Self {
        Self {
            http: FleetHttp::new(auth_base, api_base),
            oauth,
            session: Mutex::new(None),
            partner: Mutex::new(None),
        }
    }

    /// Create a client against the production base URLs, seeded with a
    /// persisted session.
    pub fn resume(oauth: OAuthConfig, session: UserSession) -> Self {
        let auth_base = BaseUrl::new(DEFAULT_AUTH_BASE).expect("default auth base is valid");
        let api_base = BaseUrl::new(DEFAULT_API_BASE).expect("default API base is valid");
        Self::from_persisted(oauth, auth_base, api_base, session)
    }

    /// Create a client seeded with a persisted session.
    ///
    /// The caller is responsible for the session's tokens matching its
    /// expiry instant; a stale session is refreshed on the next call.
    pub fn from_persisted(
        oauth: OAuthConfig,
        auth_base: BaseUrl,
        api_base: BaseUrl,
        session: UserSession,
    ) -> Self {
        Self {
            http: FleetHttp::new(auth_base, api_base),
            oauth,
            session: Mutex::new(Some(session)),
            partner: Mutex::new(None),
        }
    }

    /// Returns a snapshot of the current session, if authenticated.
    pub async fn session(&self) -> Option<UserSession> {
        self.session.lock().await.clone()
    }

    /// The audience value sent with token and authorize requests.
    fn audience(&self) -> &str {
        self.http.api_base().as_str().trim_end_matches('/')
    }

    /// Build the OAuth authorization URL with a fresh CSRF state value.
    pub fn authorize_url(&self) -> AuthorizeUrl {
        let state = Uuid::new_v4().to_string();

        let mut url = self.http.auth_base().as_url().clone();
        url.set_path(AUTHORIZE);
        url.query_pairs_mut()
            .append_pair("client_id", self.oauth.client_id())
            .append_pair("redirect_uri", self.oauth.redirect_uri())
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPE)
            .append_pair("state", &state)
            .append_pair("audience", self.audience());

        AuthorizeUrl {
            url: url.to_string(),
            state,
        }
    }

    /// Obtain the partner token, fetching it only when no fresh grant is
    /// cached.
    #[instrument(skip(self))]
    pub async fn partner_token(&self) -> Result<PartnerToken> {
        let mut grant = self.partner.lock().await;

        if let Some(current) = grant.as_ref() {
            if !current.is_stale() {
                return Ok(current.token().clone());
            }
        }

        info!("Requesting partner token");

        let request = PartnerTokenRequest {
            grant_type: "client_credentials",
            client_id: self.oauth.client_id(),
            client_secret: self.oauth.client_secret(),
            audience: self.audience(),
            scope: SCOPE,
        };

        let response: PartnerTokenResponse = self.http.token_request(&request).await?;

        let fresh = PartnerGrant::new(PartnerToken::new(response.access_token), response.expires_in);
        let token = fresh.token().clone();
        *grant = Some(fresh);

        debug!("Partner token cached");
        Ok(token)
    }

    /// Register the partner account with the Fleet API.
    #[instrument(skip(self))]
    pub async fn register_partner_account(&self) -> Result<()> {
        let token = self.partner_token().await?;

        info!("Registering partner account");
        self.http
            .post_authed(PARTNER_ACCOUNTS, &EmptyBody {}, token.as_str())
            .await
    }

    /// Exchange an authorization code for a user session.
    ///
    /// On success the session is stored and returned. On failure the prior
    /// session state is left untouched.
    #[instrument(skip(self, code))]
    pub async fn authenticate(&self, code: &str) -> Result<UserSession> {
        info!("Exchanging authorization code");

        let request = AuthorizationCodeRequest {
            grant_type: "authorization_code",
            client_id: self.oauth.client_id(),
            client_secret: self.oauth.client_secret(),
            code,
            redirect_uri: self.oauth.redirect_uri(),
        };

        let response: TokenResponse = self.http.token_request(&request).await?;

        let session = UserSession::new(
            AccessToken::new(response.access_token),
            RefreshToken::new(response.refresh_token),
            response.expires_in,
        );

        *self.session.lock().await = Some(session.clone());

        debug!("Session established");
        Ok(session)
    }

    /// Refresh the session tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRefreshToken`] when no session is held. Any other
    /// failure clears the whole session before the error is returned, so the
    /// caller must re-authenticate.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        self.refresh_locked(&mut session).await
    }

    /// Refresh while holding the session lock.
    ///
    /// Callers that found a stale token queue on the lock; whoever enters
    /// after a successful refresh sees a fresh session and skips the
    /// exchange, so one stale token produces one refresh request.
    async fn refresh_locked(&self, session: &mut Option<UserSession>) -> Result<()> {
        let refresh_token = session
            .as_ref()
            .map(|s| s.refresh_token().as_str().to_string())
            .ok_or(Error::NoRefreshToken)?;

        info!("Refreshing access token");

        let request = RefreshTokenRequest {
            grant_type: "refresh_token",
            client_id: self.oauth.client_id(),
            client_secret: self.oauth.client_secret(),
            refresh_token: &refresh_token,
        };

        match self.http.token_request::<_, TokenResponse>(&request).await {
            Ok(response) => {
                *session = Some(UserSession::new(
                    AccessToken::new(response.access_token),
                    RefreshToken::new(response.refresh_token),
                    response.expires_in,
                ));
                debug!("Session refreshed successfully");
                Ok(())
            }
            Err(err) => {
                // Fail closed: any refresh failure forces a full re-login.
                *session = None;
                warn!(error = %err, "Refresh failed, session cleared");
                Err(err)
            }
        }
    }

    /// Return a fresh access token, refreshing first when the current one is
    /// stale.
    async fn fresh_access_token(&self) -> Result<AccessToken> {
        let mut session = self.session.lock().await;

        if session.is_none() {
            return Err(Error::NotAuthenticated);
        }

        if session.as_ref().is_some_and(|s| s.is_stale()) {
            self.refresh_locked(&mut session).await?;
        }

        match session.as_ref() {
            Some(current) => Ok(current.access_token().clone()),
            None => Err(Error::NotAuthenticated),
        }
    }

    /// List the user's vehicles.
    #[instrument(skip(self))]
    pub async fn vehicles(&self) -> Result<Vec<Vehicle>> {
        let token = self.fresh_access_token().await?;

        debug!("Listing vehicles");
        let response: VehiclesResponse = self.http.get_authed(VEHICLES, token.as_str()).await?;

        Ok(response.response)
    }

    /// Fetch detailed data for one vehicle.
    #[instrument(skip(self), fields(%id))]
    pub async fn vehicle_data(&self, id: &VehicleId) -> Result<VehicleData> {
        let token = self.fresh_access_token().await?;

        debug!("Fetching vehicle data");
        let response: VehicleDataResponse = self
            .http
            .get_authed(&vehicle_data_path(id), token.as_str())
            .await?;

        Ok(response.response)
    }

    /// Start charging.
    #[instrument(skip(self), fields(%id))]
    pub async fn charge_start(&self, id: &VehicleId) -> Result<()> {
        self.command(id, CHARGE_START, &EmptyBody {}).await
    }

    /// Stop charging.
    #[instrument(skip(self), fields(%id))]
    pub async fn charge_stop(&self, id: &VehicleId) -> Result<()> {
        self.command(id, CHARGE_STOP, &EmptyBody {}).await
    }

    /// Set the charge limit as a percentage of capacity.
    #[instrument(skip(self), fields(%id, percent))]
    pub async fn set_charge_limit(&self, id: &VehicleId, percent: u8) -> Result<()> {
        self.command(id, SET_CHARGE_LIMIT, &SetChargeLimitRequest { percent })
            .await
    }

    /// Set the charging current in amps.
    #[instrument(skip(self), fields(%id, amps))]
    pub async fn set_charging_amps(&self, id: &VehicleId, amps: u32) -> Result<()> {
        self.command(id, SET_CHARGING_AMPS, &SetChargingAmpsRequest { charging_amps: amps })
            .await
    }

    async fn command<B: serde::Serialize>(
        &self,
        id: &VehicleId,
        command: &str,
        body: &B,
    ) -> Result<()> {
        let token = self.fresh_access_token().await?;

        debug!(command, "Sending vehicle command");
        self.http
            .post_authed(&command_path(id, command), body, token.as_str())
            .await
    }
}

// Custom Debug impl that hides token state
impl std::fmt::Debug for FleetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FleetClient")
            .field("auth_base", self.http.auth_base())
            .field("api_base", self.http.api_base())
            .field("oauth", &self.oauth)
            .field("session", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> FleetClient {
        FleetClient::new(OAuthConfig::new(
            "client-id",
            "client-secret",
            "https://example.com/callback",
        ))
    }

    #[test]
    fn authorize_url_carries_client_and_state() {
        let client = test_client();
        let authorize = client.authorize_url();

        assert!(authorize.url.starts_with("https://auth.tesla.com/oauth2/v3/authorize?"));
        assert!(authorize.url.contains("client_id=client-id"));
        assert!(authorize.url.contains("response_type=code"));
        assert!(authorize.url.contains(&format!("state={}", authorize.state)));
    }

    #[test]
    fn authorize_url_state_is_unique_per_call() {
        let client = test_client();
        assert_ne!(client.authorize_url().state, client.authorize_url().state);
    }

    #[test]
    fn debug_output_hides_session() {
        let debug = format!("{:?}", test_client());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("client-secret"));
    }
}
