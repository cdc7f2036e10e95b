//! Shared helpers for the mock Fleet API tests.

use chrono::{DateTime, Utc};
use wiremock::MockServer;

use brightcharge_core::{AccessToken, BaseUrl, OAuthConfig, RefreshToken, UserSession};
use brightcharge_fleet::FleetClient;

/// OAuth configuration used by every test.
pub fn oauth() -> OAuthConfig {
    OAuthConfig::new("client-id", "client-secret", "https://example.com/callback")
}

/// Base URL pointing at a mock server.
///
/// Tests use a single base for both auth and API endpoints; the paths don't
/// overlap, so one server plays both roles.
pub fn mock_base(server: &MockServer) -> BaseUrl {
    BaseUrl::new(&format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

/// A client with no session, pointed at the mock server.
pub fn client(server: &MockServer) -> FleetClient {
    let base = mock_base(server);
    FleetClient::with_bases(oauth(), base.clone(), base)
}

/// A client seeded with a persisted session expiring at the given instant.
pub fn persisted_client(server: &MockServer, expires_at: DateTime<Utc>) -> FleetClient {
    let base = mock_base(server);
    let session = UserSession::from_parts(
        AccessToken::new("old-access-token"),
        RefreshToken::new("old-refresh-token"),
        expires_at,
    );
    FleetClient::from_persisted(oauth(), base.clone(), base, session)
}
