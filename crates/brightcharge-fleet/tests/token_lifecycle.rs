//! Mock-server tests for the OAuth token lifecycle.
//!
//! These tests use wiremock to simulate the Fleet Auth and Fleet API
//! endpoints and exercise the client's session state machine without network
//! access or real credentials.

mod common;

use chrono::{Duration, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brightcharge_core::Error;

use common::{client, persisted_client};

fn token_response(access: &str, refresh: &str, expires_in: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": access,
        "refresh_token": refresh,
        "expires_in": expires_in,
        "token_type": "Bearer"
    }))
}

// ============================================================================
// Authorization-code exchange
// ============================================================================

#[tokio::test]
async fn test_authenticate_populates_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .and(body_partial_json(json!({
            "grant_type": "authorization_code",
            "client_id": "client-id",
            "client_secret": "client-secret",
            "code": "code123",
            "redirect_uri": "https://example.com/callback"
        })))
        .respond_with(token_response("A", "R", 3600))
        .mount(&server)
        .await;

    let client = client(&server);

    let before = Utc::now();
    let session = client.authenticate("code123").await.unwrap();
    let after = Utc::now();

    assert_eq!(session.access_token().as_str(), "A");
    assert_eq!(session.refresh_token().as_str(), "R");
    assert!(session.expires_at() >= before + Duration::seconds(3600));
    assert!(session.expires_at() <= after + Duration::seconds(3600));

    // The stored session matches the returned one.
    let stored = client.session().await.unwrap();
    assert_eq!(stored.access_token().as_str(), "A");
    assert_eq!(stored.expires_at(), session.expires_at());
}

#[tokio::test]
async fn test_authenticate_failure_leaves_session_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .and(body_partial_json(json!({"code": "good-code"})))
        .respond_with(token_response("A", "R", 3600))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .and(body_partial_json(json!({"code": "bad-code"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid authorization code"
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    client.authenticate("good-code").await.unwrap();

    let err = client.authenticate("bad-code").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid authorization code");

    // The earlier session survives the failed exchange.
    let session = client.session().await.unwrap();
    assert_eq!(session.access_token().as_str(), "A");
}

// ============================================================================
// Gating and refresh
// ============================================================================

#[tokio::test]
async fn test_vehicles_without_session() {
    let server = MockServer::start().await;
    let client = client(&server);

    let err = client.vehicles().await.unwrap_err();
    assert!(matches!(err, Error::NotAuthenticated));
    assert_eq!(err.to_string(), "Not authenticated");
}

#[tokio::test]
async fn test_refresh_without_session() {
    let server = MockServer::start().await;
    let client = client(&server);

    let err = client.refresh().await.unwrap_err();
    assert!(matches!(err, Error::NoRefreshToken));
    assert_eq!(err.to_string(), "no refresh token");
}

#[tokio::test]
async fn test_expired_token_triggers_exactly_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .and(body_partial_json(json!({
            "grant_type": "refresh_token",
            "refresh_token": "old-refresh-token"
        })))
        .respond_with(token_response("new-access-token", "new-refresh-token", 3600))
        .expect(1)
        .mount(&server)
        .await;

    // The vehicles request must carry the refreshed token.
    Mock::given(method("GET"))
        .and(path("/api/1/vehicles"))
        .and(header("authorization", "Bearer new-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = persisted_client(&server, Utc::now() - Duration::seconds(1));
    let vehicles = client.vehicles().await.unwrap();
    assert!(vehicles.is_empty());

    let session = client.session().await.unwrap();
    assert_eq!(session.refresh_token().as_str(), "new-refresh-token");
}

#[tokio::test]
async fn test_token_within_margin_is_refreshed() {
    let server = MockServer::start().await;

    // 100 seconds of life left: not yet expired, but inside the 5-minute
    // safety margin.
    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .respond_with(token_response("new-access-token", "new-refresh-token", 3600))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/1/vehicles"))
        .and(header("authorization", "Bearer new-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": [] })))
        .mount(&server)
        .await;

    let client = persisted_client(&server, Utc::now() + Duration::seconds(100));
    client.vehicles().await.unwrap();
}

#[tokio::test]
async fn test_fresh_token_skips_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .respond_with(token_response("new-access-token", "new-refresh-token", 3600))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/1/vehicles"))
        .and(header("authorization", "Bearer old-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = persisted_client(&server, Utc::now() + Duration::seconds(3600));
    client.vehicles().await.unwrap();
}

#[tokio::test]
async fn test_failed_refresh_clears_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "login_required",
            "error_description": "Token expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/1/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let client = persisted_client(&server, Utc::now() - Duration::seconds(1));

    // The refresh failure propagates unchanged through the vehicles call.
    let err = client.vehicles().await.unwrap_err();
    assert_eq!(err.to_string(), "Token expired");

    // Fail closed: the whole session is gone.
    assert!(client.session().await.is_none());

    let err = client.vehicles().await.unwrap_err();
    assert!(matches!(err, Error::NotAuthenticated));
    assert_eq!(err.to_string(), "Not authenticated");
}

#[tokio::test]
async fn test_concurrent_calls_share_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .respond_with(token_response("new-access-token", "new-refresh-token", 3600))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/1/vehicles"))
        .and(header("authorization", "Bearer new-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let client = persisted_client(&server, Utc::now() - Duration::seconds(1));

    let (first, second) = tokio::join!(client.vehicles(), client.vehicles());
    first.unwrap();
    second.unwrap();
}

// ============================================================================
// Partner token
// ============================================================================

#[tokio::test]
async fn test_partner_token_is_fetched_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .and(body_partial_json(json!({
            "grant_type": "client_credentials",
            "client_id": "client-id"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "partner-token",
            "token_type": "Bearer",
            "expires_in": 28800
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);

    for _ in 0..3 {
        let token = client.partner_token().await.unwrap();
        assert_eq!(token.as_str(), "partner-token");
    }
}

#[tokio::test]
async fn test_stale_partner_token_is_refetched() {
    let server = MockServer::start().await;

    // expires_in below the staleness margin, so the cached grant is already
    // stale on the next call.
    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "partner-token",
            "token_type": "Bearer",
            "expires_in": 60
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    client.partner_token().await.unwrap();
    client.partner_token().await.unwrap();
}

#[tokio::test]
async fn test_register_partner_account() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "partner-token",
            "token_type": "Bearer",
            "expires_in": 28800
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/1/partner_accounts"))
        .and(header("authorization", "Bearer partner-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.register_partner_account().await.unwrap();
}

#[tokio::test]
async fn test_register_partner_account_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "partner-token",
            "token_type": "Bearer",
            "expires_in": 28800
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/1/partner_accounts"))
        .respond_with(ResponseTemplate::new(412).set_body_json(json!({
            "error": "precondition_failed",
            "error_description": "Public key not registered"
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.register_partner_account().await.unwrap_err();
    assert_eq!(err.to_string(), "Public key not registered");
}

// ============================================================================
// Error normalization
// ============================================================================

#[tokio::test]
async fn test_error_description_is_used_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error_description": "X" })),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.authenticate("code").await.unwrap_err();

    assert_eq!(err.to_string(), "X");
    match err {
        Error::UpstreamRejected { status, .. } => assert_eq!(status, 400),
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_string_body_is_used_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Y")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.authenticate("code").await.unwrap_err();
    assert_eq!(err.to_string(), "Y");
}

#[tokio::test]
async fn test_unreachable_server_is_no_response() {
    // Bind a port, then drop the listener so connections are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let base = brightcharge_core::BaseUrl::new(&format!("http://127.0.0.1:{port}")).unwrap();
    let client =
        brightcharge_fleet::FleetClient::with_bases(common::oauth(), base.clone(), base);

    let err = client.authenticate("code").await.unwrap_err();
    assert!(matches!(err, Error::NoResponse));
    assert_eq!(err.to_string(), "no response received from server");
}
