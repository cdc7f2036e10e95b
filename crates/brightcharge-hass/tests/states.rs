//! Mock-server tests for the Home Assistant client.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brightcharge_core::{BaseUrl, Error};
use brightcharge_hass::HassClient;

fn mock_client(server: &MockServer) -> HassClient {
    let base = BaseUrl::new(&format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    HassClient::new(base, "test-token").unwrap()
}

#[tokio::test]
async fn test_states_returns_entities() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/states"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "entity_id": "sensor.solar_power",
                "state": "3200",
                "attributes": { "unit_of_measurement": "W" },
                "last_updated": "2026-08-06T10:15:00+00:00"
            },
            {
                "entity_id": "light.kitchen",
                "state": "on"
            }
        ])))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let states = client.states().await.unwrap();

    assert_eq!(states.len(), 2);
    assert_eq!(states[0].entity_id, "sensor.solar_power");
    assert_eq!(states[0].state, "3200");
    assert!(states[0].last_updated.is_some());
}

#[tokio::test]
async fn test_solar_states_filters_entities() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/states"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "entity_id": "sensor.solar_power", "state": "3200" },
            { "entity_id": "sensor.grid_power", "state": "-1200" },
            { "entity_id": "sensor.indoor_temperature", "state": "21.5" },
            { "entity_id": "light.kitchen", "state": "on" }
        ])))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let solar = client.solar_states().await.unwrap();

    assert_eq!(solar.len(), 2);
    assert!(solar.iter().all(|e| e.is_solar_entity()));
}

#[tokio::test]
async fn test_unauthorized_is_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/states"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.states().await.unwrap_err();

    assert_eq!(err.to_string(), "Unauthorized");
    match err {
        Error::UpstreamRejected { status, .. } => assert_eq!(status, 401),
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_instance_is_no_response() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let base = BaseUrl::new(&format!("http://127.0.0.1:{port}")).unwrap();
    let client = HassClient::new(base, "test-token").unwrap();

    let err = client.states().await.unwrap_err();
    assert!(matches!(err, Error::NoResponse));
}
