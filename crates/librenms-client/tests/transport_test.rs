// Transport and envelope tests against a wiremock LibreNMS.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use librenms_client::{ClientConfig, LibreNmsError, Transport, TransportErrorKind};

// ── Helpers ─────────────────────────────────────────────────────────

const TOKEN: &str = "0123456789abcdef";

async fn setup() -> (MockServer, Transport) {
    let server = MockServer::start().await;
    let config = ClientConfig::new(server.uri(), TOKEN).with_user_agent("transport-test/1.0");
    let transport = Transport::new(&config).expect("transport");
    (server, transport)
}

// ── Request shape ───────────────────────────────────────────────────

#[tokio::test]
async fn test_every_request_carries_fixed_headers() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/system"))
        .and(header("X-Auth-Token", TOKEN))
        .and(header("User-Agent", "transport-test/1.0"))
        .and(header("Accept", "*/*"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "system": [{ "local_ver": "24.1.0" }],
            "count": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = transport
        .get(&transport.api_url("/system"))
        .await
        .expect("request should succeed");

    assert_eq!(envelope.code, 200);
    assert_eq!(envelope.message(), None);
    assert!(envelope.contains("system"));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let (server, transport) = setup().await;
    let payload = json!({ "hostname": "sw1", "community": "public" });

    Mock::given(method("POST"))
        .and(path("/api/v0/devices"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "ok",
            "message": "Device sw1 has been added successfully",
            "devices": [{ "device_id": 12, "hostname": "sw1" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = transport
        .post(&transport.api_url("devices"), Some(&payload))
        .await
        .expect("created");

    assert_eq!(envelope.code, 201);
    assert_eq!(
        envelope.message().as_deref(),
        Some("Device sw1 has been added successfully")
    );
}

#[tokio::test]
async fn test_response_headers_are_exposed() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/ports"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "abc-123")
                .set_body_json(json!({ "status": "ok", "ports": [] })),
        )
        .mount(&server)
        .await;

    let envelope = transport.get(&transport.api_url("/ports")).await.expect("ok");
    assert_eq!(envelope.headers.get("x-request-id"), Some("abc-123"));
    assert_eq!(envelope.headers.media_type().as_deref(), Some("application/json"));

    let merged = envelope.to_value();
    assert_eq!(merged["code"], 200);
    assert_eq!(merged["status"], "ok");
}

// ── Failure classification ─────────────────────────────────────────

#[tokio::test]
async fn test_http_error_uses_backend_message() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error",
            "message": "Device ghost does not exist"
        })))
        .mount(&server)
        .await;

    let err = transport
        .get(&transport.api_url("/devices/ghost"))
        .await
        .expect_err("404 must fail");

    match &err {
        LibreNmsError::Http { status, message } => {
            assert_eq!(*status, 404);
            assert_eq!(message, "Device ghost does not exist");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_http_error_without_body_points_at_url() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/system"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let url = transport.api_url("/system");
    let err = transport.get(&url).await.expect_err("401 must fail");

    assert_eq!(err.status(), Some(401));
    assert_eq!(
        err.message(),
        format!("Please verify URL {url} and client settings")
    );
}

#[tokio::test]
async fn test_backend_error_on_success_status() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "Invalid query type"
        })))
        .mount(&server)
        .await;

    let err = transport
        .get(&transport.api_url("/devices"))
        .await
        .expect_err("status=error must fail");

    assert!(matches!(
        err,
        LibreNmsError::Backend { status: 200, ref message } if message.starts_with("Invalid query type URL : ") && message.ends_with("/api/v0/devices")
    ));
}

#[tokio::test]
async fn test_invalid_json_on_success_is_decode_error() {
    let (server, transport) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/system"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
        .mount(&server)
        .await;

    let err = transport
        .get(&transport.api_url("/system"))
        .await
        .expect_err("garbage body");
    assert!(matches!(err, LibreNmsError::Decode(_)));
}

#[tokio::test]
async fn test_png_body_becomes_image() {
    let (server, transport) = setup().await;
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00];

    Mock::given(method("GET"))
        .and(path("/api/v0/devices/42/device_processor"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png.clone(), "image/png"))
        .mount(&server)
        .await;

    let envelope = transport
        .get(&transport.api_url("/devices/42/device_processor"))
        .await
        .expect("graph");

    let image = envelope.image.expect("png payload");
    assert_eq!(image.content_type, "image/png");
    assert_eq!(image.data, png);
    assert!(envelope.fields.is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Nothing listens on the discard port
    let config = ClientConfig::new("http://127.0.0.1:9", TOKEN);
    let transport = Transport::new(&config).expect("transport");

    let err = transport
        .get(&transport.api_url("/system"))
        .await
        .expect_err("connection refused");

    match err {
        LibreNmsError::Transport { kind, .. } => assert_eq!(kind, TransportErrorKind::Connect),
        other => panic!("unexpected error: {other:?}"),
    }
}
