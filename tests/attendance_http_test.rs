//! Attendance client and geolocation tests against a local stub server.
//!
//! The stub mimics the upstream endpoints closely enough to exercise the
//! real reqwest client: request shape, headers, and the various answer
//! styles the clock endpoint is known to produce.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use ponto_client::config::{Config, MSG_REGISTERED};
use ponto_client::domain::{ClockEvent, Coordinates, EmployeeId, Session};
use ponto_client::errors::AppError;
use ponto_client::infra::{
    build_client, resolve_or_fallback, AttendanceApi, HttpAttendanceClient, IpGeolocator,
    LocationProvider,
};

// =============================================================================
// Stub Server
// =============================================================================

/// One request seen by the clock endpoint
#[derive(Debug, Clone)]
struct CapturedClock {
    authorization: Option<String>,
    content_type: Option<String>,
    body: Value,
}

struct StubState {
    clock_status: StatusCode,
    clock_body: &'static str,
    geo_status: StatusCode,
    geo_body: &'static str,
    login_delay: Duration,
    captured: Mutex<Vec<CapturedClock>>,
}

impl StubState {
    fn new(clock_status: StatusCode, clock_body: &'static str) -> Self {
        Self {
            clock_status,
            clock_body,
            geo_status: StatusCode::OK,
            geo_body: r#"{"ip":"203.0.113.7","loc":"-27.5969,-48.5495"}"#,
            login_delay: Duration::ZERO,
            captured: Mutex::new(Vec::new()),
        }
    }
}

async fn login(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    tokio::time::sleep(state.login_delay).await;

    if body["username"] == "alice" && body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({
                "token": "tok-1",
                "employee": [{"idMutuario": 4321, "nome": "Alice"}]
            })),
        )
            .into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn clock(State(state): State<Arc<StubState>>, headers: HeaderMap, body: String) -> Response {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.captured.lock().unwrap().push(CapturedClock {
        authorization: header_text(header::AUTHORIZATION),
        content_type: header_text(header::CONTENT_TYPE),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    (state.clock_status, state.clock_body).into_response()
}

async fn geolocation(State(state): State<Arc<StubState>>) -> Response {
    (state.geo_status, state.geo_body).into_response()
}

/// Start the stub on an ephemeral port and return its base URL.
async fn spawn_stub(state: Arc<StubState>) -> String {
    let router = Router::new()
        .route("/usuario/logar", post(login))
        .route("/ponto/bater", post(clock))
        .route("/json", get(geolocation))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        geolocation_url: format!("{}/json", base_url),
        http_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        ..Config::default()
    }
}

fn client_for(config: &Config) -> HttpAttendanceClient {
    HttpAttendanceClient::new(build_client(config).unwrap(), config)
}

fn session() -> Session {
    Session::new("tok-1", EmployeeId::from_value(json!(4321)).unwrap())
}

async fn submit_with(status: StatusCode, body: &'static str) -> Result<String, AppError> {
    let state = Arc::new(StubState::new(status, body));
    let base = spawn_stub(state).await;
    let client = client_for(&test_config(&base));
    let session = session();
    let event = ClockEvent::new(&session, Coordinates::fallback());
    client.submit_clock_event(&session, &event).await
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_returns_session() {
    let base = spawn_stub(Arc::new(StubState::new(StatusCode::CREATED, "OK"))).await;
    let client = client_for(&test_config(&base));

    let session = client.authenticate("alice", "secret").await.unwrap();

    assert_eq!(session.token, "tok-1");
    assert_eq!(session.employee_id.as_value(), &json!(4321));
}

#[tokio::test]
async fn test_login_rejected() {
    let base = spawn_stub(Arc::new(StubState::new(StatusCode::CREATED, "OK"))).await;
    let client = client_for(&test_config(&base));

    match client.authenticate("alice", "wrong").await {
        Err(AppError::AuthProtocol(msg)) => assert_eq!(msg, "Falha na autenticação: 401"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_login_unreachable_server() {
    // Reserve a port, then close it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = client_for(&test_config(&base));
    let result = client.authenticate("alice", "secret").await;

    assert!(matches!(result, Err(AppError::AuthNetwork(_))));
}

#[tokio::test]
async fn test_login_timeout_is_network_error() {
    let mut state = StubState::new(StatusCode::CREATED, "OK");
    state.login_delay = Duration::from_secs(3);
    let base = spawn_stub(Arc::new(state)).await;

    let mut config = test_config(&base);
    config.http_timeout = Duration::from_millis(200);
    let client = client_for(&config);

    match client.authenticate("alice", "secret").await {
        Err(AppError::AuthNetwork(msg)) => assert_eq!(msg, "tempo limite excedido"),
        other => panic!("unexpected result: {:?}", other),
    }
}

// =============================================================================
// Clock Event Submission
// =============================================================================

#[tokio::test]
async fn test_clock_request_shape() {
    let state = Arc::new(StubState::new(StatusCode::CREATED, "OK"));
    let base = spawn_stub(state.clone()).await;
    let client = client_for(&test_config(&base));

    let session = session();
    let event = ClockEvent::new(&session, Coordinates::new(-27.5969, -48.5495));
    client.submit_clock_event(&session, &event).await.unwrap();

    let captured = state.captured.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].authorization.as_deref(), Some("Bearer tok-1"));
    assert_eq!(
        captured[0].content_type.as_deref(),
        Some("application/json; charset=UTF-8")
    );
    assert_eq!(
        captured[0].body,
        json!({
            "idMutuario": 4321,
            "latitude": -27.5969,
            "longitude": -48.5495,
            "precisao": 42.5,
            "meioBatida": "NAVEGADOR"
        })
    );
}

#[tokio::test]
async fn test_created_with_plain_ok() {
    let result = submit_with(StatusCode::CREATED, "OK").await;
    assert_eq!(result.unwrap(), MSG_REGISTERED);
}

#[tokio::test]
async fn test_ok_with_json_message() {
    let result = submit_with(StatusCode::OK, r#"{"message":"Ponto já registrado"}"#).await;
    assert_eq!(result.unwrap(), "Ponto já registrado");
}

#[tokio::test]
async fn test_bad_request_with_json_message() {
    match submit_with(StatusCode::BAD_REQUEST, r#"{"message":"Fora do horário"}"#).await {
        Err(AppError::Registration(msg)) => assert_eq!(msg, "Fora do horário"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_with_empty_body() {
    match submit_with(StatusCode::INTERNAL_SERVER_ERROR, "").await {
        Err(AppError::Registration(msg)) => assert!(msg.contains("500")),
        other => panic!("unexpected result: {:?}", other),
    }
}

// =============================================================================
// Geolocation
// =============================================================================

#[tokio::test]
async fn test_geolocation_reads_loc_field() {
    let base = spawn_stub(Arc::new(StubState::new(StatusCode::CREATED, "OK"))).await;
    let config = test_config(&base);
    let locator = IpGeolocator::new(build_client(&config).unwrap(), &config.geolocation_url);

    assert_eq!(
        locator.locate().await.unwrap(),
        Coordinates::new(-27.5969, -48.5495)
    );
}

#[tokio::test]
async fn test_geolocation_failure_falls_back() {
    let mut state = StubState::new(StatusCode::CREATED, "OK");
    state.geo_status = StatusCode::TOO_MANY_REQUESTS;
    state.geo_body = r#"{"error":"rate limited"}"#;
    let base = spawn_stub(Arc::new(state)).await;

    let config = test_config(&base);
    let locator = IpGeolocator::new(build_client(&config).unwrap(), &config.geolocation_url);

    assert!(matches!(locator.locate().await, Err(AppError::Location(_))));
    assert_eq!(resolve_or_fallback(&locator).await, Coordinates::fallback());
}
