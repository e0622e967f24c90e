//! End-to-end session tests against a mock backend.
//!
//! Each test wires the real reqwest client and file-backed session storage
//! to a `wiremock` server standing in for the API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use intransit_application::{
    AuthenticatedTransport, FetchProfile, Login, LoginInput, Logout, SessionExpiredHandler,
    SessionStore, TransportError,
};
use intransit_domain::{ApiRequest, ApiSettings, Session};
use intransit_infrastructure::{FileSessionStorage, ReqwestHttpClient};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct ExpiredCounter(AtomicUsize);

impl SessionExpiredHandler for ExpiredCounter {
    fn on_session_expired(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

struct Client {
    _dir: TempDir,
    session: SessionStore,
    expired: Arc<ExpiredCounter>,
    transport: Arc<AuthenticatedTransport>,
}

async fn client(server: &MockServer, tokens: Option<(&str, &str)>) -> Client {
    let dir = TempDir::new().unwrap();
    let storage = FileSessionStorage::new(dir.path().join("session.json"));
    let session = SessionStore::new(Arc::new(storage));
    if let Some((access, refresh)) = tokens {
        session.set("access_token", access).await.unwrap();
        session.set("refresh_token", refresh).await.unwrap();
    }

    let settings = ApiSettings::with_base_url(format!("{}/api", server.uri()));
    let http = Arc::new(ReqwestHttpClient::new(&settings).unwrap());
    let expired = Arc::new(ExpiredCounter::default());
    let transport = Arc::new(AuthenticatedTransport::new(
        http,
        session.clone(),
        &settings,
        expired.clone(),
    ));

    Client {
        _dir: dir,
        session,
        expired,
        transport,
    }
}

#[tokio::test]
async fn test_expired_access_token_is_refreshed_and_request_replayed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .and(header("ngrok-skip-browser-warning", "true"))
        .and(body_json(json!({"refresh": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .and(header("authorization", "Bearer fresh"))
        .and(header("ngrok-skip-browser-warning", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let c = client(&server, Some(("stale", "r1"))).await;
    let response = c.transport.send(&ApiRequest::get("/orders/")).await.unwrap();

    assert_eq!(response.body_json(), Some(json!([{"id": 1}])));
    assert_eq!(c.session.load().await.unwrap(), Session::new("fresh", "r1"));
    assert_eq!(c.expired.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rejected_refresh_clears_persisted_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Token is blacklisted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let c = client(&server, Some(("stale", "revoked"))).await;
    let err = c
        .transport
        .send(&ApiRequest::get("/orders/"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::SessionExpired { .. }));
    assert!(err.requires_login());
    assert!(c.session.load().await.unwrap().is_empty());
    assert_eq!(c.expired.0.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": "fresh"}))
                .set_delay(std::time::Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(3)
        .mount(&server)
        .await;

    let c = client(&server, Some(("stale", "r1"))).await;
    let orders = ApiRequest::get("/orders/");
    let routes = ApiRequest::get("/routes/");
    let drivers = ApiRequest::get("/drivers/");
    let (a, b, d) = tokio::join!(
        c.transport.send(&orders),
        c.transport.send(&routes),
        c.transport.send(&drivers),
    );

    assert!(a.is_ok() && b.is_ok() && d.is_ok());
    assert_eq!(c.session.access_token().await.unwrap().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_login_failure_is_not_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "No active account found"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let c = client(&server, Some(("stale", "r1"))).await;
    let err = Login::new(c.transport.clone())
        .execute(LoginInput {
            username: "ops".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.message(), "No active account found");
}

#[tokio::test]
async fn test_login_profile_logout_round() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"username": "ops", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "user": {"id": 3, "username": "ops"},
            "tokens": {"access": "a1", "refresh": "r1"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"user": {"id": 3, "username": "ops"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout/"))
        .and(body_json(json!({"refresh": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let c = client(&server, None).await;
    Login::new(c.transport.clone())
        .execute(LoginInput {
            username: "ops".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    let user = FetchProfile::new(c.transport.clone()).execute().await.unwrap();
    assert_eq!(user.username, "ops");

    let output = Logout::new(c.transport.clone()).execute().await.unwrap();
    assert!(output.remote_revoked);
    assert!(c.session.load().await.unwrap().is_empty());
}
