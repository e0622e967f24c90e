//! Test doubles shared by the unit tests of this crate.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use intransit_domain::{ACCESS_TOKEN_KEY, ApiRequest, ApiResponse, ApiSettings, REFRESH_TOKEN_KEY};
use parking_lot::Mutex;

use crate::ports::{HttpClient, HttpClientError, SessionExpiredHandler};
use crate::session::{InMemorySessionStorage, SessionStore};
use crate::transport::AuthenticatedTransport;

pub const BASE_URL: &str = "http://api.test";

pub fn url(path: &str) -> String {
    format!("{BASE_URL}{path}")
}

#[derive(Clone)]
pub enum Reply {
    Response(ApiResponse),
    Fail(HttpClientError),
    Slow(Duration, ApiResponse),
}

/// HTTP double answering from per-URL queues. The last reply of a queue
/// is repeated once the queue is drained.
#[derive(Default)]
pub struct ScriptedHttpClient {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, path: &str, reply: Reply) {
        self.routes
            .lock()
            .entry(url(path))
            .or_default()
            .push_back(reply);
    }

    pub fn respond(&self, path: &str, status: u16, body: serde_json::Value) {
        self.on(path, Reply::Response(ApiResponse::json(status, &body)));
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<ApiRequest> {
        let target = url(path);
        self.calls().into_iter().filter(|c| c.url == target).collect()
    }

    fn next_reply(&self, url: &str) -> Option<Reply> {
        let mut routes = self.routes.lock();
        let queue = routes.get_mut(url)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute(
        &self,
        request: &ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse, HttpClientError>> + Send + '_>> {
        self.calls.lock().push(request.clone());
        let reply = self.next_reply(&request.url);

        Box::pin(async move {
            match reply {
                Some(Reply::Response(response)) => Ok(response),
                Some(Reply::Fail(error)) => Err(error),
                Some(Reply::Slow(delay, response)) => {
                    tokio::time::sleep(delay).await;
                    Ok(response)
                }
                None => Ok(ApiResponse::json(404, &serde_json::json!({"detail": "Not found."}))),
            }
        })
    }
}

#[derive(Default)]
pub struct CountingExpiredHandler {
    count: AtomicUsize,
}

impl CountingExpiredHandler {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl SessionExpiredHandler for CountingExpiredHandler {
    fn on_session_expired(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn session(access: Option<&str>, refresh: Option<&str>) -> SessionStore {
    let mut entries = Vec::new();
    if let Some(access) = access {
        entries.push((ACCESS_TOKEN_KEY, access));
    }
    if let Some(refresh) = refresh {
        entries.push((REFRESH_TOKEN_KEY, refresh));
    }
    SessionStore::new(Arc::new(InMemorySessionStorage::with_entries(entries)))
}

pub struct Harness {
    pub client: Arc<ScriptedHttpClient>,
    pub session: SessionStore,
    pub expired: Arc<CountingExpiredHandler>,
    pub transport: Arc<AuthenticatedTransport>,
}

pub fn harness(access: Option<&str>, refresh: Option<&str>) -> Harness {
    harness_with(access, refresh, ApiSettings::with_base_url(BASE_URL))
}

pub fn harness_with(access: Option<&str>, refresh: Option<&str>, settings: ApiSettings) -> Harness {
    let client = ScriptedHttpClient::new();
    let session = session(access, refresh);
    let expired = Arc::new(CountingExpiredHandler::default());
    let transport = Arc::new(AuthenticatedTransport::new(
        client.clone(),
        session.clone(),
        &settings,
        expired.clone(),
    ));
    Harness {
        client,
        session,
        expired,
        transport,
    }
}
