//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use tokio::net::TcpListener;

use prompt_relay::config::{ApiKey, RelayConfig};
use prompt_relay::{HttpServer, Shutdown};

pub const TEST_API_KEY: &str = "sk-ant-test-key";

/// One request as seen by the mock upstream.
#[derive(Clone, Debug)]
#[allow(dead_code)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Requests received by a mock upstream, in arrival order.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Captured>>>);

#[allow(dead_code)]
impl Recorder {
    pub fn calls(&self) -> Vec<Captured> {
        self.0.lock().unwrap().clone()
    }
}

struct MockState<F> {
    recorder: Recorder,
    respond: Arc<F>,
}

impl<F> Clone for MockState<F> {
    fn clone(&self) -> Self {
        Self {
            recorder: self.recorder.clone(),
            respond: self.respond.clone(),
        }
    }
}

async fn mock_messages<F, Fut>(
    State(state): State<MockState<F>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    state.recorder.0.lock().unwrap().push(Captured { headers, body });
    let (status, text) = (state.respond)().await;
    (StatusCode::from_u16(status).unwrap(), text)
}

/// Start a programmable mock Messages endpoint on an ephemeral port.
/// Returns the endpoint URL and the request recorder.
pub async fn start_mock_upstream<F, Fut>(respond: F) -> (String, Recorder)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorder = Recorder::default();

    let app = Router::new()
        .route("/v1/messages", post(mock_messages::<F, Fut>))
        .with_state(MockState {
            recorder: recorder.clone(),
            respond: Arc::new(respond),
        });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{}/v1/messages", addr), recorder)
}

/// An endpoint URL on a port nothing listens on.
#[allow(dead_code)]
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1/messages", addr)
}

/// Default config pointed at `endpoint`, bypassing any system proxy.
pub fn relay_config(endpoint: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.endpoint = endpoint.to_string();
    config.upstream.use_system_proxy = false;
    config
}

/// Start the relay on an ephemeral port. Keep the `Shutdown` alive for the
/// duration of the test.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, ApiKey::new(TEST_API_KEY).unwrap()).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
