//! HTTP adapter: serves a route table on a loopback listener.
//!
//! Browser suites usually intercept in-page; here the same route table
//! sits behind a real listener so a browser, a dev UI, or the scenario
//! harness can hit it over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use url::Url;

use crate::config::MockConfig;
use crate::error::Result;
use crate::intercept::{InterceptedRequest, MockResponse, Outcome, RouteTable};
use crate::routes::{self, MockState, SharedState};

/// Request bodies larger than this are rejected outright; fixture traffic
/// is a few hundred bytes.
const BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone)]
struct AdapterState {
    table: Arc<RouteTable>,
    base_url: String,
    upstream: Option<String>,
    http: reqwest::Client,
}

/// A running mock backend bound to a loopback address.
///
/// Dropping the handle shuts the listener down; [`MockServer::shutdown`]
/// does the same but waits for the serve task to finish.
pub struct MockServer {
    base_url: String,
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl MockServer {
    /// Start a server with freshly seeded session state and the standard
    /// fixture routes.
    pub async fn start(config: MockConfig) -> Result<Self> {
        Self::start_with_state(config, routes::shared(MockState::seeded())).await
    }

    /// Start a server around caller-provided session state, for scenarios
    /// that need a different seed.
    pub async fn start_with_state(config: MockConfig, state: SharedState) -> Result<Self> {
        let mut table = RouteTable::new();
        routes::register(&mut table, state)?;
        Self::serve(config, table).await
    }

    /// Serve an arbitrary route table.
    pub async fn serve(config: MockConfig, table: RouteTable) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind(config.addr).await?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{addr}");

        let adapter = AdapterState {
            table: Arc::new(table),
            base_url: base_url.clone(),
            upstream: config.upstream,
            http: reqwest::Client::new(),
        };

        let app = Router::new()
            .route("/health", get(health_handler))
            .fallback(intercept_handler)
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(adapter);

        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                // Resolves on explicit shutdown or when the handle drops.
                let _ = rx.await;
            });
            if let Err(err) = serve.await {
                error!(%err, "mock server terminated abnormally");
            }
        });

        info!(%base_url, "mock backend listening");
        Ok(Self {
            base_url,
            addr,
            shutdown: Some(tx),
            task,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop the listener and wait for the serve task to exit.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.task.await;
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "pizzamock"
    }))
}

/// Every non-health request funnels through here and into the route table.
async fn intercept_handler(State(adapter): State<AdapterState>, req: Request) -> Response {
    let (parts, body) = req.into_parts();

    let bytes = match axum::body::to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(%err, "failed to read request body");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };
    let body_json = if bytes.is_empty() {
        None
    } else {
        serde_json::from_slice(&bytes).ok()
    };

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let full_url = match Url::parse(&format!("{}{}", adapter.base_url, path_and_query)) {
        Ok(url) => url,
        Err(err) => {
            warn!(%err, uri = %parts.uri, "unparseable request URL");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let request = InterceptedRequest::new(parts.method.clone(), full_url, body_json);
    match adapter.table.dispatch(&request) {
        Outcome::Fulfilled(resp) => fulfill(resp),
        Outcome::Unhandled => match adapter.upstream.clone() {
            Some(upstream) => forward(&adapter, &upstream, parts, bytes).await,
            None => (
                StatusCode::NOT_IMPLEMENTED,
                Json(json!({"error": "no route interception for this request"})),
            )
                .into_response(),
        },
    }
}

fn fulfill(resp: MockResponse) -> Response {
    match resp.body {
        Some(body) => (resp.status, Json(body)).into_response(),
        None => resp.status.into_response(),
    }
}

/// Proxy an unintercepted request to the real backend.
async fn forward(
    adapter: &AdapterState,
    upstream: &str,
    parts: axum::http::request::Parts,
    bytes: Bytes,
) -> Response {
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let target = format!("{}{}", upstream.trim_end_matches('/'), path_and_query);

    let mut outbound = adapter
        .http
        .request(parts.method, &target)
        .body(bytes.to_vec());
    if let Some(content_type) = parts.headers.get(header::CONTENT_TYPE) {
        outbound = outbound.header(header::CONTENT_TYPE, content_type);
    }

    match outbound.send().await {
        Ok(resp) => {
            let status = resp.status();
            let content_type = resp.headers().get(header::CONTENT_TYPE).cloned();
            let body = resp.bytes().await.unwrap_or_default();
            let mut response = (status, body).into_response();
            if let Some(content_type) = content_type {
                response
                    .headers_mut()
                    .insert(header::CONTENT_TYPE, content_type);
            }
            response
        }
        Err(err) => {
            warn!(%err, target, "upstream forward failed");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}
