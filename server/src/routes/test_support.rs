//! Throwaway upstream and proxy servers for route tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Json};
use serde_json::{Value, json};

use crate::config::ProxyConfig;
use crate::services::upstream::UpstreamClient;
use crate::state::AppState;

pub(crate) async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Start a proxy whose backend is `upstream`; returns the proxy base URL.
pub(crate) async fn proxy_for(upstream: Router) -> String {
    let upstream_addr = serve(upstream).await;
    proxy_to(format!("http://{upstream_addr}/api")).await
}

pub(crate) async fn proxy_to(upstream_base_url: String) -> String {
    let config = ProxyConfig {
        port: 0,
        upstream_base_url,
        request_timeout: Some(Duration::from_secs(5)),
        connect_timeout: Duration::from_secs(2),
    };
    let state = AppState::new(UpstreamClient::new(&config).unwrap());
    let addr = serve(super::app(state)).await;
    format!("http://{addr}")
}

/// Base URL of a port nothing listens on.
pub(crate) fn unreachable_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let header = |name: HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "authorization": header(AUTHORIZATION),
        "content_type": header(CONTENT_TYPE),
        "body": serde_json::from_slice::<Value>(&body).ok(),
    }))
}

/// Upstream that reflects each request back as JSON.
pub(crate) fn echo_upstream() -> Router {
    Router::new().fallback(echo)
}

/// Upstream answering every request with `status` and a JSON `body`.
pub(crate) fn json_upstream(status: StatusCode, body: Value) -> Router {
    Router::new().fallback(move || {
        let body = body.clone();
        async move { (status, Json(body)) }
    })
}

/// Upstream answering every request with an HTML page.
pub(crate) fn html_upstream(status: StatusCode) -> Router {
    Router::new().fallback(move || async move {
        (status, [(CONTENT_TYPE, "text/html; charset=utf-8")], "<html>maintenance</html>").into_response()
    })
}
