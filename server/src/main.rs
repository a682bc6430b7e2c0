mod config;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ProxyConfig::from_env().expect("invalid proxy configuration");
    let upstream = services::upstream::UpstreamClient::new(&config).expect("upstream client init failed");
    tracing::info!(upstream = upstream.base_url(), timeout = ?config.request_timeout, "upstream configured");

    let state = state::AppState::new(upstream);
    let app = routes::app(state);

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "sampling proxy listening");
    axum::serve(listener, app).await.expect("server failed");
}
