use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

mod handlers;
mod models;
mod state;
mod template;
mod upload;

use state::AppState;

const DEFAULT_BIND: &str = "127.0.0.1:8501";
const DEFAULT_MAX_UPLOAD_MB: u32 = 50;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Resolve configuration: env vars > config file > defaults
    let config = embedc_core::config_file::load_config();
    let bind = std::env::var("EMBEDC_BIND")
        .ok()
        .or_else(|| config.bind().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_BIND.to_string());
    let max_upload_mb = std::env::var("EMBEDC_MAX_UPLOAD_MB")
        .ok()
        .and_then(|v| v.parse().ok())
        .or_else(|| config.max_upload_mb())
        .unwrap_or(DEFAULT_MAX_UPLOAD_MB);

    let order = embedc_ingest::resolve_backend_order(&[], &config);
    let extractor = embedc_ingest::extractor_with_order(order.as_deref());
    if extractor.is_empty() {
        tracing::warn!("no PDF backends compiled in; uploaded datasheets will yield no text");
    } else {
        tracing::info!(backends = ?extractor.backend_names(), "PDF backends ready");
    }

    let state = Arc::new(AppState { extractor });
    let app = router(state, max_upload_mb as usize * 1024 * 1024);

    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address: {bind}"))?;
    tracing::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>, body_limit_bytes: usize) -> axum::Router {
    let body_limit = axum::extract::DefaultBodyLimit::max(body_limit_bytes);

    axum::Router::new()
        .route("/", axum::routing::get(handlers::index::index))
        .route(
            "/generate",
            axum::routing::post(handlers::generate::generate_page),
        )
        .route(
            "/api/generate",
            axum::routing::post(handlers::generate::generate_json),
        )
        .layer(body_limit)
        .with_state(state)
}
