use axum::http::{header, Method};
use axum::routing::get;
use axum::{Extension, Router};
use glossary_search::config::ServerConfig;
use glossary_search::search::handlers::{
    handle_completion, handle_search_all, handle_search_field, handle_search_word, handle_suggest,
    handle_suggest_all,
};
use glossary_search::search::service::GlossarySearch;
use glossary_search::store::client::StoreClient;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Configuration:
    let config = ServerConfig::from_env()?;
    tracing::info!(
        "Using search engine at {} (index '{}')",
        config.store_url,
        config.index
    );

    // 2. Search service over the store client:
    let store = StoreClient::new(&config.store_url, &config.index);
    let service = Arc::new(GlossarySearch::new(Box::new(store)));

    // 3. Browser clients call from other origins:
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // 4. HTTP Router:
    let app = Router::new()
        .route("/search", get(handle_search_field))
        .route("/search/:word", get(handle_search_word))
        .route("/search_all", get(handle_search_all))
        .route("/suggest/:word", get(handle_suggest))
        .route("/completion/:word", get(handle_completion))
        .route("/suggest_all/:word", get(handle_suggest_all))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(service));

    // 5. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
