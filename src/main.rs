use anyhow::Context;
use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use book_recommender::config::{ConfigError, ServerConfig};
use book_recommender::dataset::load_dataset;
use book_recommender::recommend::handlers::{
    handle_health, handle_index, handle_recommend_books, handle_recommend_ui,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "book_recommender".to_string());

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            println!("{}", ServerConfig::usage(&program));
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", ServerConfig::usage(&program));
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    // 1. Dataset (all four artifacts or nothing):
    let dataset = load_dataset(&config.data_dir)
        .with_context(|| format!("Cannot start without data from {}", config.data_dir.display()))?;
    let dataset = Arc::new(dataset);

    // 2. HTTP Router:
    let app = Router::new()
        .route("/", get(handle_index))
        .route("/recommend", get(handle_recommend_ui))
        .route("/recommend_books", post(handle_recommend_books))
        .route("/health", get(handle_health))
        .layer(Extension(dataset))
        .layer(TraceLayer::new_for_http());

    // 3. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
