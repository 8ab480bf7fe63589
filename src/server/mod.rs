//! HTTP surface: router, CORS policy and server loop

pub mod handlers;
pub mod response;

use crate::config::{Config, CorsConfig};
use crate::error::{ChatAnalyzerError, Result};
use crate::processing::ChatAnalyzer;
use axum::http::{HeaderValue, Method};
use axum::routing::post;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

pub const CHAT_MESSAGE_PATH: &str = "/chat-message";

/// State shared by every request; the model inside is read-only
#[derive(Clone)]
pub struct AppState {
    pub analyzer: ChatAnalyzer,
}

pub fn create_router(analyzer: ChatAnalyzer, cors: &CorsConfig) -> Router {
    Router::new()
        .route(CHAT_MESSAGE_PATH, post(handlers::chat_message))
        .layer(create_cors(cors))
        .with_state(AppState { analyzer })
}

/// POST only, any header. "Any origin" mirrors the request origin because
/// credentials cannot be combined with a literal `*`.
pub fn create_cors(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allow_any_origin {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter(|origin| {
                let wildcard = origin.trim() == "*";
                if wildcard {
                    log::warn!("Ignoring '*' in cors.allowed_origins; set cors.allow_any_origin instead");
                }
                !wildcard
            })
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials)
}

pub async fn serve(config: &Config, analyzer: ChatAnalyzer) -> Result<()> {
    let address = config.bind_address();
    let model_name = analyzer.model_name().to_string();
    let router = create_router(analyzer, &config.cors);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| ChatAnalyzerError::Server(format!("Failed to bind {}: {}", address, e)))?;

    log::info!("Serving model '{}' on http://{}{}", model_name, address, CHAT_MESSAGE_PATH);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ChatAnalyzerError::Server(e.to_string()))?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
