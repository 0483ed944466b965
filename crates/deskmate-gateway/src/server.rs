//! HTTP server implementation using Axum.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use deskmate_core::config::{DeskmateConfig, GatewayConfig};
use deskmate_core::traits::Responder;
use deskmate_knowledge::KnowledgeBase;
use deskmate_responder::{ResponseSelector, SelectorOptions};

/// Shared state for the gateway server.
///
/// The selector and knowledge base are immutable after start-up, so
/// concurrent request handlers share them through plain `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub gateway_config: GatewayConfig,
    pub provider_name: String,
    pub model_name: String,
    pub start_time: std::time::Instant,
    /// The response selection engine.
    pub selector: Arc<ResponseSelector>,
    /// Optional AI responder; absence means local-only answers.
    pub responder: Option<Arc<dyn Responder>>,
}

impl AppState {
    /// The AI capability as the selector expects it.
    pub fn ai(&self) -> Option<&dyn Responder> {
        self.responder.as_deref()
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let shared = Arc::new(state);

    Router::new()
        .route("/health", get(super::routes::health_check))
        .route("/api/v1/info", get(super::routes::system_info))
        .route("/api/v1/chat", post(super::routes::chat))
        .route("/ws", get(super::ws::ws_handler))
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers(Any)
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server.
pub async fn start(config: &DeskmateConfig) -> anyhow::Result<()> {
    // An invalid knowledge file is fatal: the selector must not come up
    // with a half-validated base.
    let knowledge = KnowledgeBase::from_config(&config.knowledge)?;
    if !config.knowledge.path.is_empty() {
        tracing::info!("Knowledge base extended from {}", config.knowledge.path);
    }
    tracing::info!("Knowledge base loaded: {} entries", knowledge.len());

    let selector = ResponseSelector::new(
        Arc::new(knowledge),
        SelectorOptions::from(&config.responder),
    );

    // AI responder is best-effort: a missing key or unknown provider only
    // disables stage 1.
    let responder: Option<Arc<dyn Responder>> =
        match deskmate_providers::create_responder(config) {
            Ok(r) if r.is_configured() => {
                tracing::info!("AI responder ready: {} ({})", r.name(), config.default_model);
                Some(Arc::from(r))
            }
            Ok(r) => {
                tracing::warn!(
                    "AI responder '{}' not configured — answering from local stages only",
                    r.name()
                );
                None
            }
            Err(e) => {
                tracing::warn!("No AI responder: {e} — answering from local stages only");
                None
            }
        };

    let state = AppState {
        gateway_config: config.gateway.clone(),
        provider_name: config.default_provider.clone(),
        model_name: config.default_model.clone(),
        start_time: std::time::Instant::now(),
        selector: Arc::new(selector),
        responder,
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Gateway server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
