//! API route handlers for the gateway.

use axum::{Json, extract::State};
use std::sync::Arc;

use deskmate_core::types::ConversationTurn;

use super::server::AppState;

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "deskmate-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// System information endpoint.
pub async fn system_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let uptime = state.start_time.elapsed();
    Json(serde_json::json!({
        "name": "Deskmate",
        "version": env!("CARGO_PKG_VERSION"),
        "platform": format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        "uptime_secs": uptime.as_secs(),
        "provider": state.provider_name,
        "model": state.model_name,
        "ai_enabled": state.responder.is_some(),
        "knowledge_entries": state.selector.knowledge().len(),
        "gateway": {
            "host": state.gateway_config.host,
            "port": state.gateway_config.port,
        }
    }))
}

/// Chat endpoint. Body: `{"message": "...", "history": [{role, content}]}`.
///
/// History is caller-owned and forwarded only to the AI stage; the reply is
/// always a response string — selection failures do not exist and provider
/// failures fall through to local answers.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let message = body["message"].as_str().unwrap_or("");
    if message.is_empty() {
        return Json(serde_json::json!({"ok": false, "error": "Message is required"}));
    }

    let history: Vec<ConversationTurn> =
        serde_json::from_value(body["history"].clone()).unwrap_or_default();

    let reply = state.selector.respond(message, &history, state.ai()).await;

    Json(serde_json::json!({
        "ok": true,
        "response": reply.text,
        "provenance": reply.provenance,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskmate_core::config::GatewayConfig;
    use deskmate_responder::ResponseSelector;
    use serde_json::json;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            gateway_config: GatewayConfig::default(),
            provider_name: "openai".into(),
            model_name: "gpt-3.5-turbo".into(),
            start_time: std::time::Instant::now(),
            selector: Arc::new(ResponseSelector::builtin()),
            responder: None,
        })
    }

    #[tokio::test]
    async fn test_health_check_shape() {
        let body = health_check().await.0;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "deskmate-gateway");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_system_info_shape() {
        let body = system_info(State(test_state())).await.0;
        assert_eq!(body["name"], "Deskmate");
        assert_eq!(body["provider"], "openai");
        assert_eq!(body["ai_enabled"], false);
        assert!(body["knowledge_entries"].as_u64().unwrap() > 0);
        assert_eq!(body["gateway"]["port"], 3000);
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_message() {
        let body = chat(State(test_state()), Json(json!({"message": ""}))).await.0;
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Message is required");
    }

    #[tokio::test]
    async fn test_chat_rejects_missing_message() {
        let body = chat(State(test_state()), Json(json!({}))).await.0;
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn test_chat_answers_with_provenance() {
        let body = chat(
            State(test_state()),
            Json(json!({"message": "how do i set a reminder"})),
        )
        .await
        .0;
        assert_eq!(body["ok"], true);
        assert_eq!(body["provenance"], "kb-fuzzy");
        assert_eq!(
            body["response"],
            "You can say 'Set a reminder for [reminder details] at [time]'."
        );
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_chat_unmatched_message_gets_default() {
        let body = chat(
            State(test_state()),
            Json(json!({"message": "yo what's up", "history": [
                {"role": "user", "content": "earlier"},
                {"role": "assistant", "content": "reply"}
            ]})),
        )
        .await
        .0;
        assert_eq!(body["ok"], true);
        assert_eq!(body["provenance"], "default");
    }
}
