//! WebSocket handler for chat via the gateway.
//!
//! Protocol:
//! → Client sends: {"type":"chat","content":"..."}
//! ← Server sends: {"type":"chat_response","request_id":"...","content":"...","provenance":"..."}
//!
//! Replies are single frames, not streams. The connection keeps a bounded
//! history of its own turns and forwards it to the selector, so the AI stage
//! sees the conversation while the local stages ignore it.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use std::sync::Arc;

use deskmate_core::types::ConversationTurn;

use super::server::AppState;

/// Turns kept per connection (user + assistant combined).
const MAX_HISTORY_TURNS: usize = 20;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    tracing::info!("WebSocket client connected");

    let welcome = serde_json::json!({
        "type": "connected",
        "message": "Deskmate Gateway — WebSocket connected",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": &state.provider_name,
        "ai_enabled": state.responder.is_some(),
        "capabilities": ["chat", "ping"],
    });
    if send_json(&mut socket, &welcome).await.is_err() {
        return;
    }

    let mut request_counter: u64 = 0;
    let mut history: Vec<ConversationTurn> = Vec::new();

    while let Some(msg) = socket.recv().await {
        match msg {
            Ok(Message::Text(text)) => {
                let json = match serde_json::from_str::<serde_json::Value>(&text) {
                    Ok(j) => j,
                    Err(e) => {
                        send_error(&mut socket, &format!("Invalid JSON: {e}")).await;
                        continue;
                    }
                };

                let msg_type = json["type"].as_str().unwrap_or("unknown");

                match msg_type {
                    "chat" => {
                        request_counter += 1;
                        let request_id = format!("req_{request_counter}");
                        let content = json["content"].as_str().unwrap_or("").to_string();

                        if content.is_empty() {
                            send_error(&mut socket, "Empty message").await;
                            continue;
                        }

                        tracing::info!(
                            "Chat req={request_id}: len={}, history={}",
                            content.len(),
                            history.len()
                        );

                        let reply = state.selector.respond(&content, &history, state.ai()).await;

                        history.push(ConversationTurn::user(&content));
                        history.push(ConversationTurn::assistant(&reply.text));
                        if history.len() > MAX_HISTORY_TURNS {
                            let skip = history.len() - MAX_HISTORY_TURNS;
                            history.drain(..skip);
                        }

                        let _ = send_json(
                            &mut socket,
                            &serde_json::json!({
                                "type": "chat_response",
                                "request_id": &request_id,
                                "content": &reply.text,
                                "provenance": reply.provenance,
                            }),
                        )
                        .await;
                    }

                    "ping" => {
                        let pong = serde_json::json!({
                            "type": "pong",
                            "timestamp": chrono::Utc::now().timestamp_millis(),
                        });
                        let _ = send_json(&mut socket, &pong).await;
                    }

                    "status" => {
                        let status = serde_json::json!({
                            "type": "status",
                            "requests_processed": request_counter,
                            "uptime_secs": state.start_time.elapsed().as_secs(),
                            "provider": &state.provider_name,
                            "ai_enabled": state.responder.is_some(),
                            "history_turns": history.len(),
                        });
                        let _ = send_json(&mut socket, &status).await;
                    }

                    _ => {
                        send_error(&mut socket, &format!("Unknown message type: {msg_type}")).await;
                    }
                }
            }
            Ok(Message::Ping(data)) => {
                let _ = socket.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) => {
                tracing::info!("WebSocket client disconnected (close frame)");
                break;
            }
            Err(e) => {
                tracing::error!("WebSocket error: {e}");
                break;
            }
            _ => {}
        }
    }

    tracing::info!("WebSocket connection closed (total requests: {request_counter})");
}

async fn send_json(socket: &mut WebSocket, value: &serde_json::Value) -> Result<(), ()> {
    socket
        .send(Message::Text(value.to_string().into()))
        .await
        .map_err(|e| {
            tracing::error!("WS send failed: {e}");
        })
}

async fn send_error(socket: &mut WebSocket, message: &str) {
    let error = serde_json::json!({
        "type": "error",
        "message": message,
    });
    let _ = send_json(socket, &error).await;
}
