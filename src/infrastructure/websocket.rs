//! WebSocket feed of dispatched place notifications

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::infrastructure::state::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Forward the notification stream to one subscriber until it hangs up
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let mut rx = state.notifications.subscribe();

    tracing::info!("Notification subscriber connected");

    let forward_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(envelope) => {
                    let json = match serde_json::to_string(&envelope) {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!("Failed to serialize notification: {e}");
                            continue;
                        }
                    };
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Notification subscriber lagged, skipped {skipped} messages");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Drain the client side until it errors or closes
    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }

    forward_task.abort();
    tracing::info!("Notification subscriber disconnected");
}
