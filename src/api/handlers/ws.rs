use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use tokio::sync::broadcast::error::RecvError;

use crate::api::ws_types::{RankingUpdate, WsMessage};
use crate::AppState;

/// Client text frame that counts as the first user interaction.
const UNLOCK_AUDIO: &str = "unlock_audio";

pub async fn handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    tracing::info!("Display client connected");

    let mut rx = state.ws_tx.subscribe();

    for msg in initial_messages(&state).await {
        if !send(&mut socket, &msg).await {
            return;
        }
    }

    loop {
        tokio::select! {
            msg = rx.recv() => {
                match msg {
                    Ok(ws_msg) => {
                        if !send(&mut socket, &ws_msg).await {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Display client lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            client_msg = socket.recv() => {
                match client_msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Text(text))) if text.trim() == UNLOCK_AUDIO => {
                        if state.center.unlock_audio().await {
                            tracing::info!("Audio unlocked by display client");
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
        }
    }

    tracing::info!("Display client disconnected");
}

/// Catch a fresh client up: the ranking state and whatever is on screen.
async fn initial_messages(state: &AppState) -> Vec<WsMessage> {
    let mut out = Vec::new();

    {
        let board = state.board.read().await;
        if let Some(last_update) = board.last_update() {
            out.push(WsMessage::RankingUpdate(RankingUpdate {
                last_update,
                sellers: board.snapshot().len(),
                total_pages: board.paginator().total_pages(),
            }));
        }
    }

    if let Some(head) = state.center.head().await {
        out.push(WsMessage::Notification(head));
    }

    out
}

async fn send(socket: &mut WebSocket, msg: &WsMessage) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => socket.send(Message::Text(json)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize WsMessage");
            true
        }
    }
}
