//! WebSocket endpoint for real-time notification delivery.
//!
//! `GET /ws/:member_id` upgrades the connection and subscribes it to the
//! recipient's broadcast channel; everything the channel notifier pushes is
//! forwarded as a text frame. Inbound frames are ignored except for close.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::realtime::ChannelRegistry;
use crate::domain::foundation::MemberId;

/// State for the websocket endpoint.
#[derive(Clone)]
pub struct WsState {
    pub registry: Arc<ChannelRegistry>,
}

impl WsState {
    pub fn new(registry: Arc<ChannelRegistry>) -> Self {
        Self { registry }
    }
}

/// Routes for the websocket endpoint.
pub fn ws_routes(state: WsState) -> Router {
    Router::new()
        .route("/ws/:member_id", get(ws_handler))
        .with_state(state)
}

/// GET /ws/:member_id - upgrade and stream notifications
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(member_id): Path<String>,
    State(state): State<WsState>,
) -> Response {
    let member_id: MemberId = match member_id.parse() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid member ID")),
            )
                .into_response()
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, member_id, state))
}

/// Runs for the lifetime of one connection: forward channel messages out,
/// watch the inbound side for disconnect.
async fn handle_socket(socket: WebSocket, member_id: MemberId, state: WsState) {
    let (mut sender, mut receiver) = socket.split();
    let mut channel_rx = state.registry.subscribe(&member_id).await;
    debug!(%member_id, "websocket connected");

    let mut send_task = {
        let member_id = member_id;
        tokio::spawn(async move {
            loop {
                match channel_rx.recv().await {
                    Ok(payload) => {
                        if sender.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(%member_id, skipped, "slow websocket, dropped messages");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    };

    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) | Err(_) => break,
                // Inbound content is not part of the protocol.
                Ok(_) => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    // Dropping the receiver lets the registry prune the channel.
    debug!(%member_id, "websocket disconnected");
}
