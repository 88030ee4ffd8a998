//! HTTP adapters - REST API and websocket endpoint.

pub mod error;
pub mod notification;
pub mod scheduling;
pub mod ws;

use axum::routing::get;
use axum::{Json, Router};

pub use notification::NotificationHandlers;
pub use scheduling::SchedulingHandlers;
pub use ws::WsState;

/// Assembles the full application router.
pub fn app_router(
    scheduling: SchedulingHandlers,
    notifications: NotificationHandlers,
    ws_state: WsState,
) -> Router {
    Router::new()
        .nest("/api/sessions", scheduling::session_routes(scheduling.clone()))
        .nest("/api/timetables", scheduling::timetable_routes(scheduling))
        .nest(
            "/api/notifications",
            notification::notification_routes(notifications),
        )
        .merge(ws::ws_routes(ws_state))
        .route("/health", get(health))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
