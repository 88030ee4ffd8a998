//! HTTP routes for the notification endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    delete_all_for_recipient, delete_notification, list_notifications, mark_read,
    NotificationHandlers,
};

/// Routes mounted under `/api/notifications`.
pub fn notification_routes(handlers: NotificationHandlers) -> Router {
    Router::new()
        .route(
            "/recipient/:member_id",
            get(list_notifications).delete(delete_all_for_recipient),
        )
        .route("/:id", delete(delete_notification))
        .route("/:id/read", post(mark_read))
        .with_state(handlers)
}
