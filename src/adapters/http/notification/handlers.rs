//! HTTP handlers for the notification endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::notification::{NotificationError, NotificationQueries};
use crate::domain::foundation::{MemberId, NotificationId};

use super::dto::{NotificationResponse, RemovedResponse};

#[derive(Clone)]
pub struct NotificationHandlers {
    queries: Arc<NotificationQueries>,
}

impl NotificationHandlers {
    pub fn new(queries: Arc<NotificationQueries>) -> Self {
        Self { queries }
    }
}

/// GET /api/notifications/recipient/:member_id - List a recipient's inbox
pub async fn list_notifications(
    State(handlers): State<NotificationHandlers>,
    Path(member_id): Path<String>,
) -> Response {
    let member_id = match member_id.parse::<MemberId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid member ID")),
            )
                .into_response()
        }
    };
    match handlers.queries.list_for_recipient(&member_id).await {
        Ok(notifications) => {
            let body: Vec<NotificationResponse> =
                notifications.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_notification_error(e),
    }
}

/// POST /api/notifications/:id/read - Mark one notification read
pub async fn mark_read(
    State(handlers): State<NotificationHandlers>,
    Path(notification_id): Path<String>,
) -> Response {
    let notification_id = match notification_id.parse::<NotificationId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid notification ID")),
            )
                .into_response()
        }
    };
    match handlers.queries.mark_read(&notification_id).await {
        Ok(notification) => {
            (StatusCode::OK, Json(NotificationResponse::from(notification))).into_response()
        }
        Err(e) => handle_notification_error(e),
    }
}

/// DELETE /api/notifications/:id - Delete one notification
pub async fn delete_notification(
    State(handlers): State<NotificationHandlers>,
    Path(notification_id): Path<String>,
) -> Response {
    let notification_id = match notification_id.parse::<NotificationId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid notification ID")),
            )
                .into_response()
        }
    };
    match handlers.queries.delete(&notification_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_notification_error(e),
    }
}

/// DELETE /api/notifications/recipient/:member_id - Empty a recipient's inbox
pub async fn delete_all_for_recipient(
    State(handlers): State<NotificationHandlers>,
    Path(member_id): Path<String>,
) -> Response {
    let member_id = match member_id.parse::<MemberId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid member ID")),
            )
                .into_response()
        }
    };
    match handlers.queries.delete_all_for_recipient(&member_id).await {
        Ok(removed) => (StatusCode::OK, Json(RemovedResponse { removed })).into_response(),
        Err(e) => handle_notification_error(e),
    }
}

fn handle_notification_error(error: NotificationError) -> Response {
    match error {
        NotificationError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(error.to_string())),
        )
            .into_response(),
        NotificationError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}
