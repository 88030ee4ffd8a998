//! HTTP DTOs for the notification endpoints.

use serde::Serialize;

use crate::domain::notification::{Notification, NotificationCategory};

/// Notification view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub recipient_id: String,
    pub message: String,
    pub category: NotificationCategory,
    pub read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub created_at: String,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id().to_string(),
            recipient_id: notification.recipient_id().to_string(),
            message: notification.message().to_string(),
            category: notification.category(),
            read: notification.is_read(),
            source_id: notification.source_id().map(ToString::to_string),
            created_at: notification.created_at().to_string(),
        }
    }
}

/// Response for bulk-removal operations.
#[derive(Debug, Clone, Serialize)]
pub struct RemovedResponse {
    pub removed: u64,
}
