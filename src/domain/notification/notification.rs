//! Notification aggregate entity.
//!
//! One notification is addressed to exactly one recipient and is owned by
//! them. Fan-out creates N independent notifications from a single event;
//! after creation only the read flag ever changes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AnnouncementId, MemberId, NotificationId, Timestamp, ValidationError,
};

/// What triggered the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Reminder,
    Warning,
    System,
    Request,
    Grade,
    Announcement,
    Material,
    Schedule,
}

/// A durable message for a single recipient.
///
/// The persisted record is the source of truth; the real-time push is a
/// best-effort duplicate of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient_id: MemberId,
    message: String,
    category: NotificationCategory,
    read: bool,
    source_id: Option<AnnouncementId>,
    created_at: Timestamp,
}

impl Notification {
    /// Creates an unread notification.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the message is blank
    pub fn new(
        id: NotificationId,
        recipient_id: MemberId,
        message: String,
        category: NotificationCategory,
        source_id: Option<AnnouncementId>,
    ) -> Result<Self, ValidationError> {
        let message = message.trim().to_string();
        if message.is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        Ok(Self {
            id,
            recipient_id,
            message,
            category,
            read: false,
            source_id,
            created_at: Timestamp::now(),
        })
    }

    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn recipient_id(&self) -> &MemberId {
        &self.recipient_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn category(&self) -> NotificationCategory {
        self.category
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn source_id(&self) -> Option<&AnnouncementId> {
        self.source_id.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Marks the notification read. Idempotent: returns false if it was
    /// already read.
    pub fn mark_read(&mut self) -> bool {
        if self.read {
            return false;
        }
        self.read = true;
        true
    }
}
