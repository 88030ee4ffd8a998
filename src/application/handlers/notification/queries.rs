//! Plain read/write surface over persisted notifications.
//!
//! No scheduling logic lives here: list, mark read, and the delete
//! variants are straight pass-throughs with id bookkeeping on the member.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::domain::foundation::{
    AnnouncementId, DomainError, MemberId, NotificationId,
};
use crate::domain::notification::Notification;
use crate::ports::{MemberRepository, NotificationRepository};

/// Errors surfaced by the notification query surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Notification not found: {0}")]
    NotFound(NotificationId),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<DomainError> for NotificationError {
    fn from(err: DomainError) -> Self {
        NotificationError::Infrastructure(err.to_string())
    }
}

/// Query/maintenance operations on a recipient's notifications.
pub struct NotificationQueries {
    notifications: Arc<dyn NotificationRepository>,
    members: Arc<dyn MemberRepository>,
}

impl NotificationQueries {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        members: Arc<dyn MemberRepository>,
    ) -> Self {
        Self {
            notifications,
            members,
        }
    }

    /// All notifications addressed to the recipient, newest first.
    pub async fn list_for_recipient(
        &self,
        recipient_id: &MemberId,
    ) -> Result<Vec<Notification>, NotificationError> {
        Ok(self.notifications.find_by_recipient(recipient_id).await?)
    }

    /// Marks one notification read. Marking an already-read notification
    /// is a no-op, not an error.
    pub async fn mark_read(
        &self,
        id: &NotificationId,
    ) -> Result<Notification, NotificationError> {
        let mut notification = self
            .notifications
            .find_by_id(id)
            .await?
            .ok_or(NotificationError::NotFound(*id))?;

        if notification.mark_read() {
            self.notifications.update(&notification).await?;
        }
        Ok(notification)
    }

    /// Deletes one notification and detaches it from the recipient's list.
    pub async fn delete(&self, id: &NotificationId) -> Result<(), NotificationError> {
        let notification = self
            .notifications
            .find_by_id(id)
            .await?
            .ok_or(NotificationError::NotFound(*id))?;

        self.notifications.delete(id).await?;
        self.detach_from_member(notification.recipient_id(), id).await;
        Ok(())
    }

    /// Deletes every notification addressed to the recipient.
    pub async fn delete_all_for_recipient(
        &self,
        recipient_id: &MemberId,
    ) -> Result<u64, NotificationError> {
        let removed = self.notifications.delete_by_recipient(recipient_id).await?;

        match self.members.find_by_id(recipient_id).await {
            Ok(Some(mut member)) => {
                member.clear_notifications();
                if let Err(e) = self.members.update(&member).await {
                    warn!(%recipient_id, error = %e, "failed to clear member notification list");
                }
            }
            Ok(None) => {}
            Err(e) => warn!(%recipient_id, error = %e, "failed to load member for cleanup"),
        }

        Ok(removed)
    }

    /// Deletes every notification produced by one source announcement.
    pub async fn delete_by_source(
        &self,
        source_id: &AnnouncementId,
    ) -> Result<u64, NotificationError> {
        Ok(self.notifications.delete_by_source(source_id).await?)
    }

    async fn detach_from_member(&self, recipient_id: &MemberId, id: &NotificationId) {
        match self.members.find_by_id(recipient_id).await {
            Ok(Some(mut member)) => {
                if member.remove_notification(id) {
                    if let Err(e) = self.members.update(&member).await {
                        warn!(%recipient_id, error = %e, "failed to detach notification from member");
                    }
                }
            }
            Ok(None) => {}
            Err(e) => warn!(%recipient_id, error = %e, "failed to load member for detach"),
        }
    }
}
