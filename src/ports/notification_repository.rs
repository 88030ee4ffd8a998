//! Notification repository port.

use async_trait::async_trait;

use crate::domain::foundation::{AnnouncementId, DomainError, MemberId, NotificationId};
use crate::domain::notification::Notification;

/// Repository port for Notification persistence.
///
/// The durable record behind the best-effort real-time push; a recipient
/// who was offline during the push reads it from here.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persists a new notification.
    async fn save(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Persists changes (the read flag) to an existing notification.
    ///
    /// # Errors
    ///
    /// - `NotificationNotFound` if the notification does not exist
    async fn update(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Finds a notification by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &NotificationId)
        -> Result<Option<Notification>, DomainError>;

    /// All notifications addressed to a recipient, newest first.
    async fn find_by_recipient(
        &self,
        recipient_id: &MemberId,
    ) -> Result<Vec<Notification>, DomainError>;

    /// Deletes a notification.
    ///
    /// # Errors
    ///
    /// - `NotificationNotFound` if the notification does not exist
    async fn delete(&self, id: &NotificationId) -> Result<(), DomainError>;

    /// Deletes every notification addressed to a recipient, returning how
    /// many were removed.
    async fn delete_by_recipient(&self, recipient_id: &MemberId) -> Result<u64, DomainError>;

    /// Deletes every notification produced by a source announcement,
    /// returning how many were removed.
    async fn delete_by_source(&self, source_id: &AnnouncementId) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn NotificationRepository) {}
    }
}
