//! In-memory notification repository.
//!
//! Stored as an append-ordered `Vec` so "newest first" falls out of
//! reversing insertion order, without depending on timestamp resolution.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    AnnouncementId, DomainError, ErrorCode, MemberId, NotificationId,
};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

/// Notification storage backed by an append-ordered `Vec`.
#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn save(&self, notification: &Notification) -> Result<(), DomainError> {
        let mut notifications = self.notifications.write().await;
        notifications.push(notification.clone());
        Ok(())
    }

    async fn update(&self, notification: &Notification) -> Result<(), DomainError> {
        let mut notifications = self.notifications.write().await;
        match notifications.iter_mut().find(|n| n.id() == notification.id()) {
            Some(stored) => {
                *stored = notification.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::NotificationNotFound,
                format!("Notification not found: {}", notification.id()),
            )),
        }
    }

    async fn find_by_id(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, DomainError> {
        let notifications = self.notifications.read().await;
        Ok(notifications.iter().find(|n| n.id() == id).cloned())
    }

    async fn find_by_recipient(
        &self,
        recipient_id: &MemberId,
    ) -> Result<Vec<Notification>, DomainError> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .iter()
            .rev()
            .filter(|n| n.recipient_id() == recipient_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &NotificationId) -> Result<(), DomainError> {
        let mut notifications = self.notifications.write().await;
        let before = notifications.len();
        notifications.retain(|n| n.id() != id);
        if notifications.len() == before {
            return Err(DomainError::new(
                ErrorCode::NotificationNotFound,
                format!("Notification not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn delete_by_recipient(&self, recipient_id: &MemberId) -> Result<u64, DomainError> {
        let mut notifications = self.notifications.write().await;
        let before = notifications.len();
        notifications.retain(|n| n.recipient_id() != recipient_id);
        Ok((before - notifications.len()) as u64)
    }

    async fn delete_by_source(&self, source_id: &AnnouncementId) -> Result<u64, DomainError> {
        let mut notifications = self.notifications.write().await;
        let before = notifications.len();
        notifications.retain(|n| n.source_id() != Some(source_id));
        Ok((before - notifications.len()) as u64)
    }
}
