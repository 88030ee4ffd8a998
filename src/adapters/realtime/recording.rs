//! Recording notifier fake.
//!
//! Stands in for the channel notifier in handler tests: either accepts and
//! records every push, or reports every recipient as disconnected.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::MemberId;
use crate::ports::{Notifier, NotifierError, PushPayload};

/// Notifier fake that records pushes instead of delivering them.
pub struct RecordingNotifier {
    connected: bool,
    pushes: Mutex<Vec<(MemberId, PushPayload)>>,
}

impl RecordingNotifier {
    /// Every push succeeds and is recorded.
    pub fn connected() -> Self {
        Self {
            connected: true,
            pushes: Mutex::new(Vec::new()),
        }
    }

    /// Every push fails with `NotConnected`.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            pushes: Mutex::new(Vec::new()),
        }
    }

    /// Everything pushed so far, in arrival order.
    pub fn pushes(&self) -> Vec<(MemberId, PushPayload)> {
        self.pushes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn push_to(
        &self,
        recipient_id: &MemberId,
        payload: PushPayload,
    ) -> Result<(), NotifierError> {
        if !self.connected {
            return Err(NotifierError::NotConnected(*recipient_id));
        }
        self.pushes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((*recipient_id, payload));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::NotificationCategory;

    #[tokio::test]
    async fn connected_fake_records_in_order() {
        let notifier = RecordingNotifier::connected();
        let first = MemberId::new();
        let second = MemberId::new();

        notifier
            .push_to(&first, PushPayload::new("one", NotificationCategory::Schedule))
            .await
            .unwrap();
        notifier
            .push_to(&second, PushPayload::new("two", NotificationCategory::Schedule))
            .await
            .unwrap();

        let pushes = notifier.pushes();
        assert_eq!(pushes.len(), 2);
        assert_eq!(pushes[0].0, first);
        assert_eq!(pushes[1].1.message, "two");
    }

    #[tokio::test]
    async fn disconnected_fake_records_nothing() {
        let notifier = RecordingNotifier::disconnected();
        let result = notifier
            .push_to(&MemberId::new(), PushPayload::new("lost", NotificationCategory::System))
            .await;

        assert!(matches!(result, Err(NotifierError::NotConnected(_))));
        assert!(notifier.pushes().is_empty());
    }
}
