//! `Notifier` implementation over the channel registry.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::MemberId;
use crate::ports::{Notifier, NotifierError, PushPayload};

use super::ChannelRegistry;

/// Pushes JSON-encoded payloads onto per-recipient broadcast channels.
pub struct ChannelNotifier {
    registry: Arc<ChannelRegistry>,
}

impl ChannelNotifier {
    pub fn new(registry: Arc<ChannelRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn push_to(
        &self,
        recipient_id: &MemberId,
        payload: PushPayload,
    ) -> Result<(), NotifierError> {
        let encoded = serde_json::to_string(&payload)
            .map_err(|e| NotifierError::Transport(e.to_string()))?;

        let tx = self
            .registry
            .sender(recipient_id)
            .await
            .ok_or(NotifierError::NotConnected(*recipient_id))?;

        // The last receiver can vanish between lookup and send.
        tx.send(encoded)
            .map(|_| ())
            .map_err(|_| NotifierError::NotConnected(*recipient_id))
    }
}
