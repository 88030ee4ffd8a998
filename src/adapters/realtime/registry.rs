//! Per-recipient broadcast channel registry.
//!
//! One channel per recipient, created lazily on the first subscription. A
//! recipient may hold several live connections (several browser tabs); all
//! of them subscribe to the same channel. Channels whose last receiver is
//! gone are pruned on the next send attempt.

use std::collections::HashMap;

use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::domain::foundation::MemberId;

/// Registry mapping recipients to their live broadcast channels.
pub struct ChannelRegistry {
    capacity: usize,
    channels: RwLock<HashMap<MemberId, broadcast::Sender<String>>>,
}

impl ChannelRegistry {
    /// `capacity` bounds how many undelivered messages a slow connection
    /// can buffer before it starts lagging.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribes a new receiver for the recipient, creating the channel on
    /// first use.
    pub async fn subscribe(&self, member_id: &MemberId) -> broadcast::Receiver<String> {
        let mut channels = self.channels.write().await;
        match channels.get(member_id) {
            Some(tx) => tx.subscribe(),
            None => {
                let (tx, rx) = broadcast::channel(self.capacity);
                channels.insert(*member_id, tx);
                debug!(%member_id, "realtime channel opened");
                rx
            }
        }
    }

    /// The sender for a recipient's channel, if anyone is listening.
    ///
    /// A channel with no remaining receivers is pruned and reported as
    /// absent.
    pub async fn sender(&self, member_id: &MemberId) -> Option<broadcast::Sender<String>> {
        {
            let channels = self.channels.read().await;
            match channels.get(member_id) {
                Some(tx) if tx.receiver_count() > 0 => return Some(tx.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut channels = self.channels.write().await;
        if channels
            .get(member_id)
            .is_some_and(|tx| tx.receiver_count() == 0)
        {
            channels.remove(member_id);
            debug!(%member_id, "realtime channel pruned");
        }
        None
    }

    /// Whether the recipient has at least one live receiver.
    pub async fn is_connected(&self, member_id: &MemberId) -> bool {
        let channels = self.channels.read().await;
        channels
            .get(member_id)
            .is_some_and(|tx| tx.receiver_count() > 0)
    }

    /// Number of recipients with a registered channel (live or prunable).
    pub async fn channel_count(&self) -> usize {
        self.channels.read().await.len()
    }
}
