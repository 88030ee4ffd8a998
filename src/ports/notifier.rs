//! Notifier port - injected real-time push capability.
//!
//! The fan-out dispatcher receives this as a constructor dependency instead
//! of reaching for an ambient transport handle, which keeps the dispatcher
//! testable with a recording fake.
//!
//! Delivery is at-most-once and best-effort: a failed push is logged by the
//! caller and never retried. The persisted notification record remains the
//! recoverable source of truth.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::notification::NotificationCategory;

/// What goes over the wire for a single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushPayload {
    pub message: String,
    pub category: NotificationCategory,
    pub timestamp: Timestamp,
}

impl PushPayload {
    /// Builds a payload stamped with the current time.
    pub fn new(message: impl Into<String>, category: NotificationCategory) -> Self {
        Self {
            message: message.into(),
            category,
            timestamp: Timestamp::now(),
        }
    }
}

/// Errors a push attempt can report.
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    /// The recipient has no live channel right now.
    #[error("recipient {0} has no active channel")]
    NotConnected(MemberId),

    /// The transport itself failed.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Port for pushing a payload to one recipient's real-time channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempts delivery to the channel keyed by `recipient_id`.
    ///
    /// Callers treat any error as "recipient will read the durable record
    /// later" and must not fail the surrounding operation.
    async fn push_to(
        &self,
        recipient_id: &MemberId,
        payload: PushPayload,
    ) -> Result<(), NotifierError>;
}
