//! FanOutDispatcher - one notification per roster member per event.
//!
//! For each recipient, independently: persist a notification record, append
//! its id to the recipient's own list, and attempt a real-time push over the
//! recipient's channel. Recipients are processed concurrently; there is no
//! ordering guarantee between them.
//!
//! Failure isolation is the contract here: a push that finds nobody
//! listening, or a single recipient whose persistence fails, is logged and
//! never aborts the other recipients or the calling operation. The durable
//! record is the source of truth; the push is a best-effort duplicate.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::foundation::{AnnouncementId, MemberId, NotificationId};
use crate::domain::notification::{Notification, NotificationCategory};
use crate::ports::{MemberRepository, Notifier, NotificationRepository, NotifierError, PushPayload};

/// Counts of what a dispatch actually achieved.
///
/// Callers use this for logging only; a partial outcome is never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutOutcome {
    /// Notifications durably persisted.
    pub persisted: usize,
    /// Real-time pushes that found a live channel.
    pub pushed: usize,
}

/// Dispatcher that turns one event into N independent notifications.
pub struct FanOutDispatcher {
    notifications: Arc<dyn NotificationRepository>,
    members: Arc<dyn MemberRepository>,
    notifier: Arc<dyn Notifier>,
}

impl FanOutDispatcher {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        members: Arc<dyn MemberRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            notifications,
            members,
            notifier,
        }
    }

    /// Fans `message` out to every recipient in the roster.
    ///
    /// Infallible by design: per-recipient failures are logged and counted,
    /// not propagated.
    pub async fn dispatch(
        &self,
        recipients: &[MemberId],
        message: &str,
        category: NotificationCategory,
        source_id: Option<AnnouncementId>,
    ) -> FanOutOutcome {
        let deliveries = recipients
            .iter()
            .map(|recipient| self.deliver_one(*recipient, message, category, source_id));

        let results = join_all(deliveries).await;

        let outcome = results.iter().fold(FanOutOutcome::default(), |mut acc, d| {
            acc.persisted += usize::from(d.persisted);
            acc.pushed += usize::from(d.pushed);
            acc
        });

        debug!(
            recipients = recipients.len(),
            persisted = outcome.persisted,
            pushed = outcome.pushed,
            category = category_name(category),
            "fan-out complete"
        );
        outcome
    }

    async fn deliver_one(
        &self,
        recipient_id: MemberId,
        message: &str,
        category: NotificationCategory,
        source_id: Option<AnnouncementId>,
    ) -> Delivery {
        let notification = match Notification::new(
            NotificationId::new(),
            recipient_id,
            message.to_string(),
            category,
            source_id,
        ) {
            Ok(n) => n,
            Err(e) => {
                warn!(%recipient_id, error = %e, "skipping notification with invalid message");
                return Delivery::failed();
            }
        };

        if let Err(e) = self.notifications.save(&notification).await {
            warn!(%recipient_id, error = %e, "failed to persist notification");
            return Delivery::failed();
        }

        self.record_on_member(&recipient_id, *notification.id()).await;

        let pushed = match self
            .notifier
            .push_to(&recipient_id, PushPayload::new(message, category))
            .await
        {
            Ok(()) => true,
            Err(NotifierError::NotConnected(_)) => {
                debug!(%recipient_id, "recipient offline, durable record only");
                false
            }
            Err(e) => {
                warn!(%recipient_id, error = %e, "real-time push failed");
                false
            }
        };

        Delivery { persisted: true, pushed }
    }

    /// Appends the notification id to the recipient's own list. A missing
    /// or failing member record downgrades to a warning: the notification
    /// itself is already durable.
    async fn record_on_member(&self, recipient_id: &MemberId, notification_id: NotificationId) {
        match self.members.find_by_id(recipient_id).await {
            Ok(Some(mut member)) => {
                member.add_notification(notification_id);
                if let Err(e) = self.members.update(&member).await {
                    warn!(%recipient_id, error = %e, "failed to record notification on member");
                }
            }
            Ok(None) => {
                warn!(%recipient_id, "fan-out recipient is not in the directory");
            }
            Err(e) => {
                warn!(%recipient_id, error = %e, "failed to load fan-out recipient");
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Delivery {
    persisted: bool,
    pushed: bool,
}

impl Delivery {
    fn failed() -> Self {
        Self {
            persisted: false,
            pushed: false,
        }
    }
}

fn category_name(category: NotificationCategory) -> &'static str {
    match category {
        NotificationCategory::Reminder => "reminder",
        NotificationCategory::Warning => "warning",
        NotificationCategory::System => "system",
        NotificationCategory::Request => "request",
        NotificationCategory::Grade => "grade",
        NotificationCategory::Announcement => "announcement",
        NotificationCategory::Material => "material",
        NotificationCategory::Schedule => "schedule",
    }
}
