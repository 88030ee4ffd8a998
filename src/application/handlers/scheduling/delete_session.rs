//! Delete-session operation.
//!
//! The roster is captured before anything is removed, because the class
//! group's back-reference list is part of what gets cleaned up.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::notification::FanOutDispatcher;
use crate::domain::foundation::SessionId;
use crate::domain::notification::NotificationCategory;
use crate::domain::scheduling::ScheduleError;
use crate::ports::{ClassGroupRepository, SessionRepository};

use super::ReferenceSynchronizer;

/// Handler for deleting a single session.
pub struct DeleteSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    class_groups: Arc<dyn ClassGroupRepository>,
    sync: Arc<ReferenceSynchronizer>,
    dispatcher: Arc<FanOutDispatcher>,
}

impl DeleteSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        class_groups: Arc<dyn ClassGroupRepository>,
        sync: Arc<ReferenceSynchronizer>,
        dispatcher: Arc<FanOutDispatcher>,
    ) -> Self {
        Self {
            sessions,
            class_groups,
            sync,
            dispatcher,
        }
    }

    /// Removes the session, detaches its back-references, and notifies the
    /// class roster.
    pub async fn handle(&self, id: &SessionId) -> Result<(), ScheduleError> {
        let session = self
            .sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| ScheduleError::not_found("Session", id))?;

        let roster = match self.class_groups.find_by_id(session.class_group_id()).await? {
            Some(group) => group.student_ids().to_vec(),
            None => Vec::new(),
        };

        self.sync.detach(&session).await?;
        self.sessions.delete(id).await?;

        info!(session_id = %id, "session deleted");

        self.dispatcher
            .dispatch(&roster, "session cancelled", NotificationCategory::Schedule, None)
            .await;

        Ok(())
    }
}
