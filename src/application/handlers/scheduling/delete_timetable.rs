//! Cascade deletion of a timetable.
//!
//! The timetable owns its sessions, so deleting it deletes every contained
//! session, detaches their back-references from courses and teachers,
//! removes the timetable from its class group, and tells the roster once.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::notification::FanOutDispatcher;
use crate::domain::foundation::{MemberId, TimetableId};
use crate::domain::notification::NotificationCategory;
use crate::domain::scheduling::ScheduleError;
use crate::ports::{ClassGroupRepository, SessionRepository, TimetableRepository};

use super::ReferenceSynchronizer;

/// Handler for deleting a timetable and everything it owns.
pub struct DeleteTimetableHandler {
    timetables: Arc<dyn TimetableRepository>,
    sessions: Arc<dyn SessionRepository>,
    class_groups: Arc<dyn ClassGroupRepository>,
    sync: Arc<ReferenceSynchronizer>,
    dispatcher: Arc<FanOutDispatcher>,
}

impl DeleteTimetableHandler {
    pub fn new(
        timetables: Arc<dyn TimetableRepository>,
        sessions: Arc<dyn SessionRepository>,
        class_groups: Arc<dyn ClassGroupRepository>,
        sync: Arc<ReferenceSynchronizer>,
        dispatcher: Arc<FanOutDispatcher>,
    ) -> Self {
        Self {
            timetables,
            sessions,
            class_groups,
            sync,
            dispatcher,
        }
    }

    /// Deletes the timetable, cascading to its sessions. Returns how many
    /// sessions were removed.
    pub async fn handle(&self, id: &TimetableId) -> Result<u64, ScheduleError> {
        let timetable = self
            .timetables
            .find_by_id(id)
            .await?
            .ok_or_else(|| ScheduleError::not_found("Timetable", id))?;

        let roster = self.roster(&timetable).await;

        let owned = self.sessions.find_by_timetable(id).await?;
        let removed = owned.len() as u64;
        for session in &owned {
            self.sync.detach(session).await?;
            self.sessions.delete(session.id()).await?;
        }

        self.detach_from_class_group(&timetable).await;
        self.timetables.delete(id).await?;

        info!(timetable_id = %id, sessions = removed, "timetable deleted");

        self.dispatcher
            .dispatch(
                &roster,
                "timetable cancelled",
                NotificationCategory::Schedule,
                None,
            )
            .await;

        Ok(removed)
    }

    async fn roster(&self, timetable: &crate::domain::scheduling::Timetable) -> Vec<MemberId> {
        match self.class_groups.find_by_id(timetable.class_group_id()).await {
            Ok(Some(group)) => group.student_ids().to_vec(),
            _ => Vec::new(),
        }
    }

    async fn detach_from_class_group(&self, timetable: &crate::domain::scheduling::Timetable) {
        match self.class_groups.find_by_id(timetable.class_group_id()).await {
            Ok(Some(mut group)) => {
                if group.remove_timetable(timetable.id()) {
                    if let Err(e) = self.class_groups.update(&group).await {
                        warn!(timetable_id = %timetable.id(), error = %e, "failed to detach timetable from class group");
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(timetable_id = %timetable.id(), error = %e, "failed to load class group");
            }
        }
    }
}
