//! Batch timetable creation.
//!
//! The timetable is persisted first so contained sessions can reference it,
//! then each session spec is placed in order. Placement goes through the
//! same conflict-checked path as single-session creation, and because every
//! accepted spec is persisted before the next one is checked, later specs
//! conflict against earlier siblings in the same batch, not just against
//! pre-existing sessions.
//!
//! On any failure the whole batch is rolled back: the rollback is logged
//! before it acts, and every compensating step is idempotent and
//! individually logged on failure, so a crash mid-rollback leaves a record
//! of what still needs cleaning up and a retry converges.
//!
//! There is no cross-request lock between the conflict check and the write:
//! two concurrent batches can both pass the check and both persist. The
//! process-wide single-writer assumption is documented on the ports; under
//! that assumption the check-then-write window is never interleaved.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

use crate::application::handlers::notification::FanOutDispatcher;
use crate::domain::foundation::{ClassGroupId, CourseId, MemberId, TimetableId};
use crate::domain::notification::NotificationCategory;
use crate::domain::scheduling::{
    ScheduleError, Session, SessionKind, Timetable, Weekday,
};
use crate::ports::{ClassGroupRepository, SessionRepository, TimetableRepository};

use super::{CreateSessionCommand, CreateSessionHandler, ReferenceSynchronizer};

/// One session inside a timetable batch. The class group and timetable
/// come from the enclosing command.
#[derive(Debug, Clone)]
pub struct SessionSpec {
    pub course_id: CourseId,
    pub teacher_id: MemberId,
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub room: String,
    pub kind: SessionKind,
}

/// Input to the create-timetable operation.
#[derive(Debug, Clone)]
pub struct CreateTimetableCommand {
    pub class_group_id: ClassGroupId,
    pub title: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub sessions: Vec<SessionSpec>,
}

/// Handler for creating a timetable together with its sessions.
pub struct CreateTimetableHandler {
    timetables: Arc<dyn TimetableRepository>,
    class_groups: Arc<dyn ClassGroupRepository>,
    sessions: Arc<dyn SessionRepository>,
    registry: Arc<CreateSessionHandler>,
    sync: Arc<ReferenceSynchronizer>,
    dispatcher: Arc<FanOutDispatcher>,
}

impl CreateTimetableHandler {
    pub fn new(
        timetables: Arc<dyn TimetableRepository>,
        class_groups: Arc<dyn ClassGroupRepository>,
        sessions: Arc<dyn SessionRepository>,
        registry: Arc<CreateSessionHandler>,
        sync: Arc<ReferenceSynchronizer>,
        dispatcher: Arc<FanOutDispatcher>,
    ) -> Self {
        Self {
            timetables,
            class_groups,
            sessions,
            registry,
            sync,
            dispatcher,
        }
    }

    /// Creates the timetable and all its sessions, or nothing.
    ///
    /// The roster hears about the batch once, as a single "new timetable"
    /// notification, regardless of how many sessions it contains.
    pub async fn handle(
        &self,
        command: CreateTimetableCommand,
    ) -> Result<Timetable, ScheduleError> {
        let class_group = self
            .class_groups
            .find_by_id(&command.class_group_id)
            .await?
            .ok_or_else(|| ScheduleError::not_found("Class group", command.class_group_id))?;

        let timetable = Timetable::new(
            TimetableId::new(),
            command.class_group_id,
            command.title,
            command.starts_on,
            command.ends_on,
        )?;
        self.timetables.save(&timetable).await?;

        let mut created: Vec<Session> = Vec::with_capacity(command.sessions.len());
        for spec in command.sessions {
            let placement = CreateSessionCommand {
                course_id: spec.course_id,
                class_group_id: command.class_group_id,
                teacher_id: spec.teacher_id,
                timetable_id: Some(*timetable.id()),
                weekday: spec.weekday,
                start: spec.start,
                end: spec.end,
                room: spec.room,
                kind: spec.kind,
            };
            match self.registry.place(placement).await {
                Ok((session, _)) => created.push(session),
                Err(e) => {
                    self.roll_back(&timetable, &created).await;
                    return Err(e);
                }
            }
        }

        // Placement synced session ids onto the stored timetable; the local
        // copy is stale.
        let timetable = self
            .timetables
            .find_by_id(timetable.id())
            .await?
            .unwrap_or(timetable);

        self.attach_to_class_group(&timetable).await;

        info!(
            timetable_id = %timetable.id(),
            sessions = timetable.session_count(),
            "timetable created"
        );

        self.dispatcher
            .dispatch(
                class_group.student_ids(),
                "new timetable",
                NotificationCategory::Schedule,
                None,
            )
            .await;

        Ok(timetable)
    }

    /// Compensating rollback: logged before acting, idempotent throughout.
    async fn roll_back(&self, timetable: &Timetable, created: &[Session]) {
        warn!(
            timetable_id = %timetable.id(),
            created = created.len(),
            "timetable batch failed, rolling back"
        );

        for session in created {
            if let Err(e) = self.sync.detach(session).await {
                warn!(session_id = %session.id(), error = %e, "rollback: detach failed");
            }
            if let Err(e) = self.sessions.delete(session.id()).await {
                warn!(session_id = %session.id(), error = %e, "rollback: delete failed");
            }
        }
        if let Err(e) = self.timetables.delete(timetable.id()).await {
            warn!(timetable_id = %timetable.id(), error = %e, "rollback: timetable delete failed");
        }
    }

    async fn attach_to_class_group(&self, timetable: &Timetable) {
        match self.class_groups.find_by_id(timetable.class_group_id()).await {
            Ok(Some(mut group)) => {
                if group.add_timetable(*timetable.id()) {
                    if let Err(e) = self.class_groups.update(&group).await {
                        warn!(timetable_id = %timetable.id(), error = %e, "failed to record timetable on class group");
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
