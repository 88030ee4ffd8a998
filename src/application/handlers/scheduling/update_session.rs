//! Update-session operation.
//!
//! Takes a sparse patch: absent fields keep their current value. A patch
//! that changes the placement re-runs conflict detection with the session's
//! own id excluded, so a session can always keep (or shrink within) its
//! current slot. Reference changes are validated against the directory and
//! then propagated to the back-reference lists.

use std::sync::Arc;

use chrono::NaiveTime;
use tracing::info;

use crate::application::handlers::notification::FanOutDispatcher;
use crate::domain::foundation::{ClassGroupId, CourseId, MemberId, SessionId, TimetableId};
use crate::domain::notification::NotificationCategory;
use crate::domain::scheduling::{
    has_conflict, CandidateSlot, ScheduleError, Session, SessionKind, TimeSlot, Weekday,
};
use crate::ports::{
    ClassGroupRepository, CourseRepository, MemberRepository, SessionRepository,
    TimetableRepository,
};

use super::ReferenceSynchronizer;

/// Sparse update to a session. `None` means "leave unchanged".
///
/// `timetable_id` is doubly optional: `None` leaves the assignment alone,
/// `Some(None)` detaches the session from its timetable.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub weekday: Option<Weekday>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub room: Option<String>,
    pub kind: Option<SessionKind>,
    pub course_id: Option<CourseId>,
    pub class_group_id: Option<ClassGroupId>,
    pub teacher_id: Option<MemberId>,
    pub timetable_id: Option<Option<TimetableId>>,
}

impl SessionPatch {
    fn changes_placement(&self) -> bool {
        self.weekday.is_some()
            || self.start.is_some()
            || self.end.is_some()
            || self.room.is_some()
    }
}

/// Handler for patching an existing session.
pub struct UpdateSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    courses: Arc<dyn CourseRepository>,
    class_groups: Arc<dyn ClassGroupRepository>,
    members: Arc<dyn MemberRepository>,
    timetables: Arc<dyn TimetableRepository>,
    sync: Arc<ReferenceSynchronizer>,
    dispatcher: Arc<FanOutDispatcher>,
}

impl UpdateSessionHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        courses: Arc<dyn CourseRepository>,
        class_groups: Arc<dyn ClassGroupRepository>,
        members: Arc<dyn MemberRepository>,
        timetables: Arc<dyn TimetableRepository>,
        sync: Arc<ReferenceSynchronizer>,
        dispatcher: Arc<FanOutDispatcher>,
    ) -> Self {
        Self {
            sessions,
            courses,
            class_groups,
            members,
            timetables,
            sync,
            dispatcher,
        }
    }

    /// Applies the patch and notifies the (possibly new) class roster.
    pub async fn handle(
        &self,
        id: &SessionId,
        patch: SessionPatch,
    ) -> Result<Session, ScheduleError> {
        let mut session = self
            .sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| ScheduleError::not_found("Session", id))?;
        let previous = session.refs();

        if patch.changes_placement() {
            self.reschedule(&mut session, &patch).await?;
        }
        if let Some(kind) = patch.kind {
            session.set_kind(kind);
        }
        self.reassign(&mut session, &patch).await?;

        self.sessions.update(&session).await?;
        self.sync.apply(session.id(), &previous, &session.refs()).await?;

        info!(session_id = %session.id(), "session updated");

        let roster = self.roster(session.class_group_id()).await;
        self.dispatcher
            .dispatch(&roster, "session modified", NotificationCategory::Schedule, None)
            .await;

        Ok(session)
    }

    /// Builds the effective placement from patch plus current values, then
    /// re-runs conflict detection excluding the session itself.
    async fn reschedule(
        &self,
        session: &mut Session,
        patch: &SessionPatch,
    ) -> Result<(), ScheduleError> {
        let weekday = patch.weekday.unwrap_or(session.weekday());
        let start = patch.start.unwrap_or_else(|| session.slot().start());
        let end = patch.end.unwrap_or_else(|| session.slot().end());
        let slot = TimeSlot::new(start, end)?;
        let room = match &patch.room {
            Some(room) => {
                let trimmed = room.trim();
                if trimmed.is_empty() {
                    return Err(ScheduleError::missing_field("room"));
                }
                trimmed.to_string()
            }
            None => session.room().to_string(),
        };

        let existing = self.sessions.find_active_by_placement(&room, weekday).await?;
        let candidate = CandidateSlot {
            weekday,
            slot,
            room: &room,
        };
        if has_conflict(&candidate, &existing, Some(session.id())) {
            return Err(ScheduleError::conflict(room, weekday, slot.to_string()));
        }

        session.reschedule(weekday, slot, room)?;
        Ok(())
    }

    /// Validates and applies reference changes from the patch.
    async fn reassign(
        &self,
        session: &mut Session,
        patch: &SessionPatch,
    ) -> Result<(), ScheduleError> {
        if let Some(course_id) = patch.course_id {
            self.courses
                .find_by_id(&course_id)
                .await?
                .ok_or_else(|| ScheduleError::not_found("Course", course_id))?;
            session.reassign_course(course_id);
        }
        if let Some(class_group_id) = patch.class_group_id {
            self.class_groups
                .find_by_id(&class_group_id)
                .await?
                .ok_or_else(|| ScheduleError::not_found("Class group", class_group_id))?;
            session.reassign_class_group(class_group_id);
        }
        if let Some(teacher_id) = patch.teacher_id {
            let member = self
                .members
                .find_by_id(&teacher_id)
                .await?
                .ok_or_else(|| ScheduleError::not_found("Member", teacher_id))?;
            if !member.is_teacher() {
                return Err(ScheduleError::invalid_role(teacher_id));
            }
            session.reassign_teacher(teacher_id);
        }
        if let Some(timetable_id) = patch.timetable_id {
            if let Some(id) = &timetable_id {
                self.timetables
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| ScheduleError::not_found("Timetable", id))?;
            }
            session.assign_timetable(timetable_id);
        }
        Ok(())
    }

    async fn roster(&self, class_group_id: &ClassGroupId) -> Vec<MemberId> {
        match self.class_groups.find_by_id(class_group_id).await {
            Ok(Some(group)) => group.student_ids().to_vec(),
            _ => Vec::new(),
        }
    }
}
