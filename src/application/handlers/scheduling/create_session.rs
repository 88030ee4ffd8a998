//! Create-session operation.
//!
//! Validation order: referenced aggregates must exist, the teacher must
//! carry the teacher role, and the placement must be conflict-free. Nothing
//! is written until every check passes. On success the new session is
//! persisted, back-references are synchronized, and the class roster gets a
//! fan-out notification.

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

/// Input to the create-session operation.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub course_id: CourseId,
    pub class_group_id: ClassGroupId,
    pub teacher_id: MemberId,
    pub timetable_id: Option<TimetableId>,
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub room: String,
    pub kind: SessionKind,
}

/// Handler for creating a single session.
pub struct CreateSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    courses: Arc<dyn CourseRepository>,
    class_groups: Arc<dyn ClassGroupRepository>,
    members: Arc<dyn MemberRepository>,
    timetables: Arc<dyn TimetableRepository>,
    sync: Arc<ReferenceSynchronizer>,
    dispatcher: Arc<FanOutDispatcher>,
}

impl CreateSessionHandler {
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

    /// Creates a session and notifies the class roster.
    pub async fn handle(&self, command: CreateSessionCommand) -> Result<Session, ScheduleError> {
        let (session, roster) = self.place(command).await?;

        self.dispatcher
            .dispatch(&roster, "new session added", NotificationCategory::Schedule, None)
            .await;

        Ok(session)
    }

    /// Conflict-checked placement without the fan-out.
    ///
    /// Batch timetable creation calls this directly so the roster hears
    /// about the timetable once rather than about every contained session.
    /// Returns the created session together with the class roster.
    pub(crate) async fn place(
        &self,
        command: CreateSessionCommand,
    ) -> Result<(Session, Vec<MemberId>), ScheduleError> {
        let slot = TimeSlot::new(command.start, command.end)?;

        self.courses
            .find_by_id(&command.course_id)
            .await?
            .ok_or_else(|| ScheduleError::not_found("Course", command.course_id))?;

        let class_group = self
            .class_groups
            .find_by_id(&command.class_group_id)
            .await?
            .ok_or_else(|| ScheduleError::not_found("Class group", command.class_group_id))?;

        let teacher = self
            .members
            .find_by_id(&command.teacher_id)
            .await?
            .ok_or_else(|| ScheduleError::not_found("Member", command.teacher_id))?;
        if !teacher.is_teacher() {
            return Err(ScheduleError::invalid_role(command.teacher_id));
        }

        if let Some(timetable_id) = &command.timetable_id {
            self.timetables
                .find_by_id(timetable_id)
                .await?
                .ok_or_else(|| ScheduleError::not_found("Timetable", timetable_id))?;
        }

        // Construct first: room validation and trimming live on the entity,
        // and the conflict check must see the trimmed room.
        let session = Session::new(
            SessionId::new(),
            command.course_id,
            command.class_group_id,
            command.teacher_id,
            command.timetable_id,
            command.weekday,
            slot,
            command.room,
            command.kind,
        )?;

        let existing = self
            .sessions
            .find_active_by_placement(session.room(), session.weekday())
            .await?;
        let candidate = CandidateSlot {
            weekday: session.weekday(),
            slot: *session.slot(),
            room: session.room(),
        };
        if has_conflict(&candidate, &existing, None) {
            return Err(ScheduleError::conflict(
                session.room(),
                session.weekday(),
                session.slot().to_string(),
            ));
        }

        self.sessions.save(&session).await?;
        self.sync.attach(&session).await?;

        info!(
            session_id = %session.id(),
            room = session.room(),
            weekday = %session.weekday(),
            "session created"
        );

        Ok((session, class_group.student_ids().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::NotificationRepository;
    use crate::adapters::memory::{
        InMemoryClassGroupRepository, InMemoryCourseRepository, InMemoryMemberRepository,
        InMemoryNotificationRepository, InMemorySessionRepository, InMemoryTimetableRepository,
    };
    use crate::adapters::realtime::RecordingNotifier;
    use crate::domain::directory::{ClassGroup, Course, Member, MemberRole};

    struct Fixture {
        handler: CreateSessionHandler,
        sessions: Arc<InMemorySessionRepository>,
        courses: Arc<InMemoryCourseRepository>,
        class_groups: Arc<InMemoryClassGroupRepository>,
        members: Arc<InMemoryMemberRepository>,
        notifications: Arc<InMemoryNotificationRepository>,
    }

    fn fixture() -> Fixture {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let courses = Arc::new(InMemoryCourseRepository::new());
        let class_groups = Arc::new(InMemoryClassGroupRepository::new());
        let members = Arc::new(InMemoryMemberRepository::new());
        let timetables = Arc::new(InMemoryTimetableRepository::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());

        let sync = Arc::new(ReferenceSynchronizer::new(
            courses.clone(),
            class_groups.clone(),
            members.clone(),
            timetables.clone(),
        ));
        let dispatcher = Arc::new(FanOutDispatcher::new(
            notifications.clone(),
            members.clone(),
            Arc::new(RecordingNotifier::disconnected()),
        ));
        let handler = CreateSessionHandler::new(
            sessions.clone(),
            courses.clone(),
            class_groups.clone(),
            members.clone(),
            timetables,
            sync,
            dispatcher,
        );

        Fixture {
            handler,
            sessions,
            courses,
            class_groups,
            members,
            notifications,
        }
    }

    async fn seed(fx: &Fixture, students: usize) -> CreateSessionCommand {
        let course =
            Course::new(CourseId::new(), "MATH101".to_string(), "Calculus I".to_string()).unwrap();
        let mut group = ClassGroup::new(ClassGroupId::new(), "CS-1A".to_string()).unwrap();
        for i in 0..students {
            let student =
                Member::new(MemberId::new(), format!("Student {i}"), MemberRole::Student).unwrap();
            group.enroll(*student.id());
            fx.members.save(&student).await.unwrap();
        }
        let teacher = Member::new(MemberId::new(), "Ada".to_string(), MemberRole::Teacher).unwrap();

        fx.courses.save(&course).await.unwrap();
        fx.class_groups.save(&group).await.unwrap();
        fx.members.save(&teacher).await.unwrap();

        CreateSessionCommand {
            course_id: *course.id(),
            class_group_id: *group.id(),
            teacher_id: *teacher.id(),
            timetable_id: None,
            weekday: Weekday::Monday,
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            room: "101".to_string(),
            kind: SessionKind::Lecture,
        }
    }

    #[tokio::test]
    async fn creates_session_and_syncs_references() {
        let fx = fixture();
        let command = seed(&fx, 0).await;

        let session = fx.handler.handle(command.clone()).await.unwrap();

        assert!(fx.sessions.find_by_id(session.id()).await.unwrap().is_some());
        let course = fx.courses.find_by_id(&command.course_id).await.unwrap().unwrap();
        assert!(course.session_ids().contains(session.id()));
        let teacher = fx.members.find_by_id(&command.teacher_id).await.unwrap().unwrap();
        assert!(teacher.session_ids().contains(session.id()));
    }

    #[tokio::test]
    async fn overlapping_placement_is_rejected_with_no_writes() {
        let fx = fixture();
        let command = seed(&fx, 0).await;
        fx.handler.handle(command.clone()).await.unwrap();

        // 08:00-10:00 overlaps the existing 09:00-11:00 in the same room.
        let overlapping = CreateSessionCommand {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            ..command
        };
        let result = fx.handler.handle(overlapping).await;

        assert!(matches!(result, Err(ScheduleError::Conflict { .. })));
        assert_eq!(fx.sessions.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn boundary_touch_is_not_a_conflict() {
        let fx = fixture();
        let command = seed(&fx, 0).await;
        fx.handler.handle(command.clone()).await.unwrap();

        // Existing ends at 11:00; starting exactly there is allowed.
        let adjacent = CreateSessionCommand {
            start: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            ..command
        };
        assert!(fx.handler.handle(adjacent).await.is_ok());
        assert_eq!(fx.sessions.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn same_slot_in_another_room_is_allowed() {
        let fx = fixture();
        let command = seed(&fx, 0).await;
        fx.handler.handle(command.clone()).await.unwrap();

        let other_room = CreateSessionCommand {
            room: "202".to_string(),
            ..command
        };
        assert!(fx.handler.handle(other_room).await.is_ok());
    }

    #[tokio::test]
    async fn non_teacher_is_rejected() {
        let fx = fixture();
        let mut command = seed(&fx, 0).await;
        let student =
            Member::new(MemberId::new(), "Sam".to_string(), MemberRole::Student).unwrap();
        fx.members.save(&student).await.unwrap();
        command.teacher_id = *student.id();

        let result = fx.handler.handle(command).await;
        assert!(matches!(result, Err(ScheduleError::InvalidRole { .. })));
        assert_eq!(fx.sessions.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_course_is_not_found() {
        let fx = fixture();
        let mut command = seed(&fx, 0).await;
        command.course_id = CourseId::new();

        let result = fx.handler.handle(command).await;
        assert!(matches!(result, Err(ScheduleError::NotFound { entity: "Course", .. })));
    }

    #[tokio::test]
    async fn inverted_slot_is_rejected() {
        let fx = fixture();
        let mut command = seed(&fx, 0).await;
        command.start = NaiveTime::from_hms_opt(11, 0, 0).unwrap();
        command.end = NaiveTime::from_hms_opt(9, 0, 0).unwrap();

        let result = fx.handler.handle(command).await;
        assert!(matches!(result, Err(ScheduleError::Validation(_))));
    }

    #[tokio::test]
    async fn roster_receives_one_notification_each() {
        let fx = fixture();
        let command = seed(&fx, 3).await;

        fx.handler.handle(command.clone()).await.unwrap();

        let group = fx
            .class_groups
            .find_by_id(&command.class_group_id)
            .await
            .unwrap()
            .unwrap();
        for student_id in group.student_ids() {
            let inbox = fx.notifications.find_by_recipient(student_id).await.unwrap();
            assert_eq!(inbox.len(), 1);
            assert!(!inbox[0].is_read());
        }
    }
}
