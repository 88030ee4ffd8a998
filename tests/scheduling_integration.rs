//! Integration tests for the scheduling core.
//!
//! These tests verify the end-to-end flow:
//! 1. Command handlers validate against the directory aggregates
//! 2. Conflict detection guards every placement and reschedule
//! 3. Back-references stay synchronized across mutations
//! 4. Notifications fan out to the class roster and land in inboxes
//!
//! Uses the in-memory adapters plus a recording notifier, so the flows run
//! without a network transport.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use termtable::adapters::memory::{
    InMemoryClassGroupRepository, InMemoryCourseRepository, InMemoryMemberRepository,
    InMemoryNotificationRepository, InMemorySessionRepository, InMemoryTimetableRepository,
};
use termtable::adapters::realtime::RecordingNotifier;
use termtable::application::handlers::notification::{FanOutDispatcher, NotificationQueries};
use termtable::application::handlers::scheduling::{
    ClearSessionsHandler, CreateSessionCommand, CreateSessionHandler, CreateTimetableCommand,
    CreateTimetableHandler, DeleteSessionHandler, DeleteTimetableHandler, PublishTimetableHandler,
    ReferenceSynchronizer, SessionPatch, SessionSpec, UpdateSessionHandler,
};
use termtable::domain::directory::{ClassGroup, Course, Member, MemberRole};
use termtable::domain::foundation::{ClassGroupId, CourseId, MemberId};
use termtable::domain::scheduling::{ScheduleError, SessionKind, TimetableStatus, Weekday};
use termtable::ports::{ClassGroupRepository, CourseRepository, MemberRepository, SessionRepository, TimetableRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// The full application core wired against in-memory adapters.
struct App {
    sessions: Arc<InMemorySessionRepository>,
    timetables: Arc<InMemoryTimetableRepository>,
    courses: Arc<InMemoryCourseRepository>,
    class_groups: Arc<InMemoryClassGroupRepository>,
    members: Arc<InMemoryMemberRepository>,
    notifier: Arc<RecordingNotifier>,
    create_session: Arc<CreateSessionHandler>,
    update_session: UpdateSessionHandler,
    delete_session: DeleteSessionHandler,
    clear_sessions: ClearSessionsHandler,
    create_timetable: CreateTimetableHandler,
    publish_timetable: PublishTimetableHandler,
    delete_timetable: DeleteTimetableHandler,
    queries: NotificationQueries,
}

impl App {
    fn new() -> Self {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let timetables = Arc::new(InMemoryTimetableRepository::new());
        let courses = Arc::new(InMemoryCourseRepository::new());
        let class_groups = Arc::new(InMemoryClassGroupRepository::new());
        let members = Arc::new(InMemoryMemberRepository::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());
        let notifier = Arc::new(RecordingNotifier::connected());

        let sync = Arc::new(ReferenceSynchronizer::new(
            courses.clone(),
            class_groups.clone(),
            members.clone(),
            timetables.clone(),
        ));
        let dispatcher = Arc::new(FanOutDispatcher::new(
            notifications.clone(),
            members.clone(),
            notifier.clone(),
        ));

        let create_session = Arc::new(CreateSessionHandler::new(
            sessions.clone(),
            courses.clone(),
            class_groups.clone(),
            members.clone(),
            timetables.clone(),
            sync.clone(),
            dispatcher.clone(),
        ));

        Self {
            update_session: UpdateSessionHandler::new(
                sessions.clone(),
                courses.clone(),
                class_groups.clone(),
                members.clone(),
                timetables.clone(),
                sync.clone(),
                dispatcher.clone(),
            ),
            delete_session: DeleteSessionHandler::new(
                sessions.clone(),
                class_groups.clone(),
                sync.clone(),
                dispatcher.clone(),
            ),
            clear_sessions: ClearSessionsHandler::new(sessions.clone(), sync.clone()),
            create_timetable: CreateTimetableHandler::new(
                timetables.clone(),
                class_groups.clone(),
                sessions.clone(),
                create_session.clone(),
                sync.clone(),
                dispatcher.clone(),
            ),
            publish_timetable: PublishTimetableHandler::new(
                timetables.clone(),
                class_groups.clone(),
                dispatcher.clone(),
            ),
            delete_timetable: DeleteTimetableHandler::new(
                timetables.clone(),
                sessions.clone(),
                class_groups.clone(),
                sync,
                dispatcher,
            ),
            queries: NotificationQueries::new(notifications, members.clone()),
            create_session,
            sessions,
            timetables,
            courses,
            class_groups,
            members,
            notifier,
        }
    }

    /// Seeds one course, one class group with `student_count` students, and
    /// one teacher. Returns (course, group, teacher, students).
    async fn seed(&self, student_count: usize) -> (CourseId, ClassGroupId, MemberId, Vec<MemberId>) {
        let course_id = CourseId::new();
        let course = Course::new(course_id, "MATH-201".into(), "Linear Algebra".into()).unwrap();
        self.courses.save(&course).await.unwrap();

        let teacher_id = MemberId::new();
        let teacher = Member::new(teacher_id, "Prof. Osei".into(), MemberRole::Teacher).unwrap();
        self.members.save(&teacher).await.unwrap();

        let class_group_id = ClassGroupId::new();
        let mut group = ClassGroup::new(class_group_id, "2A".into()).unwrap();
        let mut students = Vec::new();
        for i in 0..student_count {
            let student_id = MemberId::new();
            let student =
                Member::new(student_id, format!("Student {i}"), MemberRole::Student).unwrap();
            self.members.save(&student).await.unwrap();
            group.enroll(student_id);
            students.push(student_id);
        }
        self.class_groups.save(&group).await.unwrap();

        (course_id, class_group_id, teacher_id, students)
    }
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn session_command(
    course_id: CourseId,
    class_group_id: ClassGroupId,
    teacher_id: MemberId,
    weekday: Weekday,
    start: NaiveTime,
    end: NaiveTime,
    room: &str,
) -> CreateSessionCommand {
    CreateSessionCommand {
        course_id,
        class_group_id,
        teacher_id,
        timetable_id: None,
        weekday,
        start,
        end,
        room: room.to_string(),
        kind: SessionKind::Lecture,
    }
}

fn spec(
    course_id: CourseId,
    teacher_id: MemberId,
    weekday: Weekday,
    start: NaiveTime,
    end: NaiveTime,
    room: &str,
) -> SessionSpec {
    SessionSpec {
        course_id,
        teacher_id,
        weekday,
        start,
        end,
        room: room.to_string(),
        kind: SessionKind::Lecture,
    }
}

// =============================================================================
// Conflict detection
// =============================================================================

/// An overlapping booking in the same room on the same weekday is rejected
/// and leaves the registry untouched.
#[tokio::test]
async fn overlapping_placement_is_rejected() {
    let app = App::new();
    let (course, group, teacher, _) = app.seed(1).await;

    app.create_session
        .handle(session_command(
            course,
            group,
            teacher,
            Weekday::Monday,
            time(9, 0),
            time(11, 0),
            "101",
        ))
        .await
        .unwrap();

    let result = app
        .create_session
        .handle(session_command(
            course,
            group,
            teacher,
            Weekday::Monday,
            time(8, 0),
            time(10, 0),
            "101",
        ))
        .await;

    assert!(matches!(result, Err(ScheduleError::Conflict { .. })));
    assert_eq!(app.sessions.count().await.unwrap(), 1);
}

/// Back-to-back sessions share a boundary instant without conflicting, and
/// other rooms and weekdays are independent.
#[tokio::test]
async fn touching_and_disjoint_placements_coexist() {
    let app = App::new();
    let (course, group, teacher, _) = app.seed(1).await;

    let base = session_command(
        course,
        group,
        teacher,
        Weekday::Monday,
        time(10, 0),
        time(12, 0),
        "101",
    );
    app.create_session.handle(base.clone()).await.unwrap();

    // Ends exactly where the next begins.
    let mut touching = base.clone();
    touching.start = time(12, 0);
    touching.end = time(13, 0);
    app.create_session.handle(touching).await.unwrap();

    // Same window, different room.
    let mut other_room = base.clone();
    other_room.room = "102".to_string();
    app.create_session.handle(other_room).await.unwrap();

    // Same window and room, different weekday.
    let mut other_day = base;
    other_day.weekday = Weekday::Tuesday;
    app.create_session.handle(other_day).await.unwrap();

    assert_eq!(app.sessions.count().await.unwrap(), 4);
}

/// A session rescheduled within its own window does not conflict with
/// itself, but does conflict with a neighbour.
#[tokio::test]
async fn reschedule_excludes_self_but_not_neighbours() {
    let app = App::new();
    let (course, group, teacher, _) = app.seed(1).await;

    let session = app
        .create_session
        .handle(session_command(
            course,
            group,
            teacher,
            Weekday::Monday,
            time(9, 0),
            time(11, 0),
            "101",
        ))
        .await
        .unwrap();
    app.create_session
        .handle(session_command(
            course,
            group,
            teacher,
            Weekday::Monday,
            time(13, 0),
            time(15, 0),
            "101",
        ))
        .await
        .unwrap();

    // Shrinking inside its own window is fine.
    let shrink = SessionPatch {
        start: Some(time(9, 30)),
        end: Some(time(10, 30)),
        ..Default::default()
    };
    let updated = app.update_session.handle(session.id(), shrink).await.unwrap();
    assert_eq!(updated.slot().start(), time(9, 30));

    // Moving onto the neighbour is not.
    let collide = SessionPatch {
        start: Some(time(14, 0)),
        end: Some(time(16, 0)),
        ..Default::default()
    };
    let result = app.update_session.handle(session.id(), collide).await;
    assert!(matches!(result, Err(ScheduleError::Conflict { .. })));
}

// =============================================================================
// Reference synchronization
// =============================================================================

/// Creating and deleting a session keeps teacher and class group
/// back-references in step.
#[tokio::test]
async fn session_lifecycle_synchronizes_back_references() {
    let app = App::new();
    let (course, group, teacher, _) = app.seed(2).await;

    let session = app
        .create_session
        .handle(session_command(
            course,
            group,
            teacher,
            Weekday::Wednesday,
            time(9, 0),
            time(10, 0),
            "201",
        ))
        .await
        .unwrap();

    let stored_teacher = app.members.find_by_id(&teacher).await.unwrap().unwrap();
    assert!(stored_teacher.session_ids().contains(session.id()));
    let stored_group = app.class_groups.find_by_id(&group).await.unwrap().unwrap();
    assert!(stored_group.session_ids().contains(session.id()));

    app.delete_session.handle(session.id()).await.unwrap();

    let stored_teacher = app.members.find_by_id(&teacher).await.unwrap().unwrap();
    assert!(stored_teacher.session_ids().is_empty());
    let stored_group = app.class_groups.find_by_id(&group).await.unwrap().unwrap();
    assert!(stored_group.session_ids().is_empty());
}

/// Clearing the registry removes every session and resets every
/// back-reference list.
#[tokio::test]
async fn clear_registry_resets_all_references() {
    let app = App::new();
    let (course, group, teacher, _) = app.seed(1).await;

    for (start, end) in [(9, 10), (10, 11), (11, 12)] {
        app.create_session
            .handle(session_command(
                course,
                group,
                teacher,
                Weekday::Friday,
                time(start, 0),
                time(end, 0),
                "301",
            ))
            .await
            .unwrap();
    }

    let removed = app.clear_sessions.handle().await.unwrap();
    assert_eq!(removed, 3);
    assert_eq!(app.sessions.count().await.unwrap(), 0);

    let stored_teacher = app.members.find_by_id(&teacher).await.unwrap().unwrap();
    assert!(stored_teacher.session_ids().is_empty());
    let stored_group = app.class_groups.find_by_id(&group).await.unwrap().unwrap();
    assert!(stored_group.session_ids().is_empty());
}

// =============================================================================
// Timetable lifecycle
// =============================================================================

fn timetable_command(
    class_group_id: ClassGroupId,
    sessions: Vec<SessionSpec>,
) -> CreateTimetableCommand {
    CreateTimetableCommand {
        class_group_id,
        title: "Autumn term".to_string(),
        starts_on: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        ends_on: NaiveDate::from_ymd_opt(2026, 12, 18).unwrap(),
        sessions,
    }
}

/// A timetable created with a batch of sessions links every one of them and
/// registers itself on the class group.
#[tokio::test]
async fn timetable_batch_creates_and_links_sessions() {
    let app = App::new();
    let (course, group, teacher, _) = app.seed(1).await;

    let timetable = app
        .create_timetable
        .handle(timetable_command(
            group,
            vec![
                spec(course, teacher, Weekday::Monday, time(9, 0), time(11, 0), "101"),
                spec(course, teacher, Weekday::Tuesday, time(9, 0), time(11, 0), "101"),
                spec(course, teacher, Weekday::Thursday, time(14, 0), time(16, 0), "102"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(timetable.status(), TimetableStatus::Draft);
    assert_eq!(timetable.session_count(), 3);
    assert_eq!(app.sessions.count().await.unwrap(), 3);

    for session_id in timetable.session_ids() {
        let session = app.sessions.find_by_id(session_id).await.unwrap().unwrap();
        assert_eq!(session.timetable_id(), Some(timetable.id()));
    }

    let stored_group = app.class_groups.find_by_id(&group).await.unwrap().unwrap();
    assert!(stored_group.timetable_ids().contains(timetable.id()));
}

/// When one spec of the batch conflicts with an earlier sibling, the whole
/// batch rolls back: no timetable, no sessions, no dangling references.
#[tokio::test]
async fn conflicting_batch_rolls_back_completely() {
    let app = App::new();
    let (course, group, teacher, students) = app.seed(2).await;

    let result = app
        .create_timetable
        .handle(timetable_command(
            group,
            vec![
                spec(course, teacher, Weekday::Monday, time(9, 0), time(11, 0), "101"),
                spec(course, teacher, Weekday::Tuesday, time(9, 0), time(11, 0), "101"),
                spec(course, teacher, Weekday::Wednesday, time(9, 0), time(11, 0), "101"),
                // Overlaps the Monday sibling.
                spec(course, teacher, Weekday::Monday, time(10, 0), time(12, 0), "101"),
            ],
        ))
        .await;

    assert!(matches!(result, Err(ScheduleError::Conflict { .. })));
    assert_eq!(app.sessions.count().await.unwrap(), 0);

    let stored_teacher = app.members.find_by_id(&teacher).await.unwrap().unwrap();
    assert!(stored_teacher.session_ids().is_empty());
    let stored_group = app.class_groups.find_by_id(&group).await.unwrap().unwrap();
    assert!(stored_group.session_ids().is_empty());
    assert!(stored_group.timetable_ids().is_empty());

    // Nobody heard about a timetable that never existed.
    for student in &students {
        let inbox = app.queries.list_for_recipient(student).await.unwrap();
        assert!(inbox.is_empty());
    }
}

/// Deleting a timetable cascades to its sessions and strips the class group
/// reference.
#[tokio::test]
async fn timetable_delete_cascades_to_sessions() {
    let app = App::new();
    let (course, group, teacher, _) = app.seed(1).await;

    let timetable = app
        .create_timetable
        .handle(timetable_command(
            group,
            vec![
                spec(course, teacher, Weekday::Monday, time(9, 0), time(11, 0), "101"),
                spec(course, teacher, Weekday::Wednesday, time(9, 0), time(11, 0), "101"),
                spec(course, teacher, Weekday::Friday, time(9, 0), time(11, 0), "101"),
            ],
        ))
        .await
        .unwrap();

    let removed = app.delete_timetable.handle(timetable.id()).await.unwrap();
    assert_eq!(removed, 3);
    assert_eq!(app.sessions.count().await.unwrap(), 0);
    assert!(app.timetables.find_by_id(timetable.id()).await.unwrap().is_none());

    let stored_group = app.class_groups.find_by_id(&group).await.unwrap().unwrap();
    assert!(stored_group.timetable_ids().is_empty());
    assert!(stored_group.session_ids().is_empty());
}

/// Draft timetables publish exactly once; the second attempt is an invalid
/// transition.
#[tokio::test]
async fn timetable_publishes_once() {
    let app = App::new();
    let (_, group, _, _) = app.seed(1).await;

    let timetable = app
        .create_timetable
        .handle(timetable_command(group, vec![]))
        .await
        .unwrap();

    let published = app.publish_timetable.handle(timetable.id()).await.unwrap();
    assert_eq!(published.status(), TimetableStatus::Published);

    let result = app.publish_timetable.handle(timetable.id()).await;
    assert!(matches!(result, Err(ScheduleError::InvalidState(_))));
}

// =============================================================================
// Notification fan-out
// =============================================================================

/// Every enrolled student receives an unread inbox entry and a push when a
/// session is created, and marking one read leaves the others unread.
#[tokio::test]
async fn fan_out_reaches_the_whole_roster() {
    let app = App::new();
    let (course, group, teacher, students) = app.seed(3).await;

    app.create_session
        .handle(session_command(
            course,
            group,
            teacher,
            Weekday::Monday,
            time(9, 0),
            time(10, 0),
            "101",
        ))
        .await
        .unwrap();

    for student in &students {
        let inbox = app.queries.list_for_recipient(student).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].message(), "new session added");
        assert!(!inbox[0].is_read());
    }
    assert_eq!(app.notifier.pushes().len(), 3);

    // Reading one student's copy does not touch the others.
    let first_inbox = app.queries.list_for_recipient(&students[0]).await.unwrap();
    let read = app.queries.mark_read(first_inbox[0].id()).await.unwrap();
    assert!(read.is_read());

    let second_inbox = app.queries.list_for_recipient(&students[1]).await.unwrap();
    assert!(!second_inbox[0].is_read());
}

/// A batch timetable creation notifies the roster once about the timetable,
/// not once per contained session.
#[tokio::test]
async fn timetable_batch_notifies_roster_once() {
    let app = App::new();
    let (course, group, teacher, students) = app.seed(2).await;

    app.create_timetable
        .handle(timetable_command(
            group,
            vec![
                spec(course, teacher, Weekday::Monday, time(9, 0), time(11, 0), "101"),
                spec(course, teacher, Weekday::Tuesday, time(9, 0), time(11, 0), "101"),
            ],
        ))
        .await
        .unwrap();

    for student in &students {
        let inbox = app.queries.list_for_recipient(student).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].message(), "new timetable");
    }
}

/// Inbox entries arrive newest first and survive independent deletion.
#[tokio::test]
async fn inbox_orders_newest_first() {
    let app = App::new();
    let (course, group, teacher, students) = app.seed(1).await;

    let session = app
        .create_session
        .handle(session_command(
            course,
            group,
            teacher,
            Weekday::Monday,
            time(9, 0),
            time(10, 0),
            "101",
        ))
        .await
        .unwrap();
    app.delete_session.handle(session.id()).await.unwrap();

    let student = &students[0];
    let inbox = app.queries.list_for_recipient(student).await.unwrap();
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0].message(), "session cancelled");
    assert_eq!(inbox[1].message(), "new session added");

    app.queries.delete(inbox[0].id()).await.unwrap();
    let inbox = app.queries.list_for_recipient(student).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].message(), "new session added");
}
