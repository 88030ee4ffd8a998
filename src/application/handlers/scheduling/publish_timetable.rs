//! Timetable lifecycle transitions: publish and archive.
//!
//! Both ride the monotonic draft -> published -> archived state machine on
//! the aggregate. Publishing notifies the class roster; archiving is an
//! administrative action and stays quiet.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::notification::FanOutDispatcher;
use crate::domain::foundation::TimetableId;
use crate::domain::notification::NotificationCategory;
use crate::domain::scheduling::{ScheduleError, Timetable};
use crate::ports::{ClassGroupRepository, TimetableRepository};

/// Handler for publishing a draft timetable.
pub struct PublishTimetableHandler {
    timetables: Arc<dyn TimetableRepository>,
    class_groups: Arc<dyn ClassGroupRepository>,
    dispatcher: Arc<FanOutDispatcher>,
}

impl PublishTimetableHandler {
    pub fn new(
        timetables: Arc<dyn TimetableRepository>,
        class_groups: Arc<dyn ClassGroupRepository>,
        dispatcher: Arc<FanOutDispatcher>,
    ) -> Self {
        Self {
            timetables,
            class_groups,
            dispatcher,
        }
    }

    /// Moves the timetable from draft to published and notifies the roster.
    pub async fn handle(&self, id: &TimetableId) -> Result<Timetable, ScheduleError> {
        let mut timetable = self
            .timetables
            .find_by_id(id)
            .await?
            .ok_or_else(|| ScheduleError::not_found("Timetable", id))?;

        timetable
            .publish()
            .map_err(|e| ScheduleError::invalid_state(e.to_string()))?;
        self.timetables.update(&timetable).await?;

        info!(timetable_id = %id, "timetable published");

        let roster = match self.class_groups.find_by_id(timetable.class_group_id()).await? {
            Some(group) => group.student_ids().to_vec(),
            None => Vec::new(),
        };
        self.dispatcher
            .dispatch(
                &roster,
                "timetable published",
                NotificationCategory::Schedule,
                None,
            )
            .await;

        Ok(timetable)
    }
}

/// Handler for archiving a published timetable. No fan-out.
pub struct ArchiveTimetableHandler {
    timetables: Arc<dyn TimetableRepository>,
}

impl ArchiveTimetableHandler {
    pub fn new(timetables: Arc<dyn TimetableRepository>) -> Self {
        Self { timetables }
    }

    /// Moves the timetable from published to archived.
    pub async fn handle(&self, id: &TimetableId) -> Result<Timetable, ScheduleError> {
        let mut timetable = self
            .timetables
            .find_by_id(id)
            .await?
            .ok_or_else(|| ScheduleError::not_found("Timetable", id))?;

        timetable
            .archive()
            .map_err(|e| ScheduleError::invalid_state(e.to_string()))?;
        self.timetables.update(&timetable).await?;

        info!(timetable_id = %id, "timetable archived");
        Ok(timetable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MemberRepository, NotificationRepository};
    use crate::adapters::memory::{
        InMemoryClassGroupRepository, InMemoryMemberRepository, InMemoryNotificationRepository,
        InMemoryTimetableRepository,
    };
    use crate::adapters::realtime::RecordingNotifier;
    use crate::domain::directory::{ClassGroup, Member, MemberRole};
    use crate::domain::foundation::{ClassGroupId, MemberId};
    use crate::domain::scheduling::TimetableStatus;
    use chrono::NaiveDate;

    struct Fixture {
        publish: PublishTimetableHandler,
        archive: ArchiveTimetableHandler,
        timetables: Arc<InMemoryTimetableRepository>,
        class_groups: Arc<InMemoryClassGroupRepository>,
        members: Arc<InMemoryMemberRepository>,
        notifications: Arc<InMemoryNotificationRepository>,
    }

    fn fixture() -> Fixture {
        let timetables = Arc::new(InMemoryTimetableRepository::new());
        let class_groups = Arc::new(InMemoryClassGroupRepository::new());
        let members = Arc::new(InMemoryMemberRepository::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());
        let dispatcher = Arc::new(FanOutDispatcher::new(
            notifications.clone(),
            members.clone(),
            Arc::new(RecordingNotifier::disconnected()),
        ));
        Fixture {
            publish: PublishTimetableHandler::new(
                timetables.clone(),
                class_groups.clone(),
                dispatcher,
            ),
            archive: ArchiveTimetableHandler::new(timetables.clone()),
            timetables,
            class_groups,
            members,
            notifications,
        }
    }

    async fn seed_timetable(fx: &Fixture, students: usize) -> (Timetable, Vec<MemberId>) {
        let mut group = ClassGroup::new(ClassGroupId::new(), "CS-1A".to_string()).unwrap();
        let mut roster = Vec::new();
        for i in 0..students {
            let student =
                Member::new(MemberId::new(), format!("Student {i}"), MemberRole::Student).unwrap();
            group.enroll(*student.id());
            roster.push(*student.id());
            fx.members.save(&student).await.unwrap();
        }
        fx.class_groups.save(&group).await.unwrap();

        let timetable = Timetable::new(
            TimetableId::new(),
            *group.id(),
            "Autumn term".to_string(),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 18).unwrap(),
        )
        .unwrap();
        fx.timetables.save(&timetable).await.unwrap();
        (timetable, roster)
    }

    #[tokio::test]
    async fn publish_moves_draft_to_published() {
        let fx = fixture();
        let (timetable, _) = seed_timetable(&fx, 0).await;

        let published = fx.publish.handle(timetable.id()).await.unwrap();

        assert_eq!(published.status(), TimetableStatus::Published);
        let stored = fx.timetables.find_by_id(timetable.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), TimetableStatus::Published);
    }

    #[tokio::test]
    async fn publish_notifies_the_roster() {
        let fx = fixture();
        let (timetable, roster) = seed_timetable(&fx, 2).await;

        fx.publish.handle(timetable.id()).await.unwrap();

        for student_id in &roster {
            let inbox = fx.notifications.find_by_recipient(student_id).await.unwrap();
            assert_eq!(inbox.len(), 1);
            assert_eq!(inbox[0].message(), "timetable published");
        }
    }

    #[tokio::test]
    async fn publish_twice_is_invalid_state() {
        let fx = fixture();
        let (timetable, _) = seed_timetable(&fx, 0).await;
        fx.publish.handle(timetable.id()).await.unwrap();

        let result = fx.publish.handle(timetable.id()).await;
        assert!(matches!(result, Err(ScheduleError::InvalidState(_))));
    }

    #[tokio::test]
    async fn archive_requires_published() {
        let fx = fixture();
        let (timetable, _) = seed_timetable(&fx, 0).await;

        // Draft cannot be archived directly.
        assert!(matches!(
            fx.archive.handle(timetable.id()).await,
            Err(ScheduleError::InvalidState(_))
        ));

        fx.publish.handle(timetable.id()).await.unwrap();
        let archived = fx.archive.handle(timetable.id()).await.unwrap();
        assert_eq!(archived.status(), TimetableStatus::Archived);
    }

    #[tokio::test]
    async fn archive_sends_no_notifications() {
        let fx = fixture();
        let (timetable, roster) = seed_timetable(&fx, 1).await;
        fx.publish.handle(timetable.id()).await.unwrap();

        fx.archive.handle(timetable.id()).await.unwrap();

        let inbox = fx.notifications.find_by_recipient(&roster[0]).await.unwrap();
        // Only the publish notification.
        assert_eq!(inbox.len(), 1);
    }

    #[tokio::test]
    async fn unknown_timetable_is_not_found() {
        let fx = fixture();
        let result = fx.publish.handle(&TimetableId::new()).await;
        assert!(matches!(
            result,
            Err(ScheduleError::NotFound { entity: "Timetable", .. })
        ));
    }
}
