//! In-memory session repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, TimetableId};
use crate::domain::scheduling::{Session, Weekday};
use crate::ports::SessionRepository;

/// Session storage backed by a `HashMap`.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn find_active_by_placement(
        &self,
        room: &str,
        weekday: Weekday,
    ) -> Result<Vec<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .filter(|s| s.is_active() && s.weekday() == weekday && s.room() == room)
            .cloned()
            .collect())
    }

    async fn find_by_timetable(
        &self,
        timetable_id: &TimetableId,
    ) -> Result<Vec<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .filter(|s| s.timetable_id() == Some(timetable_id))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(id).is_none() {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, DomainError> {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.len() as u64;
        sessions.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ClassGroupId, CourseId, MemberId};
    use crate::domain::scheduling::{SessionKind, TimeSlot};
    use chrono::NaiveTime;

    fn session(weekday: Weekday, room: &str) -> Session {
        Session::new(
            SessionId::new(),
            CourseId::new(),
            ClassGroupId::new(),
            MemberId::new(),
            None,
            weekday,
            TimeSlot::new(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            )
            .unwrap(),
            room.to_string(),
            SessionKind::Lecture,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_and_find_round_trip() {
        let repo = InMemorySessionRepository::new();
        let s = session(Weekday::Monday, "101");
        repo.save(&s).await.unwrap();
        assert_eq!(repo.find_by_id(s.id()).await.unwrap(), Some(s));
    }

    #[tokio::test]
    async fn update_missing_session_errors() {
        let repo = InMemorySessionRepository::new();
        let s = session(Weekday::Monday, "101");
        let err = repo.update(&s).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn placement_query_filters_room_weekday_and_status() {
        let repo = InMemorySessionRepository::new();
        let monday_101 = session(Weekday::Monday, "101");
        let monday_202 = session(Weekday::Monday, "202");
        let friday_101 = session(Weekday::Friday, "101");
        let mut cancelled = session(Weekday::Monday, "101");
        cancelled.cancel().unwrap();

        for s in [&monday_101, &monday_202, &friday_101, &cancelled] {
            repo.save(s).await.unwrap();
        }

        let found = repo
            .find_active_by_placement("101", Weekday::Monday)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), monday_101.id());
    }

    #[tokio::test]
    async fn find_by_timetable_matches_owned_sessions_only() {
        let repo = InMemorySessionRepository::new();
        let timetable_id = TimetableId::new();
        let mut owned = session(Weekday::Monday, "101");
        owned.assign_timetable(Some(timetable_id));
        let free = session(Weekday::Tuesday, "101");
        repo.save(&owned).await.unwrap();
        repo.save(&free).await.unwrap();

        let found = repo.find_by_timetable(&timetable_id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), owned.id());
    }

    #[tokio::test]
    async fn delete_all_reports_count() {
        let repo = InMemorySessionRepository::new();
        repo.save(&session(Weekday::Monday, "101")).await.unwrap();
        repo.save(&session(Weekday::Tuesday, "101")).await.unwrap();
        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
