//! Session repository port.
//!
//! The source of truth for scheduled sessions. The conflict detector runs
//! over the slice returned by `find_active_by_placement`, so that query is
//! on the hot path of every create and reschedule.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId, TimetableId};
use crate::domain::scheduling::{Session, Weekday};

/// Repository port for Session persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persists a new session.
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Persists changes to an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session does not exist
    async fn update(&self, session: &Session) -> Result<(), DomainError>;

    /// Finds a session by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// All active sessions occupying the given room on the given weekday.
    ///
    /// Input to the conflict detector.
    async fn find_active_by_placement(
        &self,
        room: &str,
        weekday: Weekday,
    ) -> Result<Vec<Session>, DomainError>;

    /// All sessions owned by a timetable (cascade-delete support).
    async fn find_by_timetable(
        &self,
        timetable_id: &TimetableId,
    ) -> Result<Vec<Session>, DomainError>;

    /// Deletes a session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session does not exist
    async fn delete(&self, id: &SessionId) -> Result<(), DomainError>;

    /// Deletes every session, returning how many were removed.
    async fn delete_all(&self) -> Result<u64, DomainError>;

    /// Total number of stored sessions.
    async fn count(&self) -> Result<u64, DomainError>;
}
