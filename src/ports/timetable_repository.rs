//! Timetable repository port.

use async_trait::async_trait;

use crate::domain::foundation::{ClassGroupId, DomainError, TimetableId};
use crate::domain::scheduling::Timetable;

/// Repository port for Timetable persistence.
#[async_trait]
pub trait TimetableRepository: Send + Sync {
    /// Persists a new timetable.
    async fn save(&self, timetable: &Timetable) -> Result<(), DomainError>;

    /// Persists changes to an existing timetable.
    ///
    /// # Errors
    ///
    /// - `TimetableNotFound` if the timetable does not exist
    async fn update(&self, timetable: &Timetable) -> Result<(), DomainError>;

    /// Finds a timetable by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &TimetableId) -> Result<Option<Timetable>, DomainError>;

    /// All timetables belonging to a class group.
    async fn find_by_class_group(
        &self,
        class_group_id: &ClassGroupId,
    ) -> Result<Vec<Timetable>, DomainError>;

    /// Deletes a timetable. Idempotent: deleting an absent timetable is a
    /// no-op (compensating rollbacks may retry).
    async fn delete(&self, id: &TimetableId) -> Result<(), DomainError>;

    /// Drops every session back-reference on every timetable (bulk reset).
    async fn clear_session_refs(&self) -> Result<(), DomainError>;
}
