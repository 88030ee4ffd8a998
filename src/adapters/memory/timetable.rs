//! In-memory timetable repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{ClassGroupId, DomainError, ErrorCode, TimetableId};
use crate::domain::scheduling::Timetable;
use crate::ports::TimetableRepository;

/// Timetable storage backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryTimetableRepository {
    timetables: RwLock<HashMap<TimetableId, Timetable>>,
}

impl InMemoryTimetableRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TimetableRepository for InMemoryTimetableRepository {
    async fn save(&self, timetable: &Timetable) -> Result<(), DomainError> {
        let mut timetables = self.timetables.write().await;
        timetables.insert(*timetable.id(), timetable.clone());
        Ok(())
    }

    async fn update(&self, timetable: &Timetable) -> Result<(), DomainError> {
        let mut timetables = self.timetables.write().await;
        if !timetables.contains_key(timetable.id()) {
            return Err(DomainError::new(
                ErrorCode::TimetableNotFound,
                format!("Timetable not found: {}", timetable.id()),
            ));
        }
        timetables.insert(*timetable.id(), timetable.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TimetableId) -> Result<Option<Timetable>, DomainError> {
        let timetables = self.timetables.read().await;
        Ok(timetables.get(id).cloned())
    }

    async fn find_by_class_group(
        &self,
        class_group_id: &ClassGroupId,
    ) -> Result<Vec<Timetable>, DomainError> {
        let timetables = self.timetables.read().await;
        Ok(timetables
            .values()
            .filter(|t| t.class_group_id() == class_group_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &TimetableId) -> Result<(), DomainError> {
        let mut timetables = self.timetables.write().await;
        // Idempotent on purpose: rollback retries hit this path.
        timetables.remove(id);
        Ok(())
    }

    async fn clear_session_refs(&self) -> Result<(), DomainError> {
        let mut timetables = self.timetables.write().await;
        for timetable in timetables.values_mut() {
            timetable.clear_sessions();
        }
        Ok(())
    }
}
