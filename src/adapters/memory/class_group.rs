//! In-memory class group repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::directory::ClassGroup;
use crate::domain::foundation::{ClassGroupId, DomainError, ErrorCode};
use crate::ports::ClassGroupRepository;

/// Class group storage backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryClassGroupRepository {
    groups: RwLock<HashMap<ClassGroupId, ClassGroup>>,
}

impl InMemoryClassGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClassGroupRepository for InMemoryClassGroupRepository {
    async fn save(&self, group: &ClassGroup) -> Result<(), DomainError> {
        let mut groups = self.groups.write().await;
        groups.insert(*group.id(), group.clone());
        Ok(())
    }

    async fn update(&self, group: &ClassGroup) -> Result<(), DomainError> {
        let mut groups = self.groups.write().await;
        if !groups.contains_key(group.id()) {
            return Err(DomainError::new(
                ErrorCode::ClassGroupNotFound,
                format!("Class group not found: {}", group.id()),
            ));
        }
        groups.insert(*group.id(), group.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ClassGroupId) -> Result<Option<ClassGroup>, DomainError> {
        let groups = self.groups.read().await;
        Ok(groups.get(id).cloned())
    }

    async fn clear_session_refs(&self) -> Result<(), DomainError> {
        let mut groups = self.groups.write().await;
        for group in groups.values_mut() {
            group.clear_sessions();
        }
        Ok(())
    }
}
