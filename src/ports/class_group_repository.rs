//! Class group repository port.

use async_trait::async_trait;

use crate::domain::directory::ClassGroup;
use crate::domain::foundation::{ClassGroupId, DomainError};

/// Repository port for ClassGroup persistence.
#[async_trait]
pub trait ClassGroupRepository: Send + Sync {
    /// Persists a new class group.
    async fn save(&self, class_group: &ClassGroup) -> Result<(), DomainError>;

    /// Persists changes to an existing class group.
    ///
    /// # Errors
    ///
    /// - `ClassGroupNotFound` if the class group does not exist
    async fn update(&self, class_group: &ClassGroup) -> Result<(), DomainError>;

    /// Finds a class group by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &ClassGroupId) -> Result<Option<ClassGroup>, DomainError>;

    /// Drops every session back-reference on every class group (bulk reset).
    async fn clear_session_refs(&self) -> Result<(), DomainError>;
}
