//! Course repository port.

use async_trait::async_trait;

use crate::domain::directory::Course;
use crate::domain::foundation::{CourseId, DomainError};

/// Repository port for Course persistence.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persists a new course.
    async fn save(&self, course: &Course) -> Result<(), DomainError>;

    /// Persists changes to an existing course.
    ///
    /// # Errors
    ///
    /// - `CourseNotFound` if the course does not exist
    async fn update(&self, course: &Course) -> Result<(), DomainError>;

    /// Finds a course by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError>;

    /// Drops every session back-reference on every course (bulk reset).
    async fn clear_session_refs(&self) -> Result<(), DomainError>;
}
