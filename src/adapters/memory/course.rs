//! In-memory course repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::directory::Course;
use crate::domain::foundation::{CourseId, DomainError, ErrorCode};
use crate::ports::CourseRepository;

/// Course storage backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryCourseRepository {
    courses: RwLock<HashMap<CourseId, Course>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn save(&self, course: &Course) -> Result<(), DomainError> {
        let mut courses = self.courses.write().await;
        courses.insert(*course.id(), course.clone());
        Ok(())
    }

    async fn update(&self, course: &Course) -> Result<(), DomainError> {
        let mut courses = self.courses.write().await;
        if !courses.contains_key(course.id()) {
            return Err(DomainError::new(
                ErrorCode::CourseNotFound,
                format!("Course not found: {}", course.id()),
            ));
        }
        courses.insert(*course.id(), course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let courses = self.courses.read().await;
        Ok(courses.get(id).cloned())
    }

    async fn clear_session_refs(&self) -> Result<(), DomainError> {
        let mut courses = self.courses.write().await;
        for course in courses.values_mut() {
            course.clear_sessions();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;

    fn course() -> Course {
        Course::new(CourseId::new(), "MATH101".to_string(), "Calculus I".to_string()).unwrap()
    }

    #[tokio::test]
    async fn save_and_find_round_trip() {
        let repo = InMemoryCourseRepository::new();
        let c = course();
        repo.save(&c).await.unwrap();
        assert_eq!(repo.find_by_id(c.id()).await.unwrap(), Some(c));
    }

    #[tokio::test]
    async fn update_missing_course_errors() {
        let repo = InMemoryCourseRepository::new();
        let err = repo.update(&course()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CourseNotFound);
    }

    #[tokio::test]
    async fn clear_session_refs_wipes_lists() {
        let repo = InMemoryCourseRepository::new();
        let mut c = course();
        c.add_session(SessionId::new());
        repo.save(&c).await.unwrap();

        repo.clear_session_refs().await.unwrap();

        let stored = repo.find_by_id(c.id()).await.unwrap().unwrap();
        assert!(stored.session_ids().is_empty());
    }
}
