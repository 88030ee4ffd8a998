//! Course aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CourseId, SessionId, Timestamp, ValidationError};

/// A course offered by the institution.
///
/// Holds weak back-references to the sessions scheduled for it; it does not
/// own them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    code: String,
    title: String,
    session_ids: Vec<SessionId>,
    created_at: Timestamp,
}

impl Course {
    /// Creates a new course with no scheduled sessions.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if code or title is blank
    pub fn new(id: CourseId, code: String, title: String) -> Result<Self, ValidationError> {
        let code = code.trim().to_string();
        if code.is_empty() {
            return Err(ValidationError::empty_field("code"));
        }
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        Ok(Self {
            id,
            code,
            title,
            session_ids: Vec::new(),
            created_at: Timestamp::now(),
        })
    }

    pub fn id(&self) -> &CourseId {
        &self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn session_ids(&self) -> &[SessionId] {
        &self.session_ids
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Adds a session back-reference; no-op if already present.
    pub fn add_session(&mut self, session_id: SessionId) -> bool {
        if self.session_ids.contains(&session_id) {
            return false;
        }
        self.session_ids.push(session_id);
        true
    }

    /// Removes a session back-reference; no-op if absent.
    pub fn remove_session(&mut self, session_id: &SessionId) -> bool {
        let before = self.session_ids.len();
        self.session_ids.retain(|id| id != session_id);
        self.session_ids.len() != before
    }

    /// Drops all session back-references.
    pub fn clear_sessions(&mut self) {
        self.session_ids.clear();
    }
}
