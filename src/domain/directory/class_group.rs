//! Class group aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ClassGroupId, MemberId, SessionId, TimetableId, Timestamp, ValidationError,
};

/// A cohort of students that attends sessions together.
///
/// The student roster is the fan-out audience for every schedule change
/// affecting this group. Session and timetable ids are weak back-references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    id: ClassGroupId,
    name: String,
    student_ids: Vec<MemberId>,
    session_ids: Vec<SessionId>,
    timetable_ids: Vec<TimetableId>,
    created_at: Timestamp,
}

impl ClassGroup {
    /// Creates a new class group with an empty roster.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name is blank
    pub fn new(id: ClassGroupId, name: String) -> Result<Self, ValidationError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id,
            name,
            student_ids: Vec::new(),
            session_ids: Vec::new(),
            timetable_ids: Vec::new(),
            created_at: Timestamp::now(),
        })
    }

    pub fn id(&self) -> &ClassGroupId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The roster: recipients of schedule-change fan-outs.
    pub fn student_ids(&self) -> &[MemberId] {
        &self.student_ids
    }

    pub fn session_ids(&self) -> &[SessionId] {
        &self.session_ids
    }

    pub fn timetable_ids(&self) -> &[TimetableId] {
        &self.timetable_ids
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Enrolls a student; no-op if already enrolled.
    pub fn enroll(&mut self, student_id: MemberId) -> bool {
        if self.student_ids.contains(&student_id) {
            return false;
        }
        self.student_ids.push(student_id);
        true
    }

    /// Removes a student from the roster; no-op if absent.
    pub fn withdraw(&mut self, student_id: &MemberId) -> bool {
        let before = self.student_ids.len();
        self.student_ids.retain(|id| id != student_id);
        self.student_ids.len() != before
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

    /// Adds a timetable back-reference; no-op if already present.
    pub fn add_timetable(&mut self, timetable_id: TimetableId) -> bool {
        if self.timetable_ids.contains(&timetable_id) {
            return false;
        }
        self.timetable_ids.push(timetable_id);
        true
    }

    /// Removes a timetable back-reference; no-op if absent.
    pub fn remove_timetable(&mut self, timetable_id: &TimetableId) -> bool {
        let before = self.timetable_ids.len();
        self.timetable_ids.retain(|id| id != timetable_id);
        self.timetable_ids.len() != before
    }
}
