//! Session aggregate entity.
//!
//! A session is one weekly-recurring scheduled occurrence of a course for a
//! class group, taught by one teacher in one room.
//!
//! # Ownership
//!
//! Sessions reference their course, class group, teacher, and (optionally)
//! owning timetable by id. The referenced aggregates hold weak
//! back-references to the session; keeping those lists consistent is the
//! reference synchronizer's job, not this entity's.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ClassGroupId, CourseId, MemberId, SessionId, StateMachine, TimetableId, Timestamp,
    ValidationError,
};

use super::{TimeSlot, Weekday};

/// What kind of meeting a session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Lecture,
    Lab,
    Tutorial,
    Exam,
    Conference,
}

/// Session lifecycle status.
///
/// Only `Active` sessions participate in conflict detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Cancelled,
    Completed,
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!((self, target), (Active, Cancelled) | (Active, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Active => vec![Cancelled, Completed],
            Cancelled | Completed => vec![],
        }
    }
}

/// The four outbound references a session holds.
///
/// Captured before and after a mutation so the reference synchronizer can
/// move back-references only for the relations that actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRefs {
    pub course_id: CourseId,
    pub class_group_id: ClassGroupId,
    pub teacher_id: MemberId,
    pub timetable_id: Option<TimetableId>,
}

/// Session aggregate - a weekly slot of a course in a room.
///
/// # Invariants
///
/// - `room` is non-empty
/// - `slot` is a valid `[start, end)` window
/// - across the registry: no two `Active` sessions with the same room and
///   weekday may have overlapping slots (enforced by the conflict detector
///   at the application layer, not here)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    course_id: CourseId,
    class_group_id: ClassGroupId,
    teacher_id: MemberId,
    timetable_id: Option<TimetableId>,
    weekday: Weekday,
    slot: TimeSlot,
    room: String,
    kind: SessionKind,
    status: SessionStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Creates a new active session.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the room is blank
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: SessionId,
        course_id: CourseId,
        class_group_id: ClassGroupId,
        teacher_id: MemberId,
        timetable_id: Option<TimetableId>,
        weekday: Weekday,
        slot: TimeSlot,
        room: String,
        kind: SessionKind,
    ) -> Result<Self, ValidationError> {
        let room = Self::validate_room(room)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            course_id,
            class_group_id,
            teacher_id,
            timetable_id,
            weekday,
            slot,
            room,
            kind,
            status: SessionStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    pub fn class_group_id(&self) -> &ClassGroupId {
        &self.class_group_id
    }

    pub fn teacher_id(&self) -> &MemberId {
        &self.teacher_id
    }

    pub fn timetable_id(&self) -> Option<&TimetableId> {
        self.timetable_id.as_ref()
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Snapshot of the outbound references.
    pub fn refs(&self) -> SessionRefs {
        SessionRefs {
            course_id: self.course_id,
            class_group_id: self.class_group_id,
            teacher_id: self.teacher_id,
            timetable_id: self.timetable_id,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves the session to a new weekday/slot/room placement.
    ///
    /// Conflict re-validation is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the new room is blank
    pub fn reschedule(
        &mut self,
        weekday: Weekday,
        slot: TimeSlot,
        room: String,
    ) -> Result<(), ValidationError> {
        self.room = Self::validate_room(room)?;
        self.weekday = weekday;
        self.slot = slot;
        self.touch();
        Ok(())
    }

    /// Repoints the course reference.
    pub fn reassign_course(&mut self, course_id: CourseId) {
        self.course_id = course_id;
        self.touch();
    }

    /// Repoints the class group reference.
    pub fn reassign_class_group(&mut self, class_group_id: ClassGroupId) {
        self.class_group_id = class_group_id;
        self.touch();
    }

    /// Repoints the teacher reference.
    pub fn reassign_teacher(&mut self, teacher_id: MemberId) {
        self.teacher_id = teacher_id;
        self.touch();
    }

    /// Attaches to, moves between, or detaches from a timetable.
    pub fn assign_timetable(&mut self, timetable_id: Option<TimetableId>) {
        self.timetable_id = timetable_id;
        self.touch();
    }

    /// Changes the session kind.
    pub fn set_kind(&mut self, kind: SessionKind) {
        self.kind = kind;
        self.touch();
    }

    /// Marks the session cancelled.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` on `state_transition` if not currently active
    pub fn cancel(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(SessionStatus::Cancelled)?;
        self.touch();
        Ok(())
    }

    /// Marks the session completed.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` on `state_transition` if not currently active
    pub fn complete(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(SessionStatus::Completed)?;
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_room(room: String) -> Result<String, ValidationError> {
        let trimmed = room.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("room"));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn slot(sh: u32, eh: u32) -> TimeSlot {
        TimeSlot::new(
            NaiveTime::from_hms_opt(sh, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(eh, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn test_session() -> Session {
        Session::new(
            SessionId::new(),
            CourseId::new(),
            ClassGroupId::new(),
            MemberId::new(),
            None,
            Weekday::Monday,
            slot(8, 10),
            "101".to_string(),
            SessionKind::Lecture,
        )
        .unwrap()
    }

    #[test]
    fn new_session_is_active() {
        let session = test_session();
        assert_eq!(session.status(), SessionStatus::Active);
        assert!(session.is_active());
    }

    #[test]
    fn new_session_rejects_blank_room() {
        let result = Session::new(
            SessionId::new(),
            CourseId::new(),
            ClassGroupId::new(),
            MemberId::new(),
            None,
            Weekday::Monday,
            slot(8, 10),
            "   ".to_string(),
            SessionKind::Lecture,
        );
        assert!(result.is_err());
    }

    #[test]
    fn room_is_trimmed() {
        let session = Session::new(
            SessionId::new(),
            CourseId::new(),
            ClassGroupId::new(),
            MemberId::new(),
            None,
            Weekday::Monday,
            slot(8, 10),
            " 101 ".to_string(),
            SessionKind::Lab,
        )
        .unwrap();
        assert_eq!(session.room(), "101");
    }

    #[test]
    fn reschedule_moves_placement() {
        let mut session = test_session();
        session
            .reschedule(Weekday::Friday, slot(14, 16), "202".to_string())
            .unwrap();
        assert_eq!(session.weekday(), Weekday::Friday);
        assert_eq!(session.room(), "202");
        assert_eq!(session.slot(), &slot(14, 16));
    }

    #[test]
    fn reschedule_rejects_blank_room() {
        let mut session = test_session();
        let result = session.reschedule(Weekday::Friday, slot(14, 16), "".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn refs_track_reassignment() {
        let mut session = test_session();
        let new_course = CourseId::new();
        let timetable = TimetableId::new();

        session.reassign_course(new_course);
        session.assign_timetable(Some(timetable));

        let refs = session.refs();
        assert_eq!(refs.course_id, new_course);
        assert_eq!(refs.timetable_id, Some(timetable));
    }

    #[test]
    fn cancel_makes_session_inactive() {
        let mut session = test_session();
        session.cancel().unwrap();
        assert_eq!(session.status(), SessionStatus::Cancelled);
        assert!(!session.is_active());
    }

    #[test]
    fn cancel_twice_fails() {
        let mut session = test_session();
        session.cancel().unwrap();
        assert!(session.cancel().is_err());
    }

    #[test]
    fn completed_session_cannot_be_cancelled() {
        let mut session = test_session();
        session.complete().unwrap();
        assert!(session.cancel().is_err());
    }
}
