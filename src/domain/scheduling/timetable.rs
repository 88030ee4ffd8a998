//! Timetable aggregate entity.
//!
//! A timetable is a named, dated container for one class group's sessions,
//! published as a unit. It owns its sessions: deleting a timetable cascades
//! to every contained session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ClassGroupId, SessionId, StateMachine, TimetableId, Timestamp, ValidationError,
};

/// Timetable lifecycle status.
///
/// Monotonic: draft -> published -> archived. No reverse transition exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimetableStatus {
    Draft,
    Published,
    Archived,
}

impl StateMachine for TimetableStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use TimetableStatus::*;
        matches!((self, target), (Draft, Published) | (Published, Archived))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TimetableStatus::*;
        match self {
            Draft => vec![Published],
            Published => vec![Archived],
            Archived => vec![],
        }
    }
}

/// Timetable aggregate - a publishable weekly schedule for one class group.
///
/// # Invariants
///
/// - `title` is non-empty
/// - `starts_on <= ends_on`
/// - `session_ids` contains no duplicates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    id: TimetableId,
    class_group_id: ClassGroupId,
    title: String,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    status: TimetableStatus,
    session_ids: Vec<SessionId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Timetable {
    /// Creates a new draft timetable with no sessions.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if title is blank
    /// - `OutOfOrder` if the validity window is inverted
    pub fn new(
        id: TimetableId,
        class_group_id: ClassGroupId,
        title: String,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if ends_on < starts_on {
            return Err(ValidationError::out_of_order(
                "validity_window",
                format!("ends_on {} precedes starts_on {}", ends_on, starts_on),
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            class_group_id,
            title,
            starts_on,
            ends_on,
            status: TimetableStatus::Draft,
            session_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &TimetableId {
        &self.id
    }

    pub fn class_group_id(&self) -> &ClassGroupId {
        &self.class_group_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn starts_on(&self) -> NaiveDate {
        self.starts_on
    }

    pub fn ends_on(&self) -> NaiveDate {
        self.ends_on
    }

    pub fn status(&self) -> TimetableStatus {
        self.status
    }

    pub fn session_ids(&self) -> &[SessionId] {
        &self.session_ids
    }

    pub fn session_count(&self) -> usize {
        self.session_ids.len()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a session back-reference. Idempotent: adding a present id is a
    /// no-op returning false.
    pub fn add_session(&mut self, session_id: SessionId) -> bool {
        if self.session_ids.contains(&session_id) {
            return false;
        }
        self.session_ids.push(session_id);
        self.touch();
        true
    }

    /// Removes a session back-reference. Idempotent: removing an absent id
    /// is a no-op returning false.
    pub fn remove_session(&mut self, session_id: &SessionId) -> bool {
        let before = self.session_ids.len();
        self.session_ids.retain(|id| id != session_id);
        let removed = self.session_ids.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Drops all session back-references (bulk administrative reset).
    pub fn clear_sessions(&mut self) {
        if !self.session_ids.is_empty() {
            self.session_ids.clear();
            self.touch();
        }
    }

    /// Moves the timetable from draft to published.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` on `state_transition` if not in draft
    pub fn publish(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(TimetableStatus::Published)?;
        self.touch();
        Ok(())
    }

    /// Moves the timetable from published to archived.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` on `state_transition` if not published
    pub fn archive(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(TimetableStatus::Archived)?;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
