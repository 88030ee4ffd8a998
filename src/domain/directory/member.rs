//! Institution member aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    MemberId, NotificationId, SessionId, Timestamp, ValidationError,
};

/// Role a member carries within the institution.
///
/// Only members with the `Teacher` role may be assigned to sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Student,
    Teacher,
    Staff,
}

/// A person known to the institution: student, teacher, or staff.
///
/// Teachers carry weak back-references to the sessions they teach; every
/// member carries the ids of the notifications addressed to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    display_name: String,
    role: MemberRole,
    session_ids: Vec<SessionId>,
    notification_ids: Vec<NotificationId>,
    created_at: Timestamp,
}

impl Member {
    /// Creates a new member.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if display name is blank
    pub fn new(
        id: MemberId,
        display_name: String,
        role: MemberRole,
    ) -> Result<Self, ValidationError> {
        let display_name = display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(ValidationError::empty_field("display_name"));
        }
        Ok(Self {
            id,
            display_name,
            role,
            session_ids: Vec::new(),
            notification_ids: Vec::new(),
            created_at: Timestamp::now(),
        })
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> MemberRole {
        self.role
    }

    pub fn is_teacher(&self) -> bool {
        self.role == MemberRole::Teacher
    }

    pub fn session_ids(&self) -> &[SessionId] {
        &self.session_ids
    }

    pub fn notification_ids(&self) -> &[NotificationId] {
        &self.notification_ids
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Adds a teaching-assignment back-reference; no-op if present.
    pub fn add_session(&mut self, session_id: SessionId) -> bool {
        if self.session_ids.contains(&session_id) {
            return false;
        }
        self.session_ids.push(session_id);
        true
    }

    /// Removes a teaching-assignment back-reference; no-op if absent.
    pub fn remove_session(&mut self, session_id: &SessionId) -> bool {
        let before = self.session_ids.len();
        self.session_ids.retain(|id| id != session_id);
        self.session_ids.len() != before
    }

    /// Drops all teaching-assignment back-references.
    pub fn clear_sessions(&mut self) {
        self.session_ids.clear();
    }

    /// Records a notification addressed to this member; no-op if present.
    pub fn add_notification(&mut self, notification_id: NotificationId) -> bool {
        if self.notification_ids.contains(&notification_id) {
            return false;
        }
        self.notification_ids.push(notification_id);
        true
    }

    /// Forgets a notification; no-op if absent.
    pub fn remove_notification(&mut self, notification_id: &NotificationId) -> bool {
        let before = self.notification_ids.len();
        self.notification_ids.retain(|id| id != notification_id);
        self.notification_ids.len() != before
    }

    /// Forgets all notifications.
    pub fn clear_notifications(&mut self) {
        self.notification_ids.clear();
    }
}
