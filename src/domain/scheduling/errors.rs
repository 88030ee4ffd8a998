//! Scheduling-specific error taxonomy.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, ValidationError};

use super::Weekday;

/// Errors surfaced by the scheduling operations.
///
/// Each variant carries enough detail to identify the offending field or
/// placement; none are retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A required input field was absent.
    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The referenced member does not carry the teacher role.
    #[error("Member {member_id} does not have the teacher role")]
    InvalidRole { member_id: MemberId },

    /// The candidate placement overlaps an active session.
    #[error("Room {room} is already occupied on {weekday} during {window}")]
    Conflict {
        room: String,
        weekday: Weekday,
        window: String,
    },

    /// A lifecycle transition that is not modeled.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Input failed value-object validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage or other infrastructure failure.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl ScheduleError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        ScheduleError::MissingField { field: field.into() }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ScheduleError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_role(member_id: MemberId) -> Self {
        ScheduleError::InvalidRole { member_id }
    }

    pub fn conflict(room: impl Into<String>, weekday: Weekday, window: impl Into<String>) -> Self {
        ScheduleError::Conflict {
            room: room.into(),
            weekday,
            window: window.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        ScheduleError::InvalidState(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ScheduleError::Infrastructure(message.into())
    }
}

impl From<DomainError> for ScheduleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => ScheduleError::InvalidState(err.to_string()),
            _ => ScheduleError::Infrastructure(err.to_string()),
        }
    }
}
