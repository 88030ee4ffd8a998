//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' is out of order: {reason}")]
    OutOfOrder { field: String, reason: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out-of-order validation error (e.g. end before start).
    pub fn out_of_order(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::OutOfOrder {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfOrder,
    InvalidFormat,

    // Not found errors
    SessionNotFound,
    TimetableNotFound,
    CourseNotFound,
    ClassGroupNotFound,
    MemberNotFound,
    NotificationNotFound,

    // Scheduling errors
    ScheduleConflict,
    InvalidRole,
    InvalidStateTransition,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfOrder => "OUT_OF_ORDER",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::TimetableNotFound => "TIMETABLE_NOT_FOUND",
            ErrorCode::CourseNotFound => "COURSE_NOT_FOUND",
            ErrorCode::ClassGroupNotFound => "CLASS_GROUP_NOT_FOUND",
            ErrorCode::MemberNotFound => "MEMBER_NOT_FOUND",
            ErrorCode::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            ErrorCode::ScheduleConflict => "SCHEDULE_CONFLICT",
            ErrorCode::InvalidRole => "INVALID_ROLE",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// This is the error currency of the ports; operation-specific taxonomies
/// (e.g. the scheduling errors) convert from it at the application boundary.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfOrder { .. } => ErrorCode::OutOfOrder,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        DomainError::new(code, err.to_string())
    }
}
