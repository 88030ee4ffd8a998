//! Shared building blocks for the domain layer.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AnnouncementId, ClassGroupId, CourseId, MemberId, NotificationId, SessionId, TimetableId,
};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
