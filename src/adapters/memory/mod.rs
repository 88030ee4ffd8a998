//! In-memory repository adapters.
//!
//! Process-local storage behind `tokio::sync::RwLock`. These back the
//! default single-node deployment and every handler test; swapping in a
//! database later means implementing the same ports against it.

mod class_group;
mod course;
mod member;
mod notification;
mod session;
mod timetable;

pub use class_group::InMemoryClassGroupRepository;
pub use course::InMemoryCourseRepository;
pub use member::InMemoryMemberRepository;
pub use notification::InMemoryNotificationRepository;
pub use session::InMemorySessionRepository;
pub use timetable::InMemoryTimetableRepository;
