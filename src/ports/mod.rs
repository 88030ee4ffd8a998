//! Ports - interfaces between the application core and the outside world.
//!
//! Adapters implement these traits; handlers depend only on them.

mod class_group_repository;
mod course_repository;
mod member_repository;
mod notification_repository;
mod notifier;
mod session_repository;
mod timetable_repository;

pub use class_group_repository::ClassGroupRepository;
pub use course_repository::CourseRepository;
pub use member_repository::MemberRepository;
pub use notification_repository::NotificationRepository;
pub use notifier::{Notifier, NotifierError, PushPayload};
pub use session_repository::SessionRepository;
pub use timetable_repository::TimetableRepository;
