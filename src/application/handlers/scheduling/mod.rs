//! Scheduling handlers: the session registry, reference synchronizer, and
//! timetable lifecycle operations.

mod clear_sessions;
mod create_session;
mod create_timetable;
mod delete_session;
mod delete_timetable;
mod publish_timetable;
mod reference_sync;
mod update_session;

pub use clear_sessions::ClearSessionsHandler;
pub use create_session::{CreateSessionCommand, CreateSessionHandler};
pub use create_timetable::{CreateTimetableCommand, CreateTimetableHandler, SessionSpec};
pub use delete_session::DeleteSessionHandler;
pub use delete_timetable::DeleteTimetableHandler;
pub use publish_timetable::{ArchiveTimetableHandler, PublishTimetableHandler};
pub use reference_sync::ReferenceSynchronizer;
pub use update_session::{SessionPatch, UpdateSessionHandler};
