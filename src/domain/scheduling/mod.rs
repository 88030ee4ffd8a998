//! Scheduling domain - sessions, timetables, and conflict detection.

mod conflict;
mod errors;
mod session;
mod time_slot;
mod timetable;
mod weekday;

pub use conflict::{has_conflict, CandidateSlot};
pub use errors::ScheduleError;
pub use session::{Session, SessionKind, SessionRefs, SessionStatus};
pub use time_slot::TimeSlot;
pub use timetable::{Timetable, TimetableStatus};
pub use weekday::Weekday;
