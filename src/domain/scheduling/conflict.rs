//! Pure room/weekday conflict detection.
//!
//! The single source of truth for "is this room free at that time".
//! Callers fetch the relevant sessions and pass them in; this module never
//! touches storage.

use crate::domain::foundation::SessionId;

use super::{Session, TimeSlot, Weekday};

/// The placement a new or rescheduled session wants to occupy.
#[derive(Debug, Clone, Copy)]
pub struct CandidateSlot<'a> {
    pub weekday: Weekday,
    pub slot: TimeSlot,
    pub room: &'a str,
}

/// Decides whether the candidate placement collides with any existing
/// active session in the same room on the same weekday.
///
/// Intervals are half-open `[start, end)`: a session ending exactly when
/// another starts is not a conflict. `exclude` skips the session being
/// rescheduled so it never conflicts with itself. O(n) over `existing`.
pub fn has_conflict(
    candidate: &CandidateSlot<'_>,
    existing: &[Session],
    exclude: Option<&SessionId>,
) -> bool {
    existing
        .iter()
        .filter(|s| s.is_active())
        .filter(|s| s.weekday() == candidate.weekday)
        .filter(|s| s.room() == candidate.room)
        .filter(|s| exclude != Some(s.id()))
        .any(|s| candidate.slot.overlaps(s.slot()))
}
