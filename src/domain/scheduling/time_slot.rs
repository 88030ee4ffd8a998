//! Half-open wall-clock time interval.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Same-day time window `[start, end)`.
///
/// # Invariants
///
/// - `start < end` (zero-length and inverted slots are rejected)
///
/// The half-open convention means a slot ending at 10:00 does not overlap
/// a slot starting at 10:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    /// Creates a time slot, validating that start precedes end.
    ///
    /// # Errors
    ///
    /// - `OutOfOrder` if `end <= start`
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::out_of_order(
                "time_slot",
                format!("end {} is not after start {}", end, start),
            ));
        }
        Ok(Self { start, end })
    }

    /// Returns the slot start.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the slot end (exclusive).
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// True if two half-open intervals share any instant.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}
