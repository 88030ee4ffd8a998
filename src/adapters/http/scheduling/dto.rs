//! HTTP DTOs for the scheduling endpoints.
//!
//! Request fields the API requires are modeled as `Option` and checked in
//! `into_command`, so an absent field surfaces as a `MissingField` error
//! naming the field rather than a generic deserialization failure.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::application::handlers::scheduling::{CreateSessionCommand, CreateTimetableCommand, SessionPatch, SessionSpec};
use crate::domain::foundation::{ClassGroupId, CourseId, MemberId, TimetableId};
use crate::domain::scheduling::{
    ScheduleError, Session, SessionKind, SessionStatus, Timetable, TimetableStatus, Weekday,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub course_id: Option<CourseId>,
    pub class_group_id: Option<ClassGroupId>,
    pub teacher_id: Option<MemberId>,
    #[serde(default)]
    pub timetable_id: Option<TimetableId>,
    pub weekday: Option<Weekday>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub room: Option<String>,
    pub kind: Option<SessionKind>,
}

impl CreateSessionRequest {
    pub fn into_command(self) -> Result<CreateSessionCommand, ScheduleError> {
        Ok(CreateSessionCommand {
            course_id: require(self.course_id, "course_id")?,
            class_group_id: require(self.class_group_id, "class_group_id")?,
            teacher_id: require(self.teacher_id, "teacher_id")?,
            timetable_id: self.timetable_id,
            weekday: require(self.weekday, "weekday")?,
            start: require(self.start, "start")?,
            end: require(self.end, "end")?,
            room: require(self.room, "room")?,
            kind: require(self.kind, "kind")?,
        })
    }
}

/// Request to patch a session. Absent fields stay unchanged; `timetable_id`
/// distinguishes absent (keep) from explicit `null` (detach).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSessionRequest {
    pub weekday: Option<Weekday>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub room: Option<String>,
    pub kind: Option<SessionKind>,
    pub course_id: Option<CourseId>,
    pub class_group_id: Option<ClassGroupId>,
    pub teacher_id: Option<MemberId>,
    #[serde(default, deserialize_with = "double_option")]
    pub timetable_id: Option<Option<TimetableId>>,
}

impl From<UpdateSessionRequest> for SessionPatch {
    fn from(req: UpdateSessionRequest) -> Self {
        SessionPatch {
            weekday: req.weekday,
            start: req.start,
            end: req.end,
            room: req.room,
            kind: req.kind,
            course_id: req.course_id,
            class_group_id: req.class_group_id,
            teacher_id: req.teacher_id,
            timetable_id: req.timetable_id,
        }
    }
}

/// One session inside a timetable creation batch.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSpecRequest {
    pub course_id: Option<CourseId>,
    pub teacher_id: Option<MemberId>,
    pub weekday: Option<Weekday>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub room: Option<String>,
    pub kind: Option<SessionKind>,
}

impl SessionSpecRequest {
    fn into_spec(self) -> Result<SessionSpec, ScheduleError> {
        Ok(SessionSpec {
            course_id: require(self.course_id, "course_id")?,
            teacher_id: require(self.teacher_id, "teacher_id")?,
            weekday: require(self.weekday, "weekday")?,
            start: require(self.start, "start")?,
            end: require(self.end, "end")?,
            room: require(self.room, "room")?,
            kind: require(self.kind, "kind")?,
        })
    }
}

/// Request to create a timetable with its sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimetableRequest {
    pub class_group_id: Option<ClassGroupId>,
    pub title: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    #[serde(default)]
    pub sessions: Vec<SessionSpecRequest>,
}

impl CreateTimetableRequest {
    pub fn into_command(self) -> Result<CreateTimetableCommand, ScheduleError> {
        let sessions = self
            .sessions
            .into_iter()
            .map(SessionSpecRequest::into_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CreateTimetableCommand {
            class_group_id: require(self.class_group_id, "class_group_id")?,
            title: require(self.title, "title")?,
            starts_on: require(self.starts_on, "starts_on")?,
            ends_on: require(self.ends_on, "ends_on")?,
            sessions,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Session view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub course_id: String,
    pub class_group_id: String,
    pub teacher_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timetable_id: Option<String>,
    pub weekday: Weekday,
    pub start: String,
    pub end: String,
    pub room: String,
    pub kind: SessionKind,
    pub status: SessionStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id().to_string(),
            course_id: session.course_id().to_string(),
            class_group_id: session.class_group_id().to_string(),
            teacher_id: session.teacher_id().to_string(),
            timetable_id: session.timetable_id().map(ToString::to_string),
            weekday: session.weekday(),
            start: session.slot().start().format("%H:%M").to_string(),
            end: session.slot().end().format("%H:%M").to_string(),
            room: session.room().to_string(),
            kind: session.kind(),
            status: session.status(),
            created_at: session.created_at().to_string(),
            updated_at: session.updated_at().to_string(),
        }
    }
}

/// Timetable view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct TimetableResponse {
    pub id: String,
    pub class_group_id: String,
    pub title: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub status: TimetableStatus,
    pub session_ids: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Timetable> for TimetableResponse {
    fn from(timetable: Timetable) -> Self {
        Self {
            id: timetable.id().to_string(),
            class_group_id: timetable.class_group_id().to_string(),
            title: timetable.title().to_string(),
            starts_on: timetable.starts_on(),
            ends_on: timetable.ends_on(),
            status: timetable.status(),
            session_ids: timetable.session_ids().iter().map(ToString::to_string).collect(),
            created_at: timetable.created_at().to_string(),
            updated_at: timetable.updated_at().to_string(),
        }
    }
}

/// Response for bulk-removal operations.
#[derive(Debug, Clone, Serialize)]
pub struct RemovedResponse {
    pub removed: u64,
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn require<T>(value: Option<T>, field: &str) -> Result<T, ScheduleError> {
    value.ok_or_else(|| ScheduleError::missing_field(field))
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
