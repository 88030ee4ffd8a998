//! Strongly-typed identifier value objects.
//!
//! Every aggregate gets its own UUID-backed id type so that a session id
//! can never be passed where a timetable id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an id from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a scheduled class session.
    SessionId
);

uuid_id!(
    /// Unique identifier for a weekly timetable.
    TimetableId
);

uuid_id!(
    /// Unique identifier for a course.
    CourseId
);

uuid_id!(
    /// Unique identifier for a class group (a cohort of students).
    ClassGroupId
);

uuid_id!(
    /// Unique identifier for an institution member (student, teacher, staff).
    MemberId
);

uuid_id!(
    /// Unique identifier for a persisted notification.
    NotificationId
);

uuid_id!(
    /// Unique identifier for an announcement a notification may point back to.
    AnnouncementId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_generates_unique_values() {
        let id1 = SessionId::new();
        let id2 = SessionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn session_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: SessionId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn session_id_rejects_garbage() {
        let result = "not-a-uuid".parse::<SessionId>();
        assert!(result.is_err());
    }

    #[test]
    fn id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = TimetableId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn id_serializes_as_bare_uuid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: MemberId = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }

    #[test]
    fn distinct_id_types_generate_unique_values() {
        assert_ne!(CourseId::new(), CourseId::new());
        assert_ne!(ClassGroupId::new(), ClassGroupId::new());
        assert_ne!(NotificationId::new(), NotificationId::new());
        assert_ne!(AnnouncementId::new(), AnnouncementId::new());
    }
}
