//! Standard error body shared by every HTTP endpoint.

use serde::Serialize;

/// JSON error envelope: machine-readable code plus human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("SCHEDULE_CONFLICT", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_code_and_message() {
        let body = ErrorResponse::conflict("Room 101 is already occupied");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "SCHEDULE_CONFLICT");
        assert_eq!(json["message"], "Room 101 is already occupied");
    }
}
