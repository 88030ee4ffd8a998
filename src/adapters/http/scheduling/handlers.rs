//! HTTP handlers for the scheduling endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::scheduling::{
    ArchiveTimetableHandler, ClearSessionsHandler, CreateSessionHandler, CreateTimetableHandler,
    DeleteSessionHandler, DeleteTimetableHandler, PublishTimetableHandler, UpdateSessionHandler,
};
use crate::domain::foundation::{SessionId, TimetableId};
use crate::domain::scheduling::ScheduleError;

use super::dto::{
    CreateSessionRequest, CreateTimetableRequest, RemovedResponse, SessionResponse,
    TimetableResponse, UpdateSessionRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SchedulingHandlers {
    create_session: Arc<CreateSessionHandler>,
    update_session: Arc<UpdateSessionHandler>,
    delete_session: Arc<DeleteSessionHandler>,
    clear_sessions: Arc<ClearSessionsHandler>,
    create_timetable: Arc<CreateTimetableHandler>,
    publish_timetable: Arc<PublishTimetableHandler>,
    archive_timetable: Arc<ArchiveTimetableHandler>,
    delete_timetable: Arc<DeleteTimetableHandler>,
}

impl SchedulingHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_session: Arc<CreateSessionHandler>,
        update_session: Arc<UpdateSessionHandler>,
        delete_session: Arc<DeleteSessionHandler>,
        clear_sessions: Arc<ClearSessionsHandler>,
        create_timetable: Arc<CreateTimetableHandler>,
        publish_timetable: Arc<PublishTimetableHandler>,
        archive_timetable: Arc<ArchiveTimetableHandler>,
        delete_timetable: Arc<DeleteTimetableHandler>,
    ) -> Self {
        Self {
            create_session,
            update_session,
            delete_session,
            clear_sessions,
            create_timetable,
            publish_timetable,
            archive_timetable,
            delete_timetable,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Session endpoints
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Create a session
pub async fn create_session(
    State(handlers): State<SchedulingHandlers>,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    let command = match req.into_command() {
        Ok(command) => command,
        Err(e) => return handle_schedule_error(e),
    };
    match handlers.create_session.handle(command).await {
        Ok(session) => {
            (StatusCode::CREATED, Json(SessionResponse::from(session))).into_response()
        }
        Err(e) => handle_schedule_error(e),
    }
}

/// PUT /api/sessions/:id - Patch a session
pub async fn update_session(
    State(handlers): State<SchedulingHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<UpdateSessionRequest>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };
    match handlers.update_session.handle(&session_id, req.into()).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(session))).into_response(),
        Err(e) => handle_schedule_error(e),
    }
}

/// DELETE /api/sessions/:id - Delete a session
pub async fn delete_session(
    State(handlers): State<SchedulingHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };
    match handlers.delete_session.handle(&session_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_schedule_error(e),
    }
}

/// DELETE /api/sessions - Clear the whole registry
pub async fn clear_sessions(State(handlers): State<SchedulingHandlers>) -> Response {
    match handlers.clear_sessions.handle().await {
        Ok(removed) => (StatusCode::OK, Json(RemovedResponse { removed })).into_response(),
        Err(e) => handle_schedule_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Timetable endpoints
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/timetables - Create a timetable with its sessions
pub async fn create_timetable(
    State(handlers): State<SchedulingHandlers>,
    Json(req): Json<CreateTimetableRequest>,
) -> Response {
    let command = match req.into_command() {
        Ok(command) => command,
        Err(e) => return handle_schedule_error(e),
    };
    match handlers.create_timetable.handle(command).await {
        Ok(timetable) => {
            (StatusCode::CREATED, Json(TimetableResponse::from(timetable))).into_response()
        }
        Err(e) => handle_schedule_error(e),
    }
}

/// POST /api/timetables/:id/publish - Publish a draft timetable
pub async fn publish_timetable(
    State(handlers): State<SchedulingHandlers>,
    Path(timetable_id): Path<String>,
) -> Response {
    let timetable_id = match timetable_id.parse::<TimetableId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid timetable ID")),
            )
                .into_response()
        }
    };
    match handlers.publish_timetable.handle(&timetable_id).await {
        Ok(timetable) => {
            (StatusCode::OK, Json(TimetableResponse::from(timetable))).into_response()
        }
        Err(e) => handle_schedule_error(e),
    }
}

/// POST /api/timetables/:id/archive - Archive a published timetable
pub async fn archive_timetable(
    State(handlers): State<SchedulingHandlers>,
    Path(timetable_id): Path<String>,
) -> Response {
    let timetable_id = match timetable_id.parse::<TimetableId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid timetable ID")),
            )
                .into_response()
        }
    };
    match handlers.archive_timetable.handle(&timetable_id).await {
        Ok(timetable) => {
            (StatusCode::OK, Json(TimetableResponse::from(timetable))).into_response()
        }
        Err(e) => handle_schedule_error(e),
    }
}

/// DELETE /api/timetables/:id - Cascade-delete a timetable
pub async fn delete_timetable(
    State(handlers): State<SchedulingHandlers>,
    Path(timetable_id): Path<String>,
) -> Response {
    let timetable_id = match timetable_id.parse::<TimetableId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid timetable ID")),
            )
                .into_response()
        }
    };
    match handlers.delete_timetable.handle(&timetable_id).await {
        Ok(removed) => (StatusCode::OK, Json(RemovedResponse { removed })).into_response(),
        Err(e) => handle_schedule_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_schedule_error(error: ScheduleError) -> Response {
    match error {
        ScheduleError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(error.to_string())),
        )
            .into_response(),
        ScheduleError::Conflict { .. } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::conflict(error.to_string())),
        )
            .into_response(),
        ScheduleError::MissingField { .. }
        | ScheduleError::InvalidRole { .. }
        | ScheduleError::InvalidState(_)
        | ScheduleError::Validation(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        ScheduleError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheduling::Weekday;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_schedule_error(ScheduleError::not_found("Session", "abc"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_maps_to_400() {
        let response = handle_schedule_error(ScheduleError::conflict(
            "101",
            Weekday::Monday,
            "09:00-11:00",
        ));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_field_maps_to_400() {
        let response = handle_schedule_error(ScheduleError::missing_field("room"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_schedule_error(ScheduleError::infrastructure("storage down"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
