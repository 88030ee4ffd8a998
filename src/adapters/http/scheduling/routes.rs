//! HTTP routes for the scheduling endpoints.

use axum::{
    routing::{delete, post, put},
    Router,
};

use super::handlers::{
    archive_timetable, clear_sessions, create_session, create_timetable, delete_session,
    delete_timetable, publish_timetable, update_session, SchedulingHandlers,
};

/// Routes mounted under `/api/sessions`.
pub fn session_routes(handlers: SchedulingHandlers) -> Router {
    Router::new()
        .route("/", post(create_session).delete(clear_sessions))
        .route("/:id", put(update_session).delete(delete_session))
        .with_state(handlers)
}

/// Routes mounted under `/api/timetables`.
pub fn timetable_routes(handlers: SchedulingHandlers) -> Router {
    Router::new()
        .route("/", post(create_timetable))
        .route("/:id", delete(delete_timetable))
        .route("/:id/publish", post(publish_timetable))
        .route("/:id/archive", post(archive_timetable))
        .with_state(handlers)
}
