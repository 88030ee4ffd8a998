//! HTTP adapter for the scheduling endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::SchedulingHandlers;
pub use routes::{session_routes, timetable_routes};
