//! Termtable server binary.
//!
//! Wires the in-memory repositories, the reference synchronizer, the
//! notification fan-out, and the HTTP/websocket surface together, then
//! serves until shutdown.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use termtable::adapters::http::{app_router, NotificationHandlers, SchedulingHandlers, WsState};
use termtable::adapters::memory::{
    InMemoryClassGroupRepository, InMemoryCourseRepository, InMemoryMemberRepository,
    InMemoryNotificationRepository, InMemorySessionRepository, InMemoryTimetableRepository,
};
use termtable::adapters::realtime::{ChannelNotifier, ChannelRegistry};
use termtable::application::handlers::notification::{FanOutDispatcher, NotificationQueries};
use termtable::application::handlers::scheduling::{
    ArchiveTimetableHandler, ClearSessionsHandler, CreateSessionHandler, CreateTimetableHandler,
    DeleteSessionHandler, DeleteTimetableHandler, PublishTimetableHandler, ReferenceSynchronizer,
    UpdateSessionHandler,
};
use termtable::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    info!(environment = ?config.server.environment, "starting termtable");

    // Repositories.
    let sessions = Arc::new(InMemorySessionRepository::new());
    let timetables = Arc::new(InMemoryTimetableRepository::new());
    let courses = Arc::new(InMemoryCourseRepository::new());
    let class_groups = Arc::new(InMemoryClassGroupRepository::new());
    let members = Arc::new(InMemoryMemberRepository::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());

    // Real-time push.
    let registry = Arc::new(ChannelRegistry::new(config.realtime.channel_capacity));
    let notifier = Arc::new(ChannelNotifier::new(registry.clone()));

    // Application core.
    let sync = Arc::new(ReferenceSynchronizer::new(
        courses.clone(),
        class_groups.clone(),
        members.clone(),
        timetables.clone(),
    ));
    let dispatcher = Arc::new(FanOutDispatcher::new(
        notifications.clone(),
        members.clone(),
        notifier,
    ));

    let create_session = Arc::new(CreateSessionHandler::new(
        sessions.clone(),
        courses.clone(),
        class_groups.clone(),
        members.clone(),
        timetables.clone(),
        sync.clone(),
        dispatcher.clone(),
    ));
    let update_session = Arc::new(UpdateSessionHandler::new(
        sessions.clone(),
        courses.clone(),
        class_groups.clone(),
        members.clone(),
        timetables.clone(),
        sync.clone(),
        dispatcher.clone(),
    ));
    let delete_session = Arc::new(DeleteSessionHandler::new(
        sessions.clone(),
        class_groups.clone(),
        sync.clone(),
        dispatcher.clone(),
    ));
    let clear_sessions = Arc::new(ClearSessionsHandler::new(sessions.clone(), sync.clone()));
    let create_timetable = Arc::new(CreateTimetableHandler::new(
        timetables.clone(),
        class_groups.clone(),
        sessions.clone(),
        create_session.clone(),
        sync.clone(),
        dispatcher.clone(),
    ));
    let publish_timetable = Arc::new(PublishTimetableHandler::new(
        timetables.clone(),
        class_groups.clone(),
        dispatcher.clone(),
    ));
    let archive_timetable = Arc::new(ArchiveTimetableHandler::new(timetables.clone()));
    let delete_timetable = Arc::new(DeleteTimetableHandler::new(
        timetables,
        sessions,
        class_groups,
        sync,
        dispatcher,
    ));
    let queries = Arc::new(NotificationQueries::new(notifications, members));

    // HTTP surface.
    let scheduling = SchedulingHandlers::new(
        create_session,
        update_session,
        delete_session,
        clear_sessions,
        create_timetable,
        publish_timetable,
        archive_timetable,
        delete_timetable,
    );
    let notification_handlers = NotificationHandlers::new(queries);
    let ws_state = WsState::new(registry);

    let cors = cors_layer(&config);
    let app = app_router(scheduling, notification_handlers, ws_state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        // Permissive default for development.
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
