//! Bulk administrative reset of the session registry.
//!
//! Deletes every session and wipes the session back-reference lists on all
//! aggregate kinds. No fan-out: this is an administrative operation, not a
//! schedule change anyone subscribes to.

use std::sync::Arc;

use tracing::info;

use crate::domain::scheduling::ScheduleError;
use crate::ports::SessionRepository;

use super::ReferenceSynchronizer;

/// Handler for wiping the session registry.
pub struct ClearSessionsHandler {
    sessions: Arc<dyn SessionRepository>,
    sync: Arc<ReferenceSynchronizer>,
}

impl ClearSessionsHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>, sync: Arc<ReferenceSynchronizer>) -> Self {
        Self { sessions, sync }
    }

    /// Deletes every session, returning how many were removed.
    pub async fn handle(&self) -> Result<u64, ScheduleError> {
        let removed = self.sessions.delete_all().await?;
        self.sync.reset_all().await?;

        info!(removed, "session registry cleared");
        Ok(removed)
    }
}
