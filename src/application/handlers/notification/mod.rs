//! Notification handlers: fan-out dispatch and the plain query surface.

mod fan_out;
mod queries;

pub use fan_out::{FanOutDispatcher, FanOutOutcome};
pub use queries::{NotificationError, NotificationQueries};
