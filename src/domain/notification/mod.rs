//! Notification domain - one message instance per recipient.

mod notification;

pub use notification::{Notification, NotificationCategory};
