//! Command and query handlers, one module per concern.

pub mod notification;
pub mod scheduling;
