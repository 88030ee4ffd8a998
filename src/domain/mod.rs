//! Domain layer - aggregates and value objects.
//!
//! Everything in here is synchronous and free of I/O. Persistence and
//! delivery concerns live behind the ports.

pub mod directory;
pub mod foundation;
pub mod notification;
pub mod scheduling;
