//! Real-time push adapters.
//!
//! `ChannelRegistry` keys one broadcast channel per connected recipient;
//! `ChannelNotifier` implements the `Notifier` port on top of it. The
//! websocket layer subscribes receivers and forwards whatever arrives.
//!
//! `RecordingNotifier` is a fake for exercising the fan-out path without a
//! transport.

mod notifier;
mod recording;
mod registry;

pub use notifier::ChannelNotifier;
pub use recording::RecordingNotifier;
pub use registry::ChannelRegistry;
