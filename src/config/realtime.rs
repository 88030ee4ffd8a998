//! Real-time push configuration.

use serde::Deserialize;

use super::error::ValidationError;

/// Settings for the per-recipient broadcast channels.
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// How many undelivered messages a slow connection may buffer before
    /// it starts dropping.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl RealtimeConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.channel_capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_channel_capacity() -> usize {
    64
}
