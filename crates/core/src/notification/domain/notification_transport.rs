use thiserror::Error;

use super::wake_up_event::WakeUpEvent;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to encode wake-up event: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to send wake-up event to {target}: {source}")]
    Send {
        target: String,
        #[source]
        source: std::io::Error,
    },
    #[error("wake-up event truncated: sent {sent} of {len} bytes")]
    Truncated { sent: usize, len: usize },
}

/// Delivers wake-up events to whatever listens for them.
///
/// Fire-and-forget: callers log failures and carry on.
pub trait NotificationTransport: Send {
    fn emit(&mut self, event: &WakeUpEvent) -> Result<(), TransportError>;
}
