use crate::notification::domain::notification_transport::{NotificationTransport, TransportError};
use crate::notification::domain::wake_up_event::WakeUpEvent;

/// Logs wake-up events instead of sending them. Used when no assistant
/// endpoint is configured.
#[derive(Debug, Default)]
pub struct LogNotificationTransport {
    emitted: usize,
}

impl LogNotificationTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl NotificationTransport for LogNotificationTransport {
    fn emit(&mut self, event: &WakeUpEvent) -> Result<(), TransportError> {
        let payload = event.to_json()?;
        self.emitted += 1;
        log::info!("Wake-up: {payload}");
        Ok(())
    }
}
