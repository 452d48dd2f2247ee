use std::time::Duration;

use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum AcquireError {
    /// No frame arrived within the timeout. Recoverable: the caller skips
    /// the cycle and tries again.
    #[error("no frame within {0:?}")]
    Timeout(Duration),
    #[error("frame source failure: {0}")]
    Device(String),
}

/// Blocking source of sensor frames backed by a small pool of buffers.
///
/// Every frame returned by `acquire` must be handed back through `release`
/// exactly once so its buffer can be requeued; taking the frame by value
/// makes a double release impossible.
pub trait FrameSource: Send {
    fn acquire(&mut self, timeout: Duration) -> Result<Frame, AcquireError>;

    fn release(&mut self, frame: Frame);
}
