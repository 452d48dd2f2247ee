use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::shared::constants::SENSOR_BUFFER_COUNT;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::{AcquireError, FrameSource};

/// Produces blank frames at a fixed rate, standing in for a camera.
///
/// Frames are paced by a `crossbeam_channel::tick` so `acquire` blocks the
/// same way a sensor dequeue would. A fixed pool of buffer slots is cycled;
/// if every slot is still held by the caller the source reports a device
/// fault, mirroring an exhausted driver queue.
pub struct SyntheticFrameSource {
    width: u32,
    height: u32,
    ticker: Receiver<Instant>,
    in_flight: [bool; SENSOR_BUFFER_COUNT],
    next_slot: usize,
    sequence: u64,
    released: u64,
}

impl SyntheticFrameSource {
    pub fn new(width: u32, height: u32, fps: u32) -> Result<Self, &'static str> {
        if fps == 0 {
            return Err("fps must be >= 1");
        }
        Ok(Self::with_interval(
            width,
            height,
            Duration::from_secs_f64(1.0 / fps as f64),
        ))
    }

    pub fn with_interval(width: u32, height: u32, interval: Duration) -> Self {
        Self {
            width,
            height,
            ticker: crossbeam_channel::tick(interval),
            in_flight: [false; SENSOR_BUFFER_COUNT],
            next_slot: 0,
            sequence: 0,
            released: 0,
        }
    }

    /// Frames handed out so far.
    pub fn captured(&self) -> u64 {
        self.sequence
    }

    pub fn released(&self) -> u64 {
        self.released
    }

    fn claim_slot(&mut self) -> Option<usize> {
        let slot = (0..SENSOR_BUFFER_COUNT)
            .map(|offset| (self.next_slot + offset) % SENSOR_BUFFER_COUNT)
            .find(|&slot| !self.in_flight[slot])?;
        self.in_flight[slot] = true;
        self.next_slot = (slot + 1) % SENSOR_BUFFER_COUNT;
        Some(slot)
    }
}

impl FrameSource for SyntheticFrameSource {
    fn acquire(&mut self, timeout: Duration) -> Result<Frame, AcquireError> {
        match self.ticker.recv_timeout(timeout) {
            Ok(_) => {}
            Err(RecvTimeoutError::Timeout) => return Err(AcquireError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(AcquireError::Device("frame clock stopped".into()))
            }
        }

        let slot = self
            .claim_slot()
            .ok_or_else(|| AcquireError::Device("all sensor buffers are in use".into()))?;

        let frame = Frame::blank(self.width, self.height, self.sequence, slot);
        self.sequence += 1;
        Ok(frame)
    }

    fn release(&mut self, frame: Frame) {
        let slot = frame.buffer_slot();
        match self.in_flight.get_mut(slot) {
            Some(held) if *held => {
                *held = false;
                self.released += 1;
            }
            _ => log::warn!(
                "Release of frame {} for buffer {slot} that was not in flight",
                frame.sequence()
            ),
        }
    }
}
