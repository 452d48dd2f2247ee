use std::time::Instant;

/// One captured sensor frame: contiguous planar bytes plus capture bookkeeping.
///
/// The pipeline never inspects pixels itself; detector and classifier
/// implementations do. `buffer_slot` identifies the sensor buffer the frame
/// was dequeued from and must be handed back through `FrameSource::release`.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    sequence: u64,
    buffer_slot: usize,
    captured_at: Instant,
}

impl Frame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: u8,
        sequence: u64,
        buffer_slot: usize,
    ) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            sequence,
            buffer_slot,
            captured_at: Instant::now(),
        }
    }

    /// Zero-filled frame, used by simulated sources and tests.
    pub fn blank(width: u32, height: u32, sequence: u64, buffer_slot: usize) -> Self {
        let len = (width as usize) * (height as usize) * 3;
        Self::new(vec![0u8; len], width, height, 3, sequence, buffer_slot)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Monotonic capture counter assigned by the frame source.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn buffer_slot(&self) -> usize {
        self.buffer_slot
    }

    pub fn captured_at(&self) -> Instant {
        self.captured_at
    }
}
