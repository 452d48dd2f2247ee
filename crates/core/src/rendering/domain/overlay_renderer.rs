use std::time::Duration;

use crate::detection::domain::detection::BoundingBox;
use crate::emotion::domain::emotion_result::EmotionLabel;
use crate::pipeline::combined_frame_result::CombinedFrameResult;

/// One face box plus the caption drawn next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayItem {
    pub bounding_box: BoundingBox,
    pub label: EmotionLabel,
    pub caption: String,
}

impl OverlayItem {
    /// Builds one item per face pair, in snapshot order.
    pub fn from_snapshot(snapshot: &CombinedFrameResult) -> Vec<OverlayItem> {
        snapshot
            .pairs()
            .iter()
            .map(|pair| OverlayItem {
                bounding_box: pair.detection.bounding_box,
                label: pair.emotion.label,
                caption: format!("{} {:.2}", pair.emotion.label, pair.emotion.score),
            })
            .collect()
    }
}

/// Display-side port: waits for the compositor and draws overlays.
///
/// Implementations never touch pipeline state; they only receive items
/// built from a snapshot the consumer already copied out of the store.
pub trait OverlayRenderer: Send {
    /// Blocks until the display can accept a new overlay, or `timeout`
    /// passes. Returns false on timeout.
    fn wait_frame_ready(&mut self, timeout: Duration) -> bool;

    /// Replaces the overlay. An empty slice clears it.
    fn draw(&mut self, items: &[OverlayItem]);
}
