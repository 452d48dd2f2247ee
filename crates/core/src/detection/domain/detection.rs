use serde::{Deserialize, Serialize};

use super::face_landmarks::FaceLandmarks;

/// Axis-aligned face box in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One located face in a single frame.
///
/// `face_index` is the position in detector output order and doubles as the
/// emotion cache slot. It is not a tracking identity: two consecutive frames
/// may assign the same index to different people if the detector reorders.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub face_index: usize,
    pub bounding_box: BoundingBox,
    pub landmarks: FaceLandmarks,
    pub confidence: f32,
}

impl Detection {
    /// Reassigns `face_index` to match position, so detectors may build
    /// detections without caring about numbering.
    pub fn reindex(detections: &mut [Detection]) {
        for (i, d) in detections.iter_mut().enumerate() {
            d.face_index = i;
        }
    }
}
