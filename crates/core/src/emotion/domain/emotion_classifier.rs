use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::emotion::domain::emotion_result::EmotionResult;
use crate::shared::frame::Frame;

/// Domain interface for per-face emotion classification.
///
/// Called at most once per detection on cycles where the inference throttle
/// allows a fresh pass.
pub trait EmotionClassifier: Send {
    fn classify(
        &mut self,
        frame: &Frame,
        landmarks: &FaceLandmarks,
    ) -> Result<EmotionResult, Box<dyn std::error::Error>>;
}
