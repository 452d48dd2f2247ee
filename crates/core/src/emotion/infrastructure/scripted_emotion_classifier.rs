use std::sync::Arc;

use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::emotion::domain::emotion_classifier::EmotionClassifier;
use crate::emotion::domain::emotion_result::EmotionResult;
use crate::shared::frame::Frame;
use crate::shared::scenario::Scenario;

/// Landmark match tolerance, in pixels.
pub const DEFAULT_MATCH_TOLERANCE: f32 = 0.5;

/// Answers with the emotion the scenario assigns to the face whose
/// landmarks match the query.
pub struct ScriptedEmotionClassifier {
    scenario: Arc<Scenario>,
    tolerance: f32,
    calls: usize,
}

impl ScriptedEmotionClassifier {
    pub fn new(scenario: Arc<Scenario>) -> Self {
        Self {
            scenario,
            tolerance: DEFAULT_MATCH_TOLERANCE,
            calls: 0,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Number of classifications served so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl EmotionClassifier for ScriptedEmotionClassifier {
    fn classify(
        &mut self,
        frame: &Frame,
        landmarks: &FaceLandmarks,
    ) -> Result<EmotionResult, Box<dyn std::error::Error>> {
        self.calls += 1;
        let step = self
            .scenario
            .step_for(frame.sequence())
            .ok_or("scenario has no step for frame")?;
        step.faces
            .iter()
            .find(|face| face.landmarks().approx_eq(landmarks, self.tolerance))
            .map(|face| face.to_emotion())
            .ok_or_else(|| {
                format!(
                    "no scripted face matches landmarks in frame {}",
                    frame.sequence()
                )
                .into()
            })
    }
}
