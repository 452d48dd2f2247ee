use std::sync::Arc;

use crate::detection::domain::detection::Detection;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::scenario::Scenario;

/// Replays the faces a scenario lists for each frame's capture sequence.
///
/// Stands in for the neural detector when running without hardware.
pub struct ScriptedFaceDetector {
    scenario: Arc<Scenario>,
}

impl ScriptedFaceDetector {
    pub fn new(scenario: Arc<Scenario>) -> Self {
        Self { scenario }
    }
}

impl FaceDetector for ScriptedFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        let step = self
            .scenario
            .step_for(frame.sequence())
            .ok_or("scenario has no step for frame")?;
        Ok(step
            .faces
            .iter()
            .enumerate()
            .map(|(i, face)| face.to_detection(i))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Arc<Scenario> {
        Arc::new(
            Scenario::from_json(
                r#"{"steps": [
                    {"frames": 1, "faces": [
                        {"bbox": [0, 0, 10, 10], "landmarks": [[1,1],[2,1],[1,2],[1,3],[2,3]], "emotion": "Neutral"},
                        {"bbox": [50, 0, 10, 10], "landmarks": [[51,1],[52,1],[51,2],[51,3],[52,3]], "emotion": "Fear"}
                    ]},
                    {"frames": 1}
                ]}"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_returns_faces_in_script_order() {
        let mut detector = ScriptedFaceDetector::new(scenario());

        let dets = detector.detect(&Frame::blank(4, 4, 0, 0)).unwrap();

        assert_eq!(dets.len(), 2);
        assert_eq!(dets[0].face_index, 0);
        assert_eq!(dets[1].face_index, 1);
        assert_eq!(dets[1].bounding_box.x, 50.0);
    }

    #[test]
    fn test_empty_step_returns_no_faces() {
        let mut detector = ScriptedFaceDetector::new(scenario());
        assert!(detector.detect(&Frame::blank(4, 4, 1, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_timeline_loops() {
        let mut detector = ScriptedFaceDetector::new(scenario());
        assert_eq!(detector.detect(&Frame::blank(4, 4, 2, 0)).unwrap().len(), 2);
    }
}
