//! Scripted face/emotion timelines that drive the simulated detector and
//! classifier.
//!
//! A scenario is a list of steps; each step holds for `frames` captured
//! frames and lists the faces visible during it. Steps play in order and the
//! timeline loops.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::detection::{BoundingBox, Detection};
use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::emotion::domain::emotion_result::{EmotionLabel, EmotionResult};
use crate::shared::constants::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scenario has no steps")]
    Empty,
    #[error("scenario step {0} must last at least one frame")]
    ZeroFrames(usize),
    #[error("scenario frame counts overflow a 64-bit total")]
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFace {
    /// `[x, y, width, height]`
    pub bbox: [f32; 4],
    pub landmarks: [[f32; 2]; 5],
    pub emotion: EmotionLabel,
    #[serde(default = "default_score")]
    pub score: f32,
}

impl ScenarioFace {
    pub fn landmarks(&self) -> FaceLandmarks {
        FaceLandmarks::new(self.landmarks.map(|[x, y]| (x, y)))
    }

    pub fn to_detection(&self, face_index: usize) -> Detection {
        let [x, y, w, h] = self.bbox;
        Detection {
            face_index,
            bounding_box: BoundingBox::new(x, y, w, h),
            landmarks: self.landmarks(),
            confidence: 1.0,
        }
    }

    pub fn to_emotion(&self) -> EmotionResult {
        EmotionResult::new(self.emotion, self.score)
    }
}

fn default_score() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioStep {
    pub frames: u64,
    #[serde(default)]
    pub faces: Vec<ScenarioFace>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_width")]
    pub frame_width: u32,
    #[serde(default = "default_height")]
    pub frame_height: u32,
    pub steps: Vec<ScenarioStep>,
}

fn default_width() -> u32 {
    DEFAULT_FRAME_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_FRAME_HEIGHT
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.steps.is_empty() {
            return Err(ScenarioError::Empty);
        }
        if let Some(i) = self.steps.iter().position(|s| s.frames == 0) {
            return Err(ScenarioError::ZeroFrames(i));
        }
        self.steps
            .iter()
            .try_fold(0u64, |total, s| total.checked_add(s.frames))
            .ok_or(ScenarioError::TooLong)?;
        Ok(())
    }

    /// Length of one pass through every step. Saturates for scenarios that
    /// were built in code without passing [`Scenario::validate`].
    pub fn cycle_frames(&self) -> u64 {
        self.steps
            .iter()
            .fold(0u64, |total, s| total.saturating_add(s.frames))
    }

    /// Step active for the frame with the given capture sequence number.
    pub fn step_for(&self, sequence: u64) -> Option<&ScenarioStep> {
        let cycle = self.cycle_frames();
        if cycle == 0 {
            return None;
        }
        let mut remaining = sequence % cycle;
        for step in &self.steps {
            if remaining < step.frames {
                return Some(step);
            }
            remaining -= step.frames;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_STEPS: &str = r#"{
        "frame_width": 640,
        "frame_height": 480,
        "steps": [
            {"frames": 2, "faces": []},
            {"frames": 3, "faces": [
                {"bbox": [10, 20, 100, 120],
                 "landmarks": [[40, 60], [80, 60], [60, 80], [45, 100], [75, 100]],
                 "emotion": "Happiness", "score": 0.9}
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_and_dimensions() {
        let s = Scenario::from_json(TWO_STEPS).unwrap();
        assert_eq!(s.frame_width, 640);
        assert_eq!(s.frame_height, 480);
        assert_eq!(s.cycle_frames(), 5);
    }

    #[test]
    fn test_default_dimensions_and_score() {
        let s = Scenario::from_json(
            r#"{"steps": [{"frames": 1, "faces": [
                {"bbox": [0, 0, 1, 1], "landmarks": [[1,1],[1,1],[1,1],[1,1],[1,1]], "emotion": "Fear"}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(s.frame_width, DEFAULT_FRAME_WIDTH);
        assert_eq!(s.steps[0].faces[0].score, 1.0);
    }

    #[test]
    fn test_step_for_loops() {
        let s = Scenario::from_json(TWO_STEPS).unwrap();
        let counts: Vec<usize> = (0..7).map(|i| s.step_for(i).unwrap().faces.len()).collect();
        assert_eq!(counts, vec![0, 0, 1, 1, 1, 0, 0]);
    }

    #[test]
    fn test_empty_steps_rejected() {
        assert!(matches!(
            Scenario::from_json(r#"{"steps": []}"#),
            Err(ScenarioError::Empty)
        ));
    }

    #[test]
    fn test_zero_frame_step_rejected() {
        assert!(matches!(
            Scenario::from_json(r#"{"steps": [{"frames": 1}, {"frames": 0}]}"#),
            Err(ScenarioError::ZeroFrames(1))
        ));
    }

    #[test]
    fn test_overflowing_frame_total_rejected() {
        let text = format!(
            r#"{{"steps": [{{"frames": {}}}, {{"frames": 2}}]}}"#,
            u64::MAX
        );
        assert!(matches!(
            Scenario::from_json(&text),
            Err(ScenarioError::TooLong)
        ));
    }

    #[test]
    fn test_cycle_frames_saturates_when_unvalidated() {
        let step = ScenarioStep {
            frames: u64::MAX,
            faces: Vec::new(),
        };
        let s = Scenario {
            frame_width: 1,
            frame_height: 1,
            steps: vec![step.clone(), step],
        };
        assert_eq!(s.cycle_frames(), u64::MAX);
        assert!(s.step_for(5).is_some());
    }

    #[test]
    fn test_unknown_emotion_rejected() {
        let text = r#"{"steps": [{"frames": 1, "faces": [
            {"bbox": [0,0,1,1], "landmarks": [[1,1],[1,1],[1,1],[1,1],[1,1]], "emotion": "Contempt"}
        ]}]}"#;
        assert!(matches!(Scenario::from_json(text), Err(ScenarioError::Parse(_))));
    }

    #[test]
    fn test_face_conversions() {
        let s = Scenario::from_json(TWO_STEPS).unwrap();
        let face = &s.steps[1].faces[0];

        let det = face.to_detection(4);
        assert_eq!(det.face_index, 4);
        assert_eq!(det.bounding_box, BoundingBox::new(10.0, 20.0, 100.0, 120.0));
        assert_eq!(det.landmarks.points()[2], (60.0, 80.0));

        let emo = face.to_emotion();
        assert_eq!(emo.label, EmotionLabel::Happiness);
        assert_eq!(emo.class_index, 3);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_STEPS.as_bytes()).unwrap();
        let s = Scenario::load(file.path()).unwrap();
        assert_eq!(s.steps.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Scenario::load(Path::new("/nonexistent/scenario.json")).unwrap_err();
        assert!(matches!(err, ScenarioError::Read { .. }));
    }
}
