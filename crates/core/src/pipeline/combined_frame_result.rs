use thiserror::Error;

use crate::detection::domain::detection::Detection;
use crate::emotion::domain::emotion_result::EmotionResult;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("{detections} detections cannot pair with {emotions} emotion results")]
pub struct ResultAlignmentError {
    pub detections: usize,
    pub emotions: usize,
}

/// A detection together with the emotion shown for it.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceEmotion {
    pub detection: Detection,
    pub emotion: EmotionResult,
}

/// Everything the renderer needs for one frame: face/emotion pairs in
/// detector order.
///
/// Pairs are stored together so detections and emotions cannot drift out of
/// alignment. `generation` is stamped by the result store on publish and is 0
/// for results that were never published.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedFrameResult {
    pairs: Vec<FaceEmotion>,
    generation: u64,
}

impl CombinedFrameResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(pairs: Vec<FaceEmotion>) -> Self {
        Self {
            pairs,
            generation: 0,
        }
    }

    /// Zips index-aligned lists, rejecting lists of different lengths.
    pub fn from_parts(
        detections: Vec<Detection>,
        emotions: Vec<EmotionResult>,
    ) -> Result<Self, ResultAlignmentError> {
        if detections.len() != emotions.len() {
            return Err(ResultAlignmentError {
                detections: detections.len(),
                emotions: emotions.len(),
            });
        }
        let pairs = detections
            .into_iter()
            .zip(emotions)
            .map(|(detection, emotion)| FaceEmotion { detection, emotion })
            .collect();
        Ok(Self::new(pairs))
    }

    pub fn pairs(&self) -> &[FaceEmotion] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn detections(&self) -> impl Iterator<Item = &Detection> {
        self.pairs.iter().map(|p| &p.detection)
    }

    pub fn emotions(&self) -> impl Iterator<Item = &EmotionResult> {
        self.pairs.iter().map(|p| &p.emotion)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }
}
