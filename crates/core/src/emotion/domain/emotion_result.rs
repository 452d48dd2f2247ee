use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of labels the emotion classifier can produce.
///
/// Discriminants are the classifier's class indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmotionLabel {
    Anger = 0,
    Disgust = 1,
    Fear = 2,
    Happiness = 3,
    Neutral = 4,
    Sadness = 5,
    Surprise = 6,
}

impl EmotionLabel {
    pub const ALL: &[EmotionLabel] = &[
        EmotionLabel::Anger,
        EmotionLabel::Disgust,
        EmotionLabel::Fear,
        EmotionLabel::Happiness,
        EmotionLabel::Neutral,
        EmotionLabel::Sadness,
        EmotionLabel::Surprise,
    ];

    pub fn from_class_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn class_index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionLabel::Anger => "Anger",
            EmotionLabel::Disgust => "Disgust",
            EmotionLabel::Fear => "Fear",
            EmotionLabel::Happiness => "Happiness",
            EmotionLabel::Neutral => "Neutral",
            EmotionLabel::Sadness => "Sadness",
            EmotionLabel::Surprise => "Surprise",
        }
    }

    pub fn is_neutral(self) -> bool {
        self == EmotionLabel::Neutral
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown emotion label '{s}'"))
    }
}

/// Classifier output for one face.
///
/// `score` is the softmax confidence of the winning class; it is expected in
/// [0, 1] but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    pub class_index: usize,
    pub score: f32,
    pub label: EmotionLabel,
}

impl EmotionResult {
    pub fn new(label: EmotionLabel, score: f32) -> Self {
        Self {
            class_index: label.class_index(),
            score,
            label,
        }
    }

    /// Stand-in for faces that have not been classified yet.
    pub fn neutral_default() -> Self {
        Self::new(EmotionLabel::Neutral, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, EmotionLabel::Anger)]
    #[case(3, EmotionLabel::Happiness)]
    #[case(4, EmotionLabel::Neutral)]
    #[case(6, EmotionLabel::Surprise)]
    fn test_from_class_index(#[case] index: usize, #[case] expected: EmotionLabel) {
        assert_eq!(EmotionLabel::from_class_index(index), Some(expected));
        assert_eq!(expected.class_index(), index);
    }

    #[test]
    fn test_from_class_index_out_of_range() {
        assert_eq!(EmotionLabel::from_class_index(7), None);
    }

    #[rstest]
    #[case("Happiness", EmotionLabel::Happiness)]
    #[case("fear", EmotionLabel::Fear)]
    #[case("NEUTRAL", EmotionLabel::Neutral)]
    fn test_parse_is_case_insensitive(#[case] text: &str, #[case] expected: EmotionLabel) {
        assert_eq!(text.parse::<EmotionLabel>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_label_errors() {
        assert!("Contempt".parse::<EmotionLabel>().is_err());
    }

    #[test]
    fn test_only_neutral_is_neutral() {
        let neutral: Vec<_> = EmotionLabel::ALL.iter().filter(|l| l.is_neutral()).collect();
        assert_eq!(neutral, vec![&EmotionLabel::Neutral]);
    }

    #[test]
    fn test_neutral_default() {
        let d = EmotionResult::neutral_default();
        assert_eq!(d.label, EmotionLabel::Neutral);
        assert_eq!(d.class_index, EmotionLabel::Neutral.class_index());
        assert_eq!(d.score, 0.0);
    }
}
