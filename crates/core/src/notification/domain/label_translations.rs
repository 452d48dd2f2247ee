//! Static label tables used to phrase wake-up text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::emotion::domain::emotion_result::EmotionLabel;

use super::wake_up_event::WakeUpEvent;

/// Immutable translation table: a sentence prefix plus one name per label.
#[derive(Debug)]
pub struct LabelTranslations {
    pub prefix: &'static str,
    pub names: &'static [(EmotionLabel, &'static str)],
}

impl LabelTranslations {
    /// Translated name, or the canonical tag when the table has no entry.
    pub fn name(&self, label: EmotionLabel) -> &'static str {
        self.names
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, name)| *name)
            .unwrap_or_else(|| label.as_str())
    }
}

pub static ZH_CN: LabelTranslations = LabelTranslations {
    prefix: "我当前情绪是",
    names: &[
        (EmotionLabel::Anger, "生气"),
        (EmotionLabel::Disgust, "厌恶"),
        (EmotionLabel::Fear, "恐惧"),
        (EmotionLabel::Happiness, "高兴"),
        (EmotionLabel::Neutral, "平静"),
        (EmotionLabel::Sadness, "伤心"),
        (EmotionLabel::Surprise, "惊讶"),
    ],
};

pub static EN: LabelTranslations = LabelTranslations {
    prefix: "My current emotion is ",
    names: &[
        (EmotionLabel::Anger, "anger"),
        (EmotionLabel::Disgust, "disgust"),
        (EmotionLabel::Fear, "fear"),
        (EmotionLabel::Happiness, "happiness"),
        (EmotionLabel::Neutral, "calm"),
        (EmotionLabel::Sadness, "sadness"),
        (EmotionLabel::Surprise, "surprise"),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    pub fn translations(self) -> &'static LabelTranslations {
        match self {
            Locale::Zh => &ZH_CN,
            Locale::En => &EN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Zh => write!(f, "zh"),
            Locale::En => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" => Ok(Locale::Zh),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{other}', expected zh or en")),
        }
    }
}

/// Turns an accepted emotion into the wake-up event announcing it.
#[derive(Debug, Clone, Copy)]
pub struct WakeUpComposer {
    translations: &'static LabelTranslations,
}

impl WakeUpComposer {
    pub fn new(translations: &'static LabelTranslations) -> Self {
        Self { translations }
    }

    pub fn for_locale(locale: Locale) -> Self {
        Self::new(locale.translations())
    }

    pub fn text(&self, label: EmotionLabel) -> String {
        format!("{}{}", self.translations.prefix, self.translations.name(label))
    }

    pub fn compose(&self, label: EmotionLabel) -> WakeUpEvent {
        WakeUpEvent::video(self.text(label))
    }
}

impl Default for WakeUpComposer {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EmotionLabel::Happiness, "我当前情绪是高兴")]
    #[case(EmotionLabel::Anger, "我当前情绪是生气")]
    #[case(EmotionLabel::Surprise, "我当前情绪是惊讶")]
    fn test_zh_text(#[case] label: EmotionLabel, #[case] expected: &str) {
        assert_eq!(WakeUpComposer::for_locale(Locale::Zh).text(label), expected);
    }

    #[test]
    fn test_en_text() {
        let composer = WakeUpComposer::for_locale(Locale::En);
        assert_eq!(composer.text(EmotionLabel::Fear), "My current emotion is fear");
    }

    #[test]
    fn test_every_label_translated_in_builtin_tables() {
        for table in [&ZH_CN, &EN] {
            for label in EmotionLabel::ALL {
                assert!(table.names.iter().any(|(l, _)| l == label), "{label} missing");
            }
        }
    }

    #[test]
    fn test_missing_entry_falls_back_to_tag() {
        static PARTIAL: LabelTranslations = LabelTranslations {
            prefix: "> ",
            names: &[(EmotionLabel::Anger, "mad")],
        };
        let composer = WakeUpComposer::new(&PARTIAL);
        assert_eq!(composer.text(EmotionLabel::Anger), "> mad");
        assert_eq!(composer.text(EmotionLabel::Disgust), "> Disgust");
    }

    #[test]
    fn test_compose_builds_video_event() {
        let event = WakeUpComposer::default().compose(EmotionLabel::Sadness);
        assert_eq!(event.method, "video");
        assert_eq!(event.text, "我当前情绪是伤心");
    }

    #[rstest]
    #[case("zh", Locale::Zh)]
    #[case("zh-CN", Locale::Zh)]
    #[case("EN", Locale::En)]
    fn test_parse_locale(#[case] text: &str, #[case] expected: Locale) {
        assert_eq!(text.parse::<Locale>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_locale() {
        assert!("fr".parse::<Locale>().is_err());
    }
}
