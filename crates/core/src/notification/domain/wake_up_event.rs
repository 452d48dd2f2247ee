use serde::{Deserialize, Serialize};

/// Payload sent to the voice assistant to wake it up from video.
///
/// Field names on the wire follow the assistant's control protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeUpEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    #[serde(rename = "wake-up_method")]
    pub method: String,
    #[serde(rename = "wake-up_text")]
    pub text: String,
}

impl WakeUpEvent {
    pub fn video(text: impl Into<String>) -> Self {
        Self {
            kind: "wake-up".to_string(),
            status: "start".to_string(),
            method: "video".to_string(),
            text: text.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
