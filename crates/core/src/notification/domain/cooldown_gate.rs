use std::time::{Duration, Instant};

use crate::emotion::domain::emotion_result::EmotionLabel;

/// Rate limiter for outbound wake-up notifications.
///
/// Independent of the inference throttle: it decides whether a qualifying
/// emotion may notify right now, not whether classification runs.
#[derive(Debug, Clone)]
pub struct CooldownGate {
    window: Duration,
    last_trigger: Option<Instant>,
}

impl CooldownGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_trigger: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn last_trigger(&self) -> Option<Instant> {
        self.last_trigger
    }

    /// Accepts the trigger and records `now` when `label` is not neutral and
    /// the cooldown window has fully elapsed. Rejections leave state untouched.
    pub fn try_trigger(&mut self, now: Instant, label: EmotionLabel) -> bool {
        if label.is_neutral() {
            return false;
        }
        if let Some(last) = self.last_trigger {
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last_trigger = Some(now);
        true
    }

    /// Offers candidates in order and stops at the first accepted one.
    ///
    /// Returns the index of the winning candidate. At most one trigger is
    /// accepted per call no matter how many candidates qualify.
    pub fn try_trigger_first<I>(&mut self, now: Instant, labels: I) -> Option<usize>
    where
        I: IntoIterator<Item = EmotionLabel>,
    {
        let (index, label) = labels
            .into_iter()
            .enumerate()
            .find(|(_, label)| !label.is_neutral())?;
        self.try_trigger(now, label).then_some(index)
    }
}
