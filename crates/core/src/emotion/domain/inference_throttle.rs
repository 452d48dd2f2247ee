use std::time::{Duration, Instant};

/// Limits fresh emotion classification to once per `interval`.
///
/// The detector still runs every frame; on throttled frames the producer
/// reads from the emotion cache instead. The timestamp only advances through
/// [`InferenceThrottle::mark_inference`], which the caller invokes when at
/// least one face was actually classified, so an empty frame does not eat
/// the next inference slot.
#[derive(Debug, Clone)]
pub struct InferenceThrottle {
    interval: Duration,
    last_inference: Option<Instant>,
}

impl InferenceThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_inference: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_inference(&self) -> Option<Instant> {
        self.last_inference
    }

    pub fn should_run_inference(&self, now: Instant) -> bool {
        match self.last_inference {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    pub fn mark_inference(&mut self, now: Instant) {
        self.last_inference = Some(now);
    }
}
