use thiserror::Error;

use super::emotion_result::EmotionResult;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache slot {index} would leave a gap (cache holds {len} entries)")]
    InvalidIndex { index: usize, len: usize },
}

/// Per-slot memory of the most recent emotion results.
///
/// Slots are detector output positions, not tracked identities. Entries
/// survive across frames until a fresh classification pass begins, which
/// lets throttled frames reuse the last known emotion for each face.
#[derive(Debug, Default, Clone)]
pub struct EmotionCache {
    entries: Vec<EmotionResult>,
}

impl EmotionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[EmotionResult] {
        &self.entries
    }

    /// Starts a new frame. A fresh pass wipes the cache so it is refilled
    /// in the current detection order.
    pub fn begin_frame(&mut self, run_fresh: bool) {
        if run_fresh {
            self.entries.clear();
        }
    }

    /// Returns the cached result for `slot`, inserting the neutral default
    /// (and any defaults needed to reach `slot`) on a miss.
    pub fn get_or_default(&mut self, slot: usize) -> EmotionResult {
        if slot >= self.entries.len() {
            self.entries
                .resize(slot + 1, EmotionResult::neutral_default());
        }
        self.entries[slot]
    }

    /// Overwrites `slot`, or appends when `slot == len()`.
    pub fn set(&mut self, slot: usize, result: EmotionResult) -> Result<(), CacheError> {
        let len = self.entries.len();
        if slot < len {
            self.entries[slot] = result;
            Ok(())
        } else if slot == len {
            self.entries.push(result);
            Ok(())
        } else {
            Err(CacheError::InvalidIndex { index: slot, len })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::domain::emotion_result::EmotionLabel;

    fn result(label: EmotionLabel, score: f32) -> EmotionResult {
        EmotionResult::new(label, score)
    }

    #[test]
    fn test_miss_returns_neutral_default() {
        let mut cache = EmotionCache::new();
        cache.begin_frame(false);

        let r = cache.get_or_default(0);

        assert_eq!(r.label, EmotionLabel::Neutral);
        assert_eq!(r.score, 0.0);
    }

    #[test]
    fn test_miss_is_idempotent_within_frame() {
        let mut cache = EmotionCache::new();
        cache.set(0, result(EmotionLabel::Fear, 0.8)).unwrap();
        cache.begin_frame(false);

        let first = cache.get_or_default(1);
        let second = cache.get_or_default(1);

        assert_eq!(first, second);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_miss_beyond_len_fills_gap_with_defaults() {
        let mut cache = EmotionCache::new();
        let r = cache.get_or_default(2);

        assert_eq!(r, EmotionResult::neutral_default());
        assert_eq!(cache.len(), 3);
        assert!(cache
            .entries()
            .iter()
            .all(|e| *e == EmotionResult::neutral_default()));
    }

    #[test]
    fn test_cached_entries_persist_on_reuse_frame() {
        let mut cache = EmotionCache::new();
        cache.begin_frame(true);
        cache.set(0, result(EmotionLabel::Happiness, 0.9)).unwrap();
        cache.set(1, result(EmotionLabel::Sadness, 0.6)).unwrap();

        cache.begin_frame(false);

        assert_eq!(cache.get_or_default(0).label, EmotionLabel::Happiness);
        assert_eq!(cache.get_or_default(1).label, EmotionLabel::Sadness);
    }

    #[test]
    fn test_fresh_frame_clears_entries() {
        let mut cache = EmotionCache::new();
        cache.set(0, result(EmotionLabel::Anger, 0.7)).unwrap();

        cache.begin_frame(true);

        assert!(cache.is_empty());
        assert_eq!(cache.get_or_default(0).label, EmotionLabel::Neutral);
    }

    #[test]
    fn test_set_overwrites_existing_slot() {
        let mut cache = EmotionCache::new();
        cache.set(0, result(EmotionLabel::Anger, 0.7)).unwrap();
        cache.set(0, result(EmotionLabel::Surprise, 0.5)).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.entries()[0].label, EmotionLabel::Surprise);
    }

    #[test]
    fn test_set_appends_at_len() {
        let mut cache = EmotionCache::new();
        cache.set(0, result(EmotionLabel::Anger, 0.7)).unwrap();
        cache.set(1, result(EmotionLabel::Fear, 0.7)).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_set_beyond_len_is_rejected() {
        let mut cache = EmotionCache::new();
        cache.set(0, result(EmotionLabel::Anger, 0.7)).unwrap();

        let err = cache.set(2, result(EmotionLabel::Fear, 0.7)).unwrap_err();

        assert_eq!(err, CacheError::InvalidIndex { index: 2, len: 1 });
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_never_shrinks_within_frame() {
        let mut cache = EmotionCache::new();
        cache.begin_frame(true);
        cache.set(0, result(EmotionLabel::Anger, 0.7)).unwrap();
        cache.set(1, result(EmotionLabel::Fear, 0.7)).unwrap();

        // Next frame only sees one face; slot 1 stays cached.
        cache.begin_frame(false);
        cache.get_or_default(0);

        assert_eq!(cache.len(), 2);
    }
}
