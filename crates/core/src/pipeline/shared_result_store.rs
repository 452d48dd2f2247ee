use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::combined_frame_result::CombinedFrameResult;

/// Latest published face/emotion snapshot, shared between the producer and
/// the renderer.
///
/// One mutex guards the whole snapshot, so a reader sees either the previous
/// publish or the next one and never a mix. The lock is held only long
/// enough to swap or clone an `Arc`; building results and rendering happen
/// outside it.
#[derive(Debug, Default)]
pub struct SharedResultStore {
    latest: Mutex<Arc<CombinedFrameResult>>,
}

impl SharedResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot and returns the generation stamped on it.
    pub fn publish(&self, combined: CombinedFrameResult) -> u64 {
        let previous;
        let generation;
        {
            let mut latest = self.lock();
            generation = latest.generation() + 1;
            previous = std::mem::replace(
                &mut *latest,
                Arc::new(combined.with_generation(generation)),
            );
        }
        // Freeing the old snapshot does not need the lock.
        drop(previous);
        generation
    }

    /// Most recent snapshot; empty with generation 0 before the first publish.
    pub fn read(&self) -> Arc<CombinedFrameResult> {
        Arc::clone(&self.lock())
    }

    /// Runs `f` against the current snapshot while the lock is held.
    ///
    /// Keep `f` short: the producer cannot publish until it returns.
    pub fn with_snapshot<R>(&self, f: impl FnOnce(&CombinedFrameResult) -> R) -> R {
        let latest = self.lock();
        f(&latest)
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation()
    }

    // A panic while holding the guard cannot leave a half-written snapshot,
    // since the value is only ever replaced whole, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Arc<CombinedFrameResult>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
