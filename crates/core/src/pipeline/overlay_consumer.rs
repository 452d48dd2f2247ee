use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::pipeline::cancellation_token::CancellationToken;
use crate::pipeline::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use crate::pipeline::shared_result_store::SharedResultStore;
use crate::rendering::domain::overlay_renderer::{OverlayItem, OverlayRenderer};
use crate::shared::constants::DEFAULT_DISPLAY_TIMEOUT_MS;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    pub cycles: u64,
    pub renders: u64,
    pub wait_timeouts: u64,
    /// Generation of the last snapshot drawn; 0 if none was ever published.
    pub last_generation: u64,
}

/// Display-side loop: on every display frame, copy the latest snapshot out
/// of the result store and draw it.
///
/// Never writes shared state. The store lock is held only while the
/// snapshot pointer is cloned; overlay building and drawing happen after.
pub struct OverlayConsumer {
    renderer: Box<dyn OverlayRenderer>,
    store: Arc<SharedResultStore>,
    ready_timeout: Duration,
    logger: Box<dyn PipelineLogger>,
    stats: ConsumerStats,
}

impl OverlayConsumer {
    pub fn new(renderer: Box<dyn OverlayRenderer>, store: Arc<SharedResultStore>) -> Self {
        Self {
            renderer,
            store,
            ready_timeout: Duration::from_millis(DEFAULT_DISPLAY_TIMEOUT_MS),
            logger: Box::new(NullPipelineLogger),
            stats: ConsumerStats::default(),
        }
    }

    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }

    pub fn with_logger(mut self, logger: Box<dyn PipelineLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn stats(&self) -> &ConsumerStats {
        &self.stats
    }

    pub fn run(&mut self, token: &CancellationToken) -> ConsumerStats {
        self.logger.info("started");
        while !token.is_cancelled() {
            self.run_cycle();
        }
        self.logger.info("stopped");
        self.logger.summary();
        self.stats.clone()
    }

    /// Waits for the display, then draws the current snapshot. Returns
    /// whether a draw happened.
    pub fn run_cycle(&mut self) -> bool {
        self.stats.cycles += 1;
        self.logger.count("poll");

        if !self.renderer.wait_frame_ready(self.ready_timeout) {
            self.stats.wait_timeouts += 1;
            return false;
        }

        let started = Instant::now();
        let snapshot = self.store.read();
        let items = OverlayItem::from_snapshot(&snapshot);
        self.renderer.draw(&items);

        self.stats.renders += 1;
        self.stats.last_generation = snapshot.generation();
        self.logger.count("display");
        self.logger
            .timing("render", started.elapsed().as_secs_f64() * 1000.0);
        true
    }
}
