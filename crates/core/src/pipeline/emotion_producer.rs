use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::detection::domain::detection::Detection;
use crate::detection::domain::face_detector::FaceDetector;
use crate::emotion::domain::emotion_cache::EmotionCache;
use crate::emotion::domain::emotion_classifier::EmotionClassifier;
use crate::emotion::domain::emotion_result::EmotionLabel;
use crate::emotion::domain::inference_throttle::InferenceThrottle;
use crate::notification::domain::cooldown_gate::CooldownGate;
use crate::notification::domain::label_translations::WakeUpComposer;
use crate::notification::domain::notification_transport::NotificationTransport;
use crate::pipeline::cancellation_token::CancellationToken;
use crate::pipeline::combined_frame_result::{CombinedFrameResult, FaceEmotion};
use crate::pipeline::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use crate::pipeline::shared_result_store::SharedResultStore;
use crate::shared::frame::Frame;
use crate::shared::settings::PipelineSettings;
use crate::video::domain::frame_source::{AcquireError, FrameSource};

/// Timing and phrasing knobs for the producer loop.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    pub inference_interval: Duration,
    pub cooldown: Duration,
    pub acquire_timeout: Duration,
    pub composer: WakeUpComposer,
}

impl ProducerConfig {
    pub fn from_settings(settings: &PipelineSettings) -> Self {
        Self {
            inference_interval: settings.inference_interval(),
            cooldown: settings.cooldown(),
            acquire_timeout: settings.acquire_timeout(),
            composer: WakeUpComposer::for_locale(settings.locale),
        }
    }
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self::from_settings(&PipelineSettings::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Timeout,
    Device,
}

/// What one producer cycle did.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// No frame was acquired; nothing was published or released.
    Skipped(SkipReason),
    Published(CycleReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub generation: u64,
    pub faces: usize,
    /// The classifier ran for every face this cycle.
    pub fresh: bool,
    /// Detection or classification failed and an empty result was published.
    pub degraded: bool,
    /// Label that won the cooldown gate, if any.
    pub triggered: Option<EmotionLabel>,
    /// The wake-up event for `triggered` reached the transport.
    pub notified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducerStats {
    pub cycles: u64,
    pub timeouts: u64,
    pub device_errors: u64,
    pub degraded_cycles: u64,
    pub fresh_passes: u64,
    pub triggers: u64,
    pub notifications_sent: u64,
    pub transport_failures: u64,
}

/// Capture-side loop: detect every frame, classify emotions at a throttled
/// cadence, gate wake-ups, and publish results for the renderer.
///
/// Per cycle: acquire → detect → classify or reuse cache → gate → publish →
/// notify. Cache, throttle and gate state belong to this loop alone; the
/// result store is the only thing shared with the renderer. Notifications
/// are sent after publishing and never under the store lock.
pub struct EmotionProducer {
    source: Box<dyn FrameSource>,
    detector: Box<dyn FaceDetector>,
    classifier: Box<dyn EmotionClassifier>,
    transport: Box<dyn NotificationTransport>,
    store: Arc<SharedResultStore>,
    throttle: InferenceThrottle,
    cache: EmotionCache,
    gate: CooldownGate,
    composer: WakeUpComposer,
    acquire_timeout: Duration,
    logger: Box<dyn PipelineLogger>,
    stats: ProducerStats,
}

impl EmotionProducer {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn FaceDetector>,
        classifier: Box<dyn EmotionClassifier>,
        transport: Box<dyn NotificationTransport>,
        store: Arc<SharedResultStore>,
        config: ProducerConfig,
    ) -> Self {
        Self {
            source,
            detector,
            classifier,
            transport,
            store,
            throttle: InferenceThrottle::new(config.inference_interval),
            cache: EmotionCache::new(),
            gate: CooldownGate::new(config.cooldown),
            composer: config.composer,
            acquire_timeout: config.acquire_timeout,
            logger: Box::new(NullPipelineLogger),
            stats: ProducerStats::default(),
        }
    }

    pub fn with_logger(mut self, logger: Box<dyn PipelineLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn stats(&self) -> &ProducerStats {
        &self.stats
    }

    /// Runs cycles until `token` is cancelled. The check happens between
    /// cycles, so a cycle that has started always completes.
    ///
    /// A device fault returns without blocking, so the loop waits one
    /// acquire timeout before retrying a faulted source.
    pub fn run(&mut self, token: &CancellationToken) -> ProducerStats {
        self.logger.info("started");
        while !token.is_cancelled() {
            if let CycleOutcome::Skipped(SkipReason::Device) = self.run_cycle(Instant::now()) {
                std::thread::sleep(self.acquire_timeout);
            }
        }
        self.logger.info("stopped");
        self.logger.summary();
        self.stats.clone()
    }

    /// One full cycle. `now` drives both the throttle and the cooldown gate.
    pub fn run_cycle(&mut self, now: Instant) -> CycleOutcome {
        self.stats.cycles += 1;
        let run_fresh = self.throttle.should_run_inference(now);

        let frame = match self.source.acquire(self.acquire_timeout) {
            Ok(frame) => frame,
            Err(AcquireError::Timeout(waited)) => {
                self.stats.timeouts += 1;
                log::warn!("No frame within {waited:?}, retrying");
                return CycleOutcome::Skipped(SkipReason::Timeout);
            }
            Err(e) => {
                self.stats.device_errors += 1;
                log::warn!("Frame acquisition failed: {e}");
                return CycleOutcome::Skipped(SkipReason::Device);
            }
        };
        self.logger.count("camera");

        let analysed = self.analyse(&frame, run_fresh);
        let sequence = frame.sequence();
        self.source.release(frame);

        let (pairs, degraded) = match analysed {
            Ok(pairs) => (pairs, false),
            Err(e) => {
                self.stats.degraded_cycles += 1;
                log::warn!("Frame {sequence}: analysis failed, publishing no faces: {e}");
                (Vec::new(), true)
            }
        };

        let classified = run_fresh && !degraded && !pairs.is_empty();
        if classified {
            self.throttle.mark_inference(now);
            self.stats.fresh_passes += 1;
            self.logger.count("inference");
        }

        // Reused results never originate a trigger.
        let triggered = if classified {
            self.gate
                .try_trigger_first(now, pairs.iter().map(|p| p.emotion.label))
                .map(|i| pairs[i].emotion.label)
        } else {
            None
        };

        let faces = pairs.len();
        let generation = self.store.publish(CombinedFrameResult::new(pairs));

        let notified = match triggered {
            Some(label) => {
                self.stats.triggers += 1;
                self.notify(label)
            }
            None => false,
        };

        CycleOutcome::Published(CycleReport {
            generation,
            faces,
            fresh: classified,
            degraded,
            triggered,
            notified,
        })
    }

    fn analyse(
        &mut self,
        frame: &Frame,
        run_fresh: bool,
    ) -> Result<Vec<FaceEmotion>, Box<dyn std::error::Error>> {
        let started = Instant::now();
        let mut detections = self.detector.detect(frame)?;
        Detection::reindex(&mut detections);
        self.logger.timing("detect", elapsed_ms(started));
        self.logger.metric("faces", detections.len() as f64);

        self.cache.begin_frame(run_fresh);

        let mut pairs = Vec::with_capacity(detections.len());
        for (slot, detection) in detections.into_iter().enumerate() {
            let emotion = if run_fresh {
                let started = Instant::now();
                let result = self.classifier.classify(frame, &detection.landmarks)?;
                self.logger.timing("classify", elapsed_ms(started));
                if let Err(e) = self.cache.set(slot, result) {
                    debug_assert!(false, "{e}");
                    log::error!("Emotion cache rejected result: {e}");
                }
                result
            } else {
                self.cache.get_or_default(slot)
            };
            pairs.push(FaceEmotion { detection, emotion });
        }
        Ok(pairs)
    }

    fn notify(&mut self, label: EmotionLabel) -> bool {
        let event = self.composer.compose(label);
        match self.transport.emit(&event) {
            Ok(()) => {
                self.stats.notifications_sent += 1;
                self.logger.count("notifications");
                log::info!("Wake-up sent for {label}: {}", event.text);
                true
            }
            Err(e) => {
                self.stats.transport_failures += 1;
                log::warn!("Wake-up for {label} not delivered: {e}");
                false
            }
        }
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
