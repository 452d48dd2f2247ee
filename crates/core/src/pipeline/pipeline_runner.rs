use std::thread::JoinHandle;
use std::time::Duration;

use thiserror::Error;

use crate::pipeline::cancellation_token::CancellationToken;
use crate::pipeline::emotion_producer::{EmotionProducer, ProducerStats};
use crate::pipeline::overlay_consumer::{ConsumerStats, OverlayConsumer};

const PRODUCER_THREAD_NAME: &str = "emotion-inference";
const CONSUMER_THREAD_NAME: &str = "overlay-display";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        name: &'static str,
        source: std::io::Error,
    },
    #[error("{0} thread panicked")]
    ThreadPanicked(&'static str),
}

/// Final counters of both loops after a clean shutdown.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub producer: ProducerStats,
    pub consumer: ConsumerStats,
}

/// Starts the inference and display loops on their own threads.
pub struct PipelineRunner;

impl PipelineRunner {
    pub fn start(
        mut producer: EmotionProducer,
        mut consumer: OverlayConsumer,
    ) -> Result<RunningPipeline, PipelineError> {
        let inference_stop = CancellationToken::new();
        let display_stop = CancellationToken::new();

        let token = inference_stop.clone();
        let producer_handle = std::thread::Builder::new()
            .name(PRODUCER_THREAD_NAME.into())
            .spawn(move || producer.run(&token))
            .map_err(|source| PipelineError::Spawn {
                name: PRODUCER_THREAD_NAME,
                source,
            })?;

        let token = display_stop.clone();
        let consumer_handle = match std::thread::Builder::new()
            .name(CONSUMER_THREAD_NAME.into())
            .spawn(move || consumer.run(&token))
        {
            Ok(handle) => handle,
            Err(source) => {
                inference_stop.cancel();
                let _ = producer_handle.join();
                return Err(PipelineError::Spawn {
                    name: CONSUMER_THREAD_NAME,
                    source,
                });
            }
        };

        log::info!("pipeline started");
        Ok(RunningPipeline {
            inference_stop,
            display_stop,
            producer_handle,
            consumer_handle,
        })
    }
}

/// Handle to a started pipeline. Dropping it without calling
/// [`RunningPipeline::shutdown`] leaves both threads running detached.
pub struct RunningPipeline {
    inference_stop: CancellationToken,
    display_stop: CancellationToken,
    producer_handle: JoinHandle<ProducerStats>,
    consumer_handle: JoinHandle<ConsumerStats>,
}

impl RunningPipeline {
    /// Stops the display loop first and waits for it, lets `grace` pass,
    /// then stops and joins the inference loop.
    ///
    /// The producer is always joined, even when the consumer panicked; the
    /// first panic is reported.
    pub fn shutdown(self, grace: Duration) -> Result<PipelineReport, PipelineError> {
        let mut first_error: Option<PipelineError> = None;

        self.display_stop.cancel();
        let consumer = match self.consumer_handle.join() {
            Ok(stats) => stats,
            Err(_) => {
                set_if_none(
                    &mut first_error,
                    PipelineError::ThreadPanicked(CONSUMER_THREAD_NAME),
                );
                ConsumerStats::default()
            }
        };
        log::debug!("display loop joined");

        std::thread::sleep(grace);

        self.inference_stop.cancel();
        let producer = match self.producer_handle.join() {
            Ok(stats) => stats,
            Err(_) => {
                set_if_none(
                    &mut first_error,
                    PipelineError::ThreadPanicked(PRODUCER_THREAD_NAME),
                );
                ProducerStats::default()
            }
        };
        log::debug!("inference loop joined");

        match first_error {
            Some(e) => Err(e),
            None => {
                log::info!("pipeline stopped");
                Ok(PipelineReport { producer, consumer })
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.producer_handle.is_finished() && self.consumer_handle.is_finished()
    }
}

fn set_if_none(slot: &mut Option<PipelineError>, error: PipelineError) {
    if slot.is_none() {
        *slot = Some(error);
    }
}
