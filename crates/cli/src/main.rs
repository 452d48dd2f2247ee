use std::io::BufRead;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use crossbeam_channel::{Receiver, RecvTimeoutError};

use emotion_watch_core::detection::infrastructure::scripted_face_detector::ScriptedFaceDetector;
use emotion_watch_core::emotion::infrastructure::scripted_emotion_classifier::ScriptedEmotionClassifier;
use emotion_watch_core::notification::domain::label_translations::Locale;
use emotion_watch_core::notification::domain::notification_transport::NotificationTransport;
use emotion_watch_core::notification::infrastructure::log_notification_transport::LogNotificationTransport;
use emotion_watch_core::notification::infrastructure::udp_notification_transport::UdpNotificationTransport;
use emotion_watch_core::pipeline::emotion_producer::{EmotionProducer, ProducerConfig};
use emotion_watch_core::pipeline::overlay_consumer::OverlayConsumer;
use emotion_watch_core::pipeline::pipeline_logger::LogPipelineLogger;
use emotion_watch_core::pipeline::pipeline_runner::PipelineRunner;
use emotion_watch_core::pipeline::shared_result_store::SharedResultStore;
use emotion_watch_core::rendering::infrastructure::log_overlay_renderer::LogOverlayRenderer;
use emotion_watch_core::shared::scenario::Scenario;
use emotion_watch_core::shared::settings::PipelineSettings;
use emotion_watch_core::video::infrastructure::synthetic_frame_source::SyntheticFrameSource;

const RATE_REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Live facial-emotion pipeline driven by a scripted camera scenario.
#[derive(Parser)]
#[command(name = "emotion-watch")]
struct Cli {
    /// Scenario JSON describing the faces the simulated camera sees.
    #[arg(long)]
    scenario: PathBuf,

    /// Settings file (defaults to the per-user config location).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Camera frame rate.
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Display refresh rate.
    #[arg(long, default_value = "30")]
    display_fps: u32,

    /// Stop after this many seconds instead of waiting for 'q'.
    #[arg(long)]
    duration_secs: Option<u64>,

    /// UDP host:port of the wake-up listener. Events are only logged if unset.
    #[arg(long)]
    notify_addr: Option<String>,

    /// Wake-up text language: zh or en.
    #[arg(long)]
    locale: Option<Locale>,

    /// Minimum time between emotion classification passes.
    #[arg(long)]
    inference_interval_ms: Option<u64>,

    /// Minimum time between two wake-up notifications.
    #[arg(long)]
    cooldown_ms: Option<u64>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    let scenario = Arc::new(Scenario::load(&cli.scenario)?);
    log::info!(
        "scenario {}: {} steps, {} frames per loop",
        cli.scenario.display(),
        scenario.steps.len(),
        scenario.cycle_frames()
    );

    let store = Arc::new(SharedResultStore::new());
    let source =
        SyntheticFrameSource::new(scenario.frame_width, scenario.frame_height, cli.fps)?;
    let producer = EmotionProducer::new(
        Box::new(source),
        Box::new(ScriptedFaceDetector::new(scenario.clone())),
        Box::new(ScriptedEmotionClassifier::new(scenario)),
        build_transport(settings.notify_addr.as_deref())?,
        store.clone(),
        ProducerConfig::from_settings(&settings),
    )
    .with_logger(Box::new(LogPipelineLogger::new(
        "producer",
        RATE_REPORT_INTERVAL,
    )));
    let consumer = OverlayConsumer::new(Box::new(LogOverlayRenderer::new(cli.display_fps)?), store)
        .with_ready_timeout(settings.display_timeout())
        .with_logger(Box::new(LogPipelineLogger::new(
            "consumer",
            RATE_REPORT_INTERVAL,
        )));

    let running = PipelineRunner::start(producer, consumer)?;
    wait_for_stop(cli.duration_secs.map(Duration::from_secs));
    let report = running.shutdown(settings.shutdown_grace())?;

    log::info!("producer: {:?}", report.producer);
    log::info!("consumer: {:?}", report.consumer);
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<PipelineSettings, Box<dyn std::error::Error>> {
    let mut settings = match cli.config.clone().or_else(PipelineSettings::default_path) {
        Some(path) => {
            log::debug!("settings from {}", path.display());
            PipelineSettings::load_or_default(&path)?
        }
        None => PipelineSettings::default(),
    };

    if let Some(ms) = cli.inference_interval_ms {
        settings.inference_interval_ms = ms;
    }
    if let Some(ms) = cli.cooldown_ms {
        settings.cooldown_ms = ms;
    }
    if let Some(locale) = cli.locale {
        settings.locale = locale;
    }
    if let Some(addr) = &cli.notify_addr {
        settings.notify_addr = Some(addr.clone());
    }
    settings.validate()?;
    Ok(settings)
}

fn build_transport(
    addr: Option<&str>,
) -> Result<Box<dyn NotificationTransport>, Box<dyn std::error::Error>> {
    match addr {
        Some(addr) => {
            log::info!("sending wake-up events to {addr}");
            Ok(Box::new(UdpNotificationTransport::connect(addr)?))
        }
        None => Ok(Box::new(LogNotificationTransport::new())),
    }
}

/// Blocks until 'q' is read from stdin or `limit` passes. Without a limit,
/// closing stdin also stops the run.
fn wait_for_stop(limit: Option<Duration>) {
    let quit = spawn_stdin_watcher();
    match limit {
        Some(limit) => {
            let deadline = Instant::now() + limit;
            match quit.recv_deadline(deadline) {
                Ok(()) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    log::info!("run time elapsed");
                }
                Err(RecvTimeoutError::Timeout) => log::info!("run time elapsed"),
            }
        }
        None => {
            eprintln!("Press 'q' then Enter to stop");
            let _ = quit.recv();
        }
    }
}

/// The sender is dropped without sending when stdin reaches EOF.
fn spawn_stdin_watcher() -> Receiver<()> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim().eq_ignore_ascii_case("q") => {
                    let _ = tx.send(());
                    return;
                }
                Ok(_) => continue,
                Err(_) => return,
            }
        }
    });
    rx
}
