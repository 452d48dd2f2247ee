use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// Cross-cutting logger for loop-level events.
///
/// Each loop owns its own logger, so implementations need no locking.
pub trait PipelineLogger: Send {
    /// Record how long a named stage took in one cycle.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. face count).
    fn metric(&mut self, name: &str, value: f64);

    /// Count one occurrence of an event, reported as a per-second rate.
    fn count(&mut self, event: &str);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn count(&mut self, _event: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// Running aggregate of one timing stage or metric.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleStats {
    pub count: u64,
    pub sum: f64,
    pub max: f64,
}

impl SampleStats {
    fn record(&mut self, value: f64) {
        if self.count == 0 || value > self.max {
            self.max = value;
        }
        self.count += 1;
        self.sum += value;
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count.max(1) as f64
    }
}

/// Logger backed by the `log` crate.
///
/// Event counts are turned into rates and logged once per `report_every`
/// (e.g. `camera: 30.0/s, inference: 1.0/s`). Timings and metrics are
/// folded into per-key aggregates for the summary, so state stays bounded
/// however long the loop runs.
pub struct LogPipelineLogger {
    name: String,
    report_every: Duration,
    timings: HashMap<String, SampleStats>,
    metrics: HashMap<String, SampleStats>,
    totals: BTreeMap<String, u64>,
    window: BTreeMap<String, u64>,
    window_start: Instant,
    start_time: Instant,
}

impl LogPipelineLogger {
    pub fn new(name: &str, report_every: Duration) -> Self {
        let now = Instant::now();
        Self {
            name: name.to_string(),
            report_every,
            timings: HashMap::new(),
            metrics: HashMap::new(),
            totals: BTreeMap::new(),
            window: BTreeMap::new(),
            window_start: now,
            start_time: now,
        }
    }

    /// Counts `event` as if it happened at `now`, flushing the rate window
    /// when it has run for `report_every`. Returns the rate line if one was
    /// produced.
    pub fn count_at(&mut self, event: &str, now: Instant) -> Option<String> {
        *self.totals.entry(event.to_string()).or_default() += 1;
        *self.window.entry(event.to_string()).or_default() += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.report_every {
            return None;
        }
        let line = self.rates_line(elapsed);
        self.window.clear();
        self.window_start = now;
        log::info!("{line}");
        Some(line)
    }

    fn rates_line(&self, elapsed: Duration) -> String {
        let secs = elapsed.as_secs_f64().max(f64::EPSILON);
        let rates: Vec<String> = self
            .window
            .iter()
            .map(|(event, n)| format!("{event}: {:.1}/s", *n as f64 / secs))
            .collect();
        format!("{} rates: {}", self.name, rates.join(", "))
    }

    pub fn total(&self, event: &str) -> u64 {
        self.totals.get(event).copied().unwrap_or(0)
    }

    pub fn timings_for(&self, stage: &str) -> Option<SampleStats> {
        self.timings.get(stage).copied()
    }

    pub fn metrics_for(&self, name: &str) -> Option<SampleStats> {
        self.metrics.get(name).copied()
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() && self.totals.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!("{} summary ({elapsed_s:.1}s):", self.name)];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let stats = &self.timings[stage];
            lines.push(format!(
                "  {stage:12}: avg {:6.1}ms  max {:6.1}ms  total {:7.0}ms",
                stats.mean(),
                stats.max,
                stats.sum
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let stats = &self.metrics[name];
            lines.push(format!("  {name}: avg {:.1}  max {:.1}", stats.mean(), stats.max));
        }

        for (event, n) in &self.totals {
            lines.push(format!("  {event}: {n} total"));
        }

        Some(lines.join("\n"))
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .record(value);
    }

    fn count(&mut self, event: &str) {
        self.count_at(event, Instant::now());
    }

    fn info(&mut self, message: &str) {
        log::info!("{}: {message}", self.name);
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
