//! Capture session orchestration
//!
//! A session owns the full per-tick pipeline: pull the newest frame,
//! reduce it to metrics, feed the decision engine, and hand any capture
//! to the downstream collaborator without ever blocking the tick
//! cadence. The metric window and decision state are owned by the
//! session task alone; nothing else mutates them.

use crate::config::EngineConfig;
use crate::decision::{DecisionEngine, DecisionPhase, DecisionStatus};
use crate::errors::EngineError;
use crate::imaging::{edge_density_percent, gradient_magnitude, sharpness_score, IntensityMap};
use crate::metrics::{MetricSample, MetricSampleBuffer};
use crate::types::{Capture, CaptureEvent, CaptureTrigger, Frame, ProcessingOutcome};
use chrono::Utc;
use std::collections::VecDeque;
use std::time::Instant;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// How many capture events' metadata the session retains.
const HISTORY_LIMIT: usize = 5;

/// Supplies frames to the tick loop.
///
/// `latest_frame` returns the most recent available frame, or `None`
/// when the device has nothing yet (still initializing, between frames);
/// the tick is then skipped without touching any state.
pub trait FrameSource: Send + 'static {
    fn latest_frame(&mut self) -> Option<Frame>;
}

/// Result of processing one frame through the pipeline.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub status: DecisionStatus,
    /// Present only on a `Ready` tick.
    pub capture: Option<Capture>,
}

/// The synchronous per-frame pipeline: grayscale, metrics, decision,
/// capture-event bookkeeping. Drives one capture session; the async
/// loop in [`Session`] is a thin timer around it.
#[derive(Debug)]
pub struct CapturePipeline {
    edge_magnitude_threshold: f32,
    buffer: MetricSampleBuffer,
    engine: DecisionEngine,
    next_sequence: u64,
    history: VecDeque<CaptureEvent>,
}

impl CapturePipeline {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            edge_magnitude_threshold: config.quality.edge_magnitude_threshold,
            buffer: MetricSampleBuffer::new(config.session.buffer_size),
            engine: DecisionEngine::new(config),
            next_sequence: 1,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    /// Run one tick: compute the frame's metrics, push the sample, and
    /// evaluate the capture decision.
    ///
    /// An invalid frame fails before any sample is recorded, so a
    /// skipped tick leaves the window and decision state untouched.
    pub fn process_frame(&mut self, frame: &Frame, now: Instant) -> Result<TickReport, EngineError> {
        let map = IntensityMap::from_frame(frame)?;

        let sharpness = sharpness_score(&map);
        let gradients = gradient_magnitude(&map);
        let edge_density = edge_density_percent(&gradients, self.edge_magnitude_threshold);

        self.buffer
            .push(MetricSample::new(sharpness, edge_density, now));
        let status = self.engine.evaluate(&mut self.buffer, now);

        let capture = if status.phase == DecisionPhase::Ready {
            status
                .aggregate
                .map(|stats| self.record_capture(frame.clone(), CaptureTrigger::Auto { stats }))
        } else {
            None
        };

        Ok(TickReport { status, capture })
    }

    /// Operator-initiated capture, bypassing the quality gate.
    ///
    /// Leaves the metric window and the auto-capture cooldown untouched;
    /// the cooldown constrains auto-capture only.
    pub fn manual_capture(&mut self, frame: Frame) -> Capture {
        log::info!("Manual capture requested");
        self.record_capture(frame, CaptureTrigger::Manual)
    }

    fn record_capture(&mut self, frame: Frame, trigger: CaptureTrigger) -> Capture {
        let event = CaptureEvent {
            sequence: self.next_sequence,
            captured_at: Utc::now(),
            trigger,
        };
        self.next_sequence += 1;

        if self.history.len() >= HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(event.clone());

        Capture { frame, event }
    }

    pub fn set_auto_capture(&mut self, enabled: bool) {
        self.engine.set_auto_capture(enabled);
    }

    pub fn auto_capture_enabled(&self) -> bool {
        self.engine.auto_capture_enabled()
    }

    /// Metadata of the most recent captures, oldest first (bounded).
    pub fn history(&self) -> impl Iterator<Item = &CaptureEvent> {
        self.history.iter()
    }

    /// Total captures fired this session.
    pub fn capture_count(&self) -> u64 {
        self.next_sequence - 1
    }
}

enum Command {
    SetAutoCapture(bool),
    CaptureNow,
    Stop,
}

/// Handle to a running capture session.
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<Option<DecisionStatus>>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Enable or disable auto-capture mid-stream.
    pub fn set_auto_capture(&self, enabled: bool) {
        let _ = self.commands.send(Command::SetAutoCapture(enabled));
    }

    /// Request an operator capture of the latest frame.
    pub fn capture_now(&self) {
        let _ = self.commands.send(Command::CaptureNow);
    }

    /// Watch channel carrying the latest per-tick diagnostic status.
    pub fn status(&self) -> watch::Receiver<Option<DecisionStatus>> {
        self.status.clone()
    }

    /// Stop the tick loop and wait for the session task to finish.
    ///
    /// In-flight downstream work is not cancelled; its results are
    /// simply ignored once the session has ended.
    pub async fn stop(self) {
        let _ = self.commands.send(Command::Stop);
        let _ = self.task.await;
    }
}

/// A timer-driven capture session.
pub struct Session;

impl Session {
    /// Validate the configuration and spawn the tick loop.
    ///
    /// Captures are handed off through `captures`; the send is
    /// non-blocking so a slow consumer can never stall metric
    /// evaluation. Dropped captures are logged and evaluation continues.
    pub fn spawn<S: FrameSource>(
        config: EngineConfig,
        source: S,
        captures: mpsc::Sender<Capture>,
    ) -> Result<SessionHandle, EngineError> {
        config.validate()?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(None);

        let task = tokio::spawn(run_loop(config, source, captures, command_rx, status_tx));

        Ok(SessionHandle {
            commands: command_tx,
            status: status_rx,
            task,
        })
    }
}

async fn run_loop<S: FrameSource>(
    config: EngineConfig,
    mut source: S,
    captures: mpsc::Sender<Capture>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    status_tx: watch::Sender<Option<DecisionStatus>>,
) {
    let mut pipeline = CapturePipeline::new(&config);
    let mut interval = tokio::time::interval(config.session.frame_interval());
    // Serialized ticks: a late tick is skipped, never run back-to-back.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    log::info!(
        "Capture session started: interval {}ms, window {}, cooldown {}ms",
        config.session.frame_interval_ms,
        config.session.buffer_size,
        config.session.cooldown_ms
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let Some(frame) = source.latest_frame() else {
                    log::debug!("Tick skipped: frame source not ready");
                    continue;
                };
                match pipeline.process_frame(&frame, Instant::now()) {
                    Ok(report) => {
                        let _ = status_tx.send(Some(report.status));
                        if let Some(capture) = report.capture {
                            dispatch(&captures, capture);
                        }
                    }
                    Err(e) => log::warn!("Tick skipped: {}", e),
                }
            }
            cmd = commands.recv() => match cmd {
                Some(Command::SetAutoCapture(enabled)) => pipeline.set_auto_capture(enabled),
                Some(Command::CaptureNow) => {
                    match source.latest_frame() {
                        Some(frame) => {
                            let capture = pipeline.manual_capture(frame);
                            dispatch(&captures, capture);
                        }
                        None => log::warn!("Manual capture skipped: {}", EngineError::NotReady),
                    }
                }
                Some(Command::Stop) | None => break,
            }
        }
    }

    log::info!(
        "Capture session stopped after {} captures",
        pipeline.capture_count()
    );
}

/// Non-blocking capture handoff; the tick loop never waits on the
/// downstream collaborator.
fn dispatch(captures: &mpsc::Sender<Capture>, capture: Capture) {
    let sequence = capture.event.sequence;
    match captures.try_send(capture) {
        Ok(()) => log::debug!("Capture {} dispatched", sequence),
        Err(e) => log::warn!("Capture {} dropped: {}", sequence, e),
    }
}

/// Record the external collaborator's verdict on a capture.
///
/// The engine never acts on the outcome; a downstream failure must not
/// perturb subsequent evaluation.
pub fn report_outcome(sequence: u64, outcome: &ProcessingOutcome) {
    match outcome {
        ProcessingOutcome::Success { artifact } => {
            log::info!(
                "Capture {} processed: {} byte artifact",
                sequence,
                artifact.len()
            );
        }
        ProcessingOutcome::Rejected { reason } => {
            log::warn!("Capture {} rejected: {}", sequence, reason);
        }
        ProcessingOutcome::TransportFailure { message } => {
            log::warn!("Capture {} transport failure: {}", sequence, message);
        }
    }
}
