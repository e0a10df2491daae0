//! Capture decision state machine
//!
//! Turns the metric window's aggregate statistics plus a cooldown timer
//! into a single discrete capture trigger. One evaluation per incoming
//! sample; at most one `Ready` per eligible tick, after which the window
//! is emptied so the same stabilized scene cannot immediately re-trigger.

use crate::config::{EngineConfig, QualityConfig};
use crate::metrics::{MetricAggregate, MetricSampleBuffer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Where the machine currently is in the capture cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPhase {
    /// Auto-capture is disabled; samples are still accepted so the
    /// window stays warm.
    Idle,
    /// The window is below capacity and still accumulating.
    Analyzing,
    /// The window is full; the quality check runs every tick.
    Evaluating,
    /// Quality passed but the cooldown window has not elapsed.
    CooldownWait,
    /// All conditions hold: a capture fires this tick.
    Ready,
}

/// Cooldown bookkeeping for one capture session.
#[derive(Debug, Clone)]
pub struct CaptureDecisionState {
    pub last_capture_at: Option<Instant>,
    pub cooldown: Duration,
    pub auto_capture_enabled: bool,
}

/// Per-tick diagnostic summary: which sub-conditions hold, and the
/// aggregate they were computed from. Consumed by a presentation layer
/// for operator feedback; correctness only needs `phase`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionStatus {
    pub phase: DecisionPhase,
    pub is_sharp: bool,
    pub is_edge_ok: bool,
    pub is_steady: bool,
    pub can_capture: bool,
    /// Variance bound steadiness is checked against
    /// (`stability_factor * sharpness_threshold`).
    pub steady_limit: f64,
    /// Samples currently held / window capacity.
    pub samples: usize,
    pub window: usize,
    pub aggregate: Option<MetricAggregate>,
}

impl DecisionStatus {
    fn mark(ok: bool) -> &'static str {
        if ok {
            "ok"
        } else {
            "fail"
        }
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.aggregate, self.phase) {
            (_, DecisionPhase::Idle) => write!(f, "idle: auto-capture disabled"),
            (None, _) | (_, DecisionPhase::Analyzing) => {
                write!(f, "analyzing frames ({}/{})", self.samples, self.window)
            }
            (Some(agg), phase) => write!(
                f,
                "{} [sharp:{} edge:{} steady:{} cooldown:{}] S:{:.0} V:{:.1}(<{:.1}) E:{:.1}",
                match phase {
                    DecisionPhase::Ready => "ready",
                    DecisionPhase::CooldownWait => "cooldown",
                    _ => "evaluating",
                },
                Self::mark(self.is_sharp),
                Self::mark(self.is_edge_ok),
                Self::mark(self.is_steady),
                if self.can_capture { "ready" } else { "waiting" },
                agg.mean_sharpness,
                agg.variance_sharpness,
                self.steady_limit,
                agg.mean_edge_density,
            ),
        }
    }
}

/// The stateful decision engine for one capture session.
///
/// Owns the cooldown state; the metric window is owned by the caller and
/// passed in by reference, and is reset here as a side effect of a
/// trigger.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    quality: QualityConfig,
    window: usize,
    state: CaptureDecisionState,
}

impl DecisionEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            quality: config.quality.clone(),
            window: config.session.buffer_size,
            state: CaptureDecisionState {
                last_capture_at: None,
                cooldown: config.session.cooldown(),
                auto_capture_enabled: false,
            },
        }
    }

    /// Toggle auto-capture mid-stream. While disabled the engine still
    /// accepts samples but never reaches `Ready`; re-enabling
    /// re-evaluates as soon as the window is next full.
    pub fn set_auto_capture(&mut self, enabled: bool) {
        if self.state.auto_capture_enabled != enabled {
            log::info!("Auto-capture {}", if enabled { "enabled" } else { "disabled" });
        }
        self.state.auto_capture_enabled = enabled;
    }

    pub fn auto_capture_enabled(&self) -> bool {
        self.state.auto_capture_enabled
    }

    pub fn state(&self) -> &CaptureDecisionState {
        &self.state
    }

    /// Variance bound the steadiness check uses.
    pub fn steady_limit(&self) -> f64 {
        self.quality.stability_factor * self.quality.sharpness_threshold
    }

    /// Run one evaluation against the current window contents.
    ///
    /// Returns `Ready` at most once per call; on a trigger the window is
    /// reset and `last_capture_at` is set to `now`.
    pub fn evaluate(&mut self, buffer: &mut MetricSampleBuffer, now: Instant) -> DecisionStatus {
        let aggregate = buffer.aggregate();
        let steady_limit = self.steady_limit();

        let (is_sharp, is_edge_ok, is_steady) = match &aggregate {
            Some(agg) => (
                agg.mean_sharpness > self.quality.sharpness_threshold,
                agg.mean_edge_density > self.quality.min_edge_density
                    && agg.mean_edge_density < self.quality.max_edge_density,
                agg.variance_sharpness < steady_limit,
            ),
            None => (false, false, false),
        };

        let can_capture = self
            .state
            .last_capture_at
            .map_or(true, |t| now.duration_since(t) > self.state.cooldown);

        let phase = if !self.state.auto_capture_enabled {
            DecisionPhase::Idle
        } else if !buffer.is_full() {
            DecisionPhase::Analyzing
        } else if is_sharp && is_edge_ok && is_steady {
            if can_capture {
                DecisionPhase::Ready
            } else {
                DecisionPhase::CooldownWait
            }
        } else {
            DecisionPhase::Evaluating
        };

        let status = DecisionStatus {
            phase,
            is_sharp,
            is_edge_ok,
            is_steady,
            can_capture,
            steady_limit,
            samples: buffer.len(),
            window: self.window,
            aggregate,
        };

        if phase == DecisionPhase::Ready {
            self.state.last_capture_at = Some(now);
            buffer.reset();
            log::info!("Capture trigger: {}", status);
        } else {
            log::debug!("Tick status: {}", status);
        }

        status
    }
}
