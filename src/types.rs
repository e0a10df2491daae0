//! Core data types shared across the capture engine.

use crate::errors::EngineError;
use crate::metrics::MetricAggregate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw camera frame: row-major pixel buffer with 3 (RGB) or 4 (RGBA)
/// channels per pixel. The 4th channel, when present, is ignored by the
/// metric pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub data: Vec<u8>,
}

impl Frame {
    /// Create a new frame from raw pixel data.
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Convenience constructor for 3-channel RGB data.
    pub fn rgb(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self::new(data, width, height, 3)
    }

    /// Convenience constructor for 4-channel RGBA data.
    pub fn rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self::new(data, width, height, 4)
    }

    /// Expected buffer length for the declared dimensions.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels as usize
    }

    /// Number of pixels in the frame.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check the frame invariant: nonzero dimensions, a supported channel
    /// count, and a buffer length matching width x height x channels.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidFrame(format!(
                "zero dimension: {}x{}",
                self.width, self.height
            )));
        }
        if self.channels != 3 && self.channels != 4 {
            return Err(EngineError::InvalidFrame(format!(
                "unsupported channel count: {}",
                self.channels
            )));
        }
        if self.data.len() != self.expected_len() {
            return Err(EngineError::InvalidFrame(format!(
                "buffer length {}, expected {} for {}x{}x{}",
                self.data.len(),
                self.expected_len(),
                self.width,
                self.height,
                self.channels
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// What caused a capture to fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaptureTrigger {
    /// The decision engine found the scene sharp, framed, and steady.
    Auto { stats: MetricAggregate },
    /// Operator-initiated capture, bypassing the quality gate.
    Manual,
}

/// A discrete capture event emitted by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureEvent {
    /// Monotonically increasing per-session capture number, starting at 1.
    pub sequence: u64,
    /// Wall-clock time the capture fired.
    pub captured_at: DateTime<Utc>,
    pub trigger: CaptureTrigger,
}

/// A capture handed to the downstream collaborator: the triggering frame
/// plus its event metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capture {
    pub frame: Frame,
    pub event: CaptureEvent,
}

/// Result reported back by the external processing collaborator.
///
/// The engine never interprets this beyond logging; a failed upload must
/// not stall or corrupt metric evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProcessingOutcome {
    /// The collaborator produced a processed artifact (e.g., a cropped
    /// document image).
    Success { artifact: Vec<u8> },
    /// The collaborator examined the capture and rejected it.
    Rejected { reason: String },
    /// The collaborator could not be reached.
    TransportFailure { message: String },
}
