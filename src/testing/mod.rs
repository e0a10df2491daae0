//! Synthetic frame generators for offline testing
//!
//! Deterministic pixel patterns with known metric behavior, so the
//! pipeline and decision logic can be exercised without camera hardware.

use crate::session::FrameSource;
use crate::types::Frame;

/// A solid frame of one gray level. No interior edges; only the
/// zero-padded border produces any gradient response.
pub fn uniform_frame(width: u32, height: u32, level: u8) -> Frame {
    Frame::rgb(vec![level; (width * height * 3) as usize], width, height)
}

/// Alternating black/white cells of `cell_size` pixels. Maximum local
/// contrast; high sharpness and edge density.
pub fn checkerboard_frame(width: u32, height: u32, cell_size: u32) -> Frame {
    let cell = cell_size.max(1);
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let white = ((x / cell) + (y / cell)) % 2 == 0;
            let level = if white { 255 } else { 0 };
            data.extend_from_slice(&[level, level, level]);
        }
    }
    Frame::rgb(data, width, height)
}

/// Horizontal left-to-right luminance ramp. Smooth; low sharpness.
pub fn gradient_frame(width: u32, height: u32) -> Frame {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..height {
        for x in 0..width {
            let level = (x * 255 / width.max(1)) as u8;
            data.extend_from_slice(&[level, level, level]);
        }
    }
    Frame::rgb(data, width, height)
}

/// A bright background with a centered darker rectangle, shaped like a
/// document held inside an alignment guide. Moderate edge density and
/// high sharpness; passes the default quality gates when held steady.
pub fn document_frame(width: u32, height: u32) -> Frame {
    let (x0, x1) = (width * 3 / 16, width * 13 / 16);
    let (y0, y1) = (height * 5 / 16, height * 11 / 16);
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let inside = x >= x0 && x < x1 && y >= y0 && y < y1;
            let level = if inside { 80 } else { 255 };
            data.extend_from_slice(&[level, level, level]);
        }
    }
    Frame::rgb(data, width, height)
}

/// A frame source that replays a fixed script of frames, then reports
/// not-ready forever. `None` entries simulate a device with nothing to
/// offer on that tick.
pub struct ScriptedSource {
    frames: std::collections::VecDeque<Option<Frame>>,
}

impl ScriptedSource {
    pub fn new(frames: Vec<Option<Frame>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// Script that serves the same frame `count` times.
    pub fn repeating(frame: Frame, count: usize) -> Self {
        Self::new(vec![Some(frame); count])
    }
}

impl FrameSource for ScriptedSource {
    fn latest_frame(&mut self) -> Option<Frame> {
        self.frames.pop_front().flatten()
    }
}

/// A frame source that always returns the same frame.
pub struct SteadySource {
    frame: Frame,
}

impl SteadySource {
    pub fn new(frame: Frame) -> Self {
        Self { frame }
    }
}

impl FrameSource for SteadySource {
    fn latest_frame(&mut self) -> Option<Frame> {
        Some(self.frame.clone())
    }
}
