//! Temporal metric window
//!
//! A bounded FIFO of recent per-frame metric samples plus the aggregate
//! statistics the capture decision runs on. The buffer is purely
//! in-memory bookkeeping: push and evict are O(1), and the aggregate is
//! recomputed from scratch over the (small, fixed) window each time,
//! which is simpler than incremental update and cheap at N = 5.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Instant;

/// One frame's quality metrics. Immutable once pushed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    /// Laplacian-variance sharpness score.
    pub sharpness: f64,
    /// Percentage of pixels above the edge magnitude threshold.
    pub edge_density_percent: f64,
    pub captured_at: Instant,
}

impl MetricSample {
    pub fn new(sharpness: f64, edge_density_percent: f64, captured_at: Instant) -> Self {
        Self {
            sharpness,
            edge_density_percent,
            captured_at,
        }
    }
}

/// Population statistics over the buffer's current contents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricAggregate {
    pub mean_sharpness: f64,
    pub variance_sharpness: f64,
    pub mean_edge_density: f64,
    pub sample_count: usize,
}

/// Fixed-capacity FIFO of metric samples.
///
/// The oldest sample is evicted when a push exceeds capacity; order is
/// strict arrival order. A successful capture trigger empties the buffer
/// so the next tick starts a fresh analysis window.
#[derive(Debug, Clone)]
pub struct MetricSampleBuffer {
    samples: VecDeque<MetricSample>,
    capacity: usize,
}

impl MetricSampleBuffer {
    /// Create a buffer holding at most `capacity` samples (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest if the buffer is full.
    pub fn push(&mut self, sample: MetricSample) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Compute population statistics over the current contents.
    ///
    /// Returns `None` on an empty buffer rather than dividing by zero.
    pub fn aggregate(&self) -> Option<MetricAggregate> {
        if self.samples.is_empty() {
            return None;
        }

        let n = self.samples.len() as f64;
        let mean_sharpness = self.samples.iter().map(|s| s.sharpness).sum::<f64>() / n;
        let variance_sharpness = self
            .samples
            .iter()
            .map(|s| {
                let d = s.sharpness - mean_sharpness;
                d * d
            })
            .sum::<f64>()
            / n;
        let mean_edge_density = self
            .samples
            .iter()
            .map(|s| s.edge_density_percent)
            .sum::<f64>()
            / n;

        Some(MetricAggregate {
            mean_sharpness,
            variance_sharpness,
            mean_edge_density,
            sample_count: self.samples.len(),
        })
    }

    /// Empty the buffer.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether the buffer has reached its configured window size.
    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples in arrival order, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = &MetricSample> {
        self.samples.iter()
    }
}
