//! Edge magnitude estimation
//!
//! Sobel gradients through the shared convolution primitive, reduced to
//! a scalar edge-density percentage used by the framing check.

use crate::imaging::{convolve, IntensityMap, Kernel};

/// Horizontal Sobel kernel weights.
pub const SOBEL_X: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];

/// Vertical Sobel kernel weights.
pub const SOBEL_Y: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Per-pixel gradient magnitude, same shape as its source map.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientMap {
    pub width: u32,
    pub height: u32,
    pub magnitudes: Vec<f32>,
}

impl GradientMap {
    pub fn pixel_count(&self) -> usize {
        self.magnitudes.len()
    }
}

/// Compute the Sobel gradient magnitude map.
///
/// Per-pixel magnitude is the Euclidean norm of (gx, gy), using `hypot`
/// for numerical stability.
pub fn gradient_magnitude(map: &IntensityMap) -> GradientMap {
    let gx = convolve(map, &Kernel::new_3x3(SOBEL_X));
    let gy = convolve(map, &Kernel::new_3x3(SOBEL_Y));

    let magnitudes = gx
        .iter()
        .zip(gy.iter())
        .map(|(x, y)| x.hypot(*y))
        .collect();

    GradientMap {
        width: map.width,
        height: map.height,
        magnitudes,
    }
}

/// Fraction of pixels whose gradient magnitude exceeds `threshold`,
/// as a percentage of the total pixel count. Always in [0, 100].
pub fn edge_density_percent(grad: &GradientMap, threshold: f32) -> f64 {
    if grad.magnitudes.is_empty() {
        return 0.0;
    }
    let count = grad
        .magnitudes
        .iter()
        .filter(|&&m| m > threshold)
        .count();
    count as f64 / grad.pixel_count() as f64 * 100.0
}
