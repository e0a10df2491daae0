//! Sharpness estimation
//!
//! Variance of the discrete Laplacian response. An in-focus frame has
//! strong, well-defined edges and a high-variance response; a blurred
//! frame produces a near-uniform response with variance close to zero.

use crate::imaging::{convolve, IntensityMap, Kernel};

/// Discrete Laplacian kernel weights.
pub const LAPLACIAN: [f32; 9] = [0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0];

/// Compute the sharpness score of an intensity map.
///
/// The score is the population variance of the Laplacian response:
/// mean subtracted, squared, averaged over all pixels (divide by the
/// pixel count, not count - 1).
pub fn sharpness_score(map: &IntensityMap) -> f64 {
    let response = convolve(map, &Kernel::new_3x3(LAPLACIAN));
    population_variance(&response)
}

fn population_variance(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}
