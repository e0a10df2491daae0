//! Generic small-kernel convolution
//!
//! The shared primitive behind both the edge and sharpness estimators.
//! Neighbors outside the image contribute zero (zero padding, not clamp
//! or mirror), so border pixels see a partial neighborhood.

use crate::errors::EngineError;
use crate::imaging::IntensityMap;

/// A square convolution kernel of odd size, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Create a kernel. The size must be odd and the weight count must
    /// equal `size * size`.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, EngineError> {
        if size == 0 || size % 2 == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "kernel size must be odd, got {}",
                size
            )));
        }
        if weights.len() != size * size {
            return Err(EngineError::InvalidConfig(format!(
                "kernel weight count {}, expected {}",
                weights.len(),
                size * size
            )));
        }
        Ok(Self { size, weights })
    }

    /// 3x3 kernel from a fixed weight array; cannot fail.
    pub fn new_3x3(weights: [f32; 9]) -> Self {
        Self {
            size: 3,
            weights: weights.to_vec(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Convolve an intensity map with a kernel, producing a response value
/// per pixel. Deterministic, O(width * height * k^2), no early exit.
pub fn convolve(map: &IntensityMap, kernel: &Kernel) -> Vec<f32> {
    let width = map.width as usize;
    let height = map.height as usize;
    let k = kernel.size;
    let half = (k / 2) as isize;

    let mut out = vec![0.0f32; width * height];

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for ky in 0..k {
                for kx in 0..k {
                    let sx = x as isize + kx as isize - half;
                    let sy = y as isize + ky as isize - half;
                    if sx >= 0 && sx < width as isize && sy >= 0 && sy < height as isize {
                        sum += map.values[sy as usize * width + sx as usize]
                            * kernel.weights[ky * k + kx];
                    }
                }
            }
            out[y * width + x] = sum;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_kernel() -> Kernel {
        Kernel::new_3x3([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0])
    }

    #[test]
    fn test_kernel_rejects_even_size() {
        assert!(Kernel::new(2, vec![0.0; 4]).is_err());
        assert!(Kernel::new(0, vec![]).is_err());
        assert!(Kernel::new(3, vec![0.0; 8]).is_err());
        assert!(Kernel::new(3, vec![0.0; 9]).is_ok());
    }

    #[test]
    fn test_identity_kernel_preserves_map() {
        let map = IntensityMap::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2).unwrap();
        let out = convolve(&map, &identity_kernel());
        assert_eq!(out, map.values);
    }

    #[test]
    fn test_zero_padding_at_borders() {
        // All-ones kernel on a uniform map counts in-bounds neighbors:
        // 4 at corners, 6 on edges, 9 in the interior.
        let ones = Kernel::new_3x3([1.0; 9]);
        let map = IntensityMap::from_values(vec![1.0; 9], 3, 3).unwrap();
        let out = convolve(&map, &ones);
        assert_eq!(
            out,
            vec![4.0, 6.0, 4.0, 6.0, 9.0, 6.0, 4.0, 6.0, 4.0]
        );
    }

    #[test]
    fn test_single_pixel_map() {
        let ones = Kernel::new_3x3([1.0; 9]);
        let map = IntensityMap::from_values(vec![7.0], 1, 1).unwrap();
        assert_eq!(convolve(&map, &ones), vec![7.0]);
    }

    #[test]
    fn test_output_length_matches_input() {
        let map = IntensityMap::from_values(vec![0.5; 5 * 7], 5, 7).unwrap();
        let out = convolve(&map, &identity_kernel());
        assert_eq!(out.len(), 35);
    }
}
