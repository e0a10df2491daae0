//! Grayscale reduction
//!
//! Converts an RGB(A) pixel buffer to a single-channel luma map using
//! the ITU-R BT.601 weights. The alpha channel, when present, is skipped.

use crate::errors::EngineError;
use crate::types::Frame;

/// Single-channel intensity map, one luma value per pixel.
///
/// Owned by the call that produced it and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityMap {
    pub width: u32,
    pub height: u32,
    pub values: Vec<f32>,
}

impl IntensityMap {
    /// Reduce a frame to luma: `0.299*R + 0.587*G + 0.114*B` per pixel.
    ///
    /// Fails with `InvalidFrame` if the frame has a zero dimension, an
    /// unsupported channel count, or a mismatched buffer length.
    pub fn from_frame(frame: &Frame) -> Result<Self, EngineError> {
        frame.validate()?;

        let stride = frame.channels as usize;
        let values = frame
            .data
            .chunks_exact(stride)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect();

        Ok(Self {
            width: frame.width,
            height: frame.height,
            values,
        })
    }

    /// Construct directly from luma values. The value count must match
    /// the dimensions; intended for derived maps and tests.
    pub fn from_values(values: Vec<f32>, width: u32, height: u32) -> Result<Self, EngineError> {
        if values.len() != width as usize * height as usize {
            return Err(EngineError::InvalidFrame(format!(
                "value count {}, expected {} for {}x{}",
                values.len(),
                width as usize * height as usize,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.values.len()
    }
}

/// BT.601 luma for one pixel.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma(255, 255, 255), 255.0);
        assert_eq!(luma(0, 0, 0), 0.0);
    }

    #[test]
    fn test_luma_weights() {
        let expected = 0.299 * 100.0 + 0.587 * 150.0 + 0.114 * 200.0;
        assert!((luma(100, 150, 200) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_from_frame_rgb() {
        let frame = Frame::rgb(vec![255u8; 2 * 2 * 3], 2, 2);
        let map = IntensityMap::from_frame(&frame).unwrap();
        assert_eq!(map.width, 2);
        assert_eq!(map.height, 2);
        assert_eq!(map.values, vec![255.0; 4]);
    }

    #[test]
    fn test_from_frame_ignores_alpha() {
        // Same pixels, wildly different alpha: identical luma.
        let mut rgba = Vec::new();
        for a in [0u8, 64, 128, 255] {
            rgba.extend_from_slice(&[10, 20, 30, a]);
        }
        let frame = Frame::rgba(rgba, 2, 2);
        let map = IntensityMap::from_frame(&frame).unwrap();
        assert!(map.values.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_from_frame_rejects_bad_buffer() {
        let frame = Frame::rgb(vec![0u8; 5], 2, 2);
        assert!(IntensityMap::from_frame(&frame).is_err());

        let frame = Frame::rgb(vec![], 0, 2);
        assert!(IntensityMap::from_frame(&frame).is_err());
    }

    #[test]
    fn test_from_values_checks_count() {
        assert!(IntensityMap::from_values(vec![0.0; 4], 2, 2).is_ok());
        assert!(IntensityMap::from_values(vec![0.0; 3], 2, 2).is_err());
    }
}
