//! Metric pipeline integration tests
//!
//! Exercises grayscale reduction, convolution, and both estimators
//! against synthetic patterns with hand-computed reference values.

use docsnap::imaging::{
    convolve, edge_density_percent, gradient_magnitude, sharpness_score, IntensityMap, Kernel,
};
use docsnap::testing::{checkerboard_frame, gradient_frame, uniform_frame};
use docsnap::types::Frame;

#[test]
fn test_grayscale_extremes() {
    let white = IntensityMap::from_frame(&uniform_frame(4, 4, 255)).unwrap();
    assert!(white.values.iter().all(|&v| v == 255.0));

    let black = IntensityMap::from_frame(&uniform_frame(4, 4, 0)).unwrap();
    assert!(black.values.iter().all(|&v| v == 0.0));
}

#[test]
fn test_grayscale_deterministic() {
    let frame = checkerboard_frame(16, 16, 2);
    let a = IntensityMap::from_frame(&frame).unwrap();
    let b = IntensityMap::from_frame(&frame).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_grayscale_alpha_ignored() {
    let rgb = Frame::rgb(vec![50, 100, 150, 200, 250, 30], 2, 1);
    let mut rgba_data = Vec::new();
    for px in rgb.data.chunks(3) {
        rgba_data.extend_from_slice(px);
        rgba_data.push(77); // arbitrary alpha
    }
    let rgba = Frame::rgba(rgba_data, 2, 1);

    assert_eq!(
        IntensityMap::from_frame(&rgb).unwrap().values,
        IntensityMap::from_frame(&rgba).unwrap().values
    );
}

#[test]
fn test_convolution_zero_padding() {
    // Sum kernel over a uniform map exposes the padding: corners see 4
    // in-bounds neighbors, edges 6, interior 9.
    let map = IntensityMap::from_values(vec![2.0; 9], 3, 3).unwrap();
    let out = convolve(&map, &Kernel::new_3x3([1.0; 9]));
    assert_eq!(out, vec![8.0, 12.0, 8.0, 12.0, 18.0, 12.0, 8.0, 12.0, 8.0]);
}

#[test]
fn test_checkerboard_reference_values() {
    // 4x4 alternating 0/255 pattern, hand-computed with zero padding:
    // 12 of 16 Sobel magnitudes exceed 30, Laplacian variance 812812.5.
    let map = IntensityMap::from_frame(&checkerboard_frame(4, 4, 1)).unwrap();

    let grad = gradient_magnitude(&map);
    assert_eq!(edge_density_percent(&grad, 30.0), 75.0);

    let sharpness = sharpness_score(&map);
    assert!((sharpness - 812_812.5).abs() < 1e-6);
}

#[test]
fn test_black_frame_sharpness_exactly_zero() {
    let map = IntensityMap::from_frame(&uniform_frame(32, 32, 0)).unwrap();
    assert_eq!(sharpness_score(&map), 0.0);

    let grad = gradient_magnitude(&map);
    assert_eq!(edge_density_percent(&grad, 30.0), 0.0);
}

#[test]
fn test_gradient_frame_smoother_than_checkerboard() {
    let smooth = IntensityMap::from_frame(&gradient_frame(32, 32)).unwrap();
    let sharp = IntensityMap::from_frame(&checkerboard_frame(32, 32, 1)).unwrap();
    assert!(sharpness_score(&smooth) < sharpness_score(&sharp));
}

#[test]
fn test_edge_density_threshold_monotone() {
    // Raising the threshold can only lower the density.
    let map = IntensityMap::from_frame(&checkerboard_frame(16, 16, 2)).unwrap();
    let grad = gradient_magnitude(&map);
    let low = edge_density_percent(&grad, 10.0);
    let high = edge_density_percent(&grad, 500.0);
    assert!(low >= high);
    assert!((0.0..=100.0).contains(&low));
    assert!((0.0..=100.0).contains(&high));
}

#[test]
fn test_estimators_preserve_dimensions() {
    let map = IntensityMap::from_frame(&uniform_frame(17, 9, 100)).unwrap();
    let grad = gradient_magnitude(&map);
    assert_eq!(grad.width, 17);
    assert_eq!(grad.height, 9);
    assert_eq!(grad.magnitudes.len(), 17 * 9);
}
