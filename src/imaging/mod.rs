/// Image metric pipeline
///
/// Deterministic, closed-form image statistics used by the capture
/// decision:
/// 1. Reduce an RGB(A) frame to a single-channel intensity map
/// 2. Convolve with small 3x3 kernels (generic primitive, zero-padded)
/// 3. Estimate edge density from Sobel gradient magnitudes
/// 4. Estimate sharpness as the variance of the Laplacian response
///
/// No learned models; every value is reproducible from the pixel buffer.
pub mod convolve;
pub mod edges;
pub mod grayscale;
pub mod sharpness;

pub use convolve::{convolve, Kernel};
pub use edges::{edge_density_percent, gradient_magnitude, GradientMap};
pub use grayscale::IntensityMap;
pub use sharpness::sharpness_score;
