//! docsnap: automatic document capture decision engine
//!
//! Continuously evaluates a live sequence of camera frames and decides,
//! without human intervention, the moment a frame is sharp, well-framed,
//! and motion-stable enough to serve as a usable capture of a
//! rectangular document (e.g., an ID card).
//!
//! The crate is the decision core only: it consumes raw pixel buffers
//! and produces quality metrics plus a discrete capture trigger. Camera
//! device access, UI rendering, image encoding, and upload transport are
//! external collaborators behind the [`session::FrameSource`] trait and
//! the capture channel.
//!
//! # Pipeline
//! raw frame -> grayscale luma -> { Sobel edge density, Laplacian
//! sharpness } -> bounded metric window -> decision state machine ->
//! ready / diagnostic status
//!
//! # Usage
//! ```rust,no_run
//! use docsnap::config::EngineConfig;
//! use docsnap::session::Session;
//! use docsnap::testing::SteadySource;
//! use docsnap::testing::checkerboard_frame;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     docsnap::init_logging();
//!     let (capture_tx, mut capture_rx) = mpsc::channel(4);
//!     let source = SteadySource::new(checkerboard_frame(640, 480, 8));
//!     let handle = Session::spawn(EngineConfig::default(), source, capture_tx).unwrap();
//!     handle.set_auto_capture(true);
//!     if let Some(capture) = capture_rx.recv().await {
//!         println!("captured frame {}", capture.event.sequence);
//!     }
//!     handle.stop().await;
//! }
//! ```

pub mod config;
pub mod decision;
pub mod errors;
pub mod imaging;
pub mod metrics;
pub mod session;
pub mod types;

// Testing utilities - synthetic frames for offline testing
pub mod testing;

// Re-exports for convenience
pub use config::EngineConfig;
pub use decision::{DecisionEngine, DecisionPhase, DecisionStatus};
pub use errors::EngineError;
pub use metrics::{MetricAggregate, MetricSample, MetricSampleBuffer};
pub use session::{CapturePipeline, FrameSource, Session, SessionHandle};
pub use types::{Capture, CaptureEvent, CaptureTrigger, Frame, ProcessingOutcome};

/// Initialize logging for the capture engine
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "docsnap=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
