use std::fmt;

/// Errors produced by the capture engine.
///
/// `InvalidFrame` and `NotReady` are per-tick conditions: the tick is
/// skipped and no buffer or decision state is mutated. The metric
/// pipeline itself has no fatal errors; convolution and statistics are
/// total over any validly shaped intensity map.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Frame dimensions or buffer length are inconsistent.
    InvalidFrame(String),
    /// The frame source has nothing to offer yet.
    NotReady,
    /// A configuration value is out of range or incoherent.
    InvalidConfig(String),
    /// Reading or writing a configuration file failed.
    ConfigIo(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EngineError::InvalidFrame(msg) => write!(f, "Invalid frame: {}", msg),
            EngineError::NotReady => write!(f, "Frame source not ready"),
            EngineError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            EngineError::ConfigIo(msg) => write!(f, "Configuration IO error: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
