use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoiError {
    /// Zero-area selections never reach the tracker.
    #[error("degenerate region {width}x{height}")]
    Degenerate { width: u32, height: u32 },
    #[error("invalid region '{0}', expected x,y,w,h")]
    Parse(String),
    #[error("no frame available to select a region on")]
    NoFrame,
    #[error("tracker rejected the region")]
    Rejected,
}

#[derive(Debug, Error)]
pub enum FrameSourceError {
    #[error("failed to open {input}: {reason}")]
    Open { input: String, reason: String },
    #[error("frame read failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("frame decode failed: {0}")]
    Decode(String),
    #[error("frame buffer holds {actual} bytes, expected {expected}")]
    Size { expected: usize, actual: usize },
}
