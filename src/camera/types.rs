//! Frame value type produced by a frame source.

use chrono::{DateTime, Utc};

/// One captured frame, as handed to the classifier.
///
/// The pixel data itself stays with the capture backend; the monitor only
/// needs enough to identify and schedule the frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Monotonic frame counter within the session
    pub sequence: u64,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Capture timestamp
    pub captured_at: DateTime<Utc>,
    /// Mean luminance in [0, 1], where the backend provides it
    pub luma: f64,
}

impl Frame {
    pub fn new(sequence: u64, width: u32, height: u32, luma: f64) -> Self {
        Self {
            sequence,
            width,
            height,
            captured_at: Utc::now(),
            luma,
        }
    }
}
