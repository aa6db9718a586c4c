//! Frame source boundary.
//!
//! Webcam capture is delegated to an external backend behind the
//! [`FrameSource`] trait. The crate ships a synthetic implementation that
//! compiles and runs everywhere; real capture backends plug in behind the
//! same trait.

pub mod synthetic;
pub mod types;

// Re-export commonly used types
pub use synthetic::SyntheticCamera;
pub use types::Frame;

/// Errors from a frame source.
#[derive(Debug)]
pub enum CameraError {
    /// The platform denied camera access
    PermissionDenied,
    /// The source was started twice
    AlreadyRunning,
    /// The device is missing or failed to open
    Unavailable(String),
}

impl std::fmt::Display for CameraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "Camera permission denied"),
            CameraError::AlreadyRunning => write!(f, "Frame source is already running"),
            CameraError::Unavailable(msg) => write!(f, "Camera unavailable: {msg}"),
        }
    }
}

impl std::error::Error for CameraError {}

/// A source of frames for classification.
///
/// `setup` acquires the device and may fail on permission denial; `update`
/// produces the next frame and is only called while the source is playing.
pub trait FrameSource {
    /// Acquire the capture device.
    fn setup(&mut self) -> Result<(), CameraError>;

    /// Begin producing frames.
    fn play(&mut self);

    /// Capture the next frame.
    fn update(&mut self) -> Frame;

    /// Release the capture device.
    fn stop(&mut self);

    /// Whether the source is currently playing.
    fn is_running(&self) -> bool;
}

/// Check whether camera access is available without acquiring the device.
///
/// The synthetic backend has no permission gate.
pub fn check_permission() -> bool {
    true
}
