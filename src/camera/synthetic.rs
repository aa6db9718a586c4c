//! Synthetic frame source.
//!
//! Produces deterministic frames with a slowly varying luminance so the rest
//! of the pipeline can run without camera hardware. Also used by tests, which
//! can ask it to simulate a permission denial at setup.

use crate::camera::types::Frame;
use crate::camera::{CameraError, FrameSource};

/// A frame source that fabricates frames instead of capturing them.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    sequence: u64,
    set_up: bool,
    running: bool,
    deny_permission: bool,
}

impl SyntheticCamera {
    /// Create a synthetic camera with the given frame dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            sequence: 0,
            set_up: false,
            running: false,
            deny_permission: false,
        }
    }

    /// Create a camera whose `setup` fails with a permission denial.
    pub fn denied(width: u32, height: u32) -> Self {
        let mut camera = Self::new(width, height);
        camera.deny_permission = true;
        camera
    }
}

impl FrameSource for SyntheticCamera {
    fn setup(&mut self) -> Result<(), CameraError> {
        if self.deny_permission {
            return Err(CameraError::PermissionDenied);
        }
        if self.running {
            return Err(CameraError::AlreadyRunning);
        }
        self.set_up = true;
        Ok(())
    }

    fn play(&mut self) {
        if self.set_up {
            self.running = true;
        }
    }

    fn update(&mut self) -> Frame {
        self.sequence += 1;
        // Slow sine sweep keeps the luminance in (0, 1) and deterministic
        // per sequence number.
        let luma = 0.5 + 0.45 * ((self.sequence as f64) / 30.0).sin();
        Frame::new(self.sequence, self.width, self.height, luma)
    }

    fn stop(&mut self) {
        self.running = false;
        self.set_up = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_play_stop() {
        let mut camera = SyntheticCamera::new(400, 300);
        camera.setup().unwrap();
        camera.play();
        assert!(camera.is_running());

        camera.stop();
        assert!(!camera.is_running());
    }

    #[test]
    fn test_denied_camera_fails_setup() {
        let mut camera = SyntheticCamera::denied(400, 300);
        let err = camera.setup().unwrap_err();
        assert!(matches!(err, CameraError::PermissionDenied));
        camera.play();
        assert!(!camera.is_running());
    }

    #[test]
    fn test_frames_are_sequenced_and_bounded() {
        let mut camera = SyntheticCamera::new(400, 300);
        camera.setup().unwrap();
        camera.play();

        let first = camera.update();
        let second = camera.update();
        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
        assert!(first.luma > 0.0 && first.luma < 1.0);
    }
}
