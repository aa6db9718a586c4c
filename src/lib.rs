//! Attention Monitor - classification-driven webcam attention scoring.
//!
//! This library wires a pretrained image-classification model to a frame
//! source and turns per-frame labels into UI state: an attention score with
//! hysteresis-based alerting, a colored zone indicator, and a chronological
//! event log. Model inference and webcam capture are external collaborators
//! behind traits; the crate owns the state machine and the plumbing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Attention Monitor                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐        │
//! │  │ FrameSource │──▶│ Classifier  │──▶│  Attention  │        │
//! │  │  (camera)   │   │  (model)    │   │  Monitor    │        │
//! │  └─────────────┘   └─────────────┘   └──────┬──────┘        │
//! │                                             │               │
//! │                             ┌───────────────┴──────┐        │
//! │                             ▼                      ▼        │
//! │                      ┌─────────────┐       ┌─────────────┐  │
//! │                      │ Presentation│       │   Session   │  │
//! │                      │ + Audio sink│       │   Report    │  │
//! │                      └─────────────┘       └─────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! One tick is fully processed (capture, classify, monitor update, render)
//! before the next is scheduled; there is no frame queue and therefore no
//! drop policy.
//!
//! # Example
//!
//! ```
//! use attention_monitor::{
//!     AttentionMonitor, ClassificationResult, Zone,
//! };
//!
//! let mut monitor = AttentionMonitor::new();
//! let result = ClassificationResult::from_pairs(&[
//!     ("Focus", 0.92),
//!     ("Looking Away", 0.05),
//!     ("Distracted", 0.03),
//! ]);
//!
//! let update = monitor.on_tick(&result);
//! assert_eq!(update.zone, Zone::Green);
//! assert_eq!(update.score_percent, 100);
//! ```

pub mod camera;
pub mod classify;
pub mod config;
pub mod core;
pub mod session;
pub mod ui;

// Re-export key types at crate root for convenience
pub use camera::{check_permission, CameraError, Frame, FrameSource, SyntheticCamera};
pub use classify::{
    ClassificationResult, Classifier, ClassifyError, LabelScore, ScriptedClassifier,
};
pub use config::{CameraConfig, Config, ConfigError};
pub use core::{
    AttentionMonitor, EventLog, EventLogEntry, MonitorStats, ReportBuilder, SessionReport,
    TickUpdate, Zone,
};
pub use session::{SessionCommand, SessionController, SessionError, SessionState};
pub use ui::{AudioSink, ConsoleAudio, ConsolePresentation, PresentationSink};

// Remote model re-exports (when enabled)
#[cfg(feature = "remote")]
pub use classify::{BlockingModelClient, ModelClient, ModelMetadata, ModelRef};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
