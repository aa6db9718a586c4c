//! Classifier boundary.
//!
//! The image-classification model is an external collaborator behind the
//! [`Classifier`] trait: given a frame it returns a probability for every
//! label it knows. The crate ships a deterministic scripted implementation;
//! with the `remote` feature it can also fetch the label set of a remotely
//! hosted model.

pub mod scripted;
pub mod types;

#[cfg(feature = "remote")]
pub mod remote;

// Re-export commonly used types
pub use scripted::ScriptedClassifier;
pub use types::{ClassificationResult, LabelScore};

#[cfg(feature = "remote")]
pub use remote::{BlockingModelClient, ModelClient, ModelMetadata, ModelRef};

use crate::camera::Frame;

/// Errors from a classifier backend.
#[derive(Debug)]
pub enum ClassifyError {
    /// The model could not be loaded or has nothing to predict with
    ModelUnavailable(String),
    /// The inference backend failed
    Backend(String),
}

impl std::fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifyError::ModelUnavailable(msg) => write!(f, "Model unavailable: {msg}"),
            ClassifyError::Backend(msg) => write!(f, "Classifier backend error: {msg}"),
        }
    }
}

impl std::error::Error for ClassifyError {}

/// A per-frame classifier.
pub trait Classifier {
    /// Classify one frame.
    fn predict(&mut self, frame: &Frame) -> Result<ClassificationResult, ClassifyError>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
