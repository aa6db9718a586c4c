//! Scripted classifier.
//!
//! Replays a fixed sequence of classification results, cycling when the
//! script is exhausted. Used for the built-in demo mode and for driving the
//! monitor deterministically in tests.

use crate::camera::Frame;
use crate::classify::types::{ClassificationResult, LabelScore};
use crate::classify::{Classifier, ClassifyError};

/// A classifier that replays a prepared script of results.
pub struct ScriptedClassifier {
    script: Vec<ClassificationResult>,
    cursor: usize,
    name: String,
}

impl ScriptedClassifier {
    /// Create a classifier from an explicit script.
    pub fn new(script: Vec<ClassificationResult>) -> Self {
        Self {
            script,
            cursor: 0,
            name: "scripted".to_string(),
        }
    }

    /// Build a script that cycles through the given labels, giving the
    /// active label `probability` and splitting the remainder across the
    /// others.
    pub fn cycling(labels: &[&str], probability: f64) -> Self {
        let mut script = Vec::with_capacity(labels.len());
        for (active, _) in labels.iter().enumerate() {
            let rest = if labels.len() > 1 {
                (1.0 - probability) / (labels.len() - 1) as f64
            } else {
                0.0
            };
            let scores = labels
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    LabelScore::new(*label, if i == active { probability } else { rest })
                })
                .collect();
            script.push(ClassificationResult::new(scores));
        }
        Self::new(script)
    }

    /// Number of results in the script.
    pub fn len(&self) -> usize {
        self.script.len()
    }

    /// Check whether the script is empty.
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl Classifier for ScriptedClassifier {
    fn predict(&mut self, _frame: &Frame) -> Result<ClassificationResult, ClassifyError> {
        if self.script.is_empty() {
            return Err(ClassifyError::ModelUnavailable(
                "scripted classifier has an empty script".to_string(),
            ));
        }
        let result = self.script[self.cursor % self.script.len()].clone();
        self.cursor += 1;
        Ok(result)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(1, 400, 300, 0.5)
    }

    #[test]
    fn test_script_cycles() {
        let mut classifier = ScriptedClassifier::new(vec![
            ClassificationResult::from_pairs(&[("Focus", 0.9)]),
            ClassificationResult::from_pairs(&[("Distracted", 0.8)]),
        ]);

        let labels: Vec<String> = (0..4)
            .map(|_| {
                classifier
                    .predict(&frame())
                    .unwrap()
                    .best_guess()
                    .unwrap()
                    .label
                    .clone()
            })
            .collect();

        assert_eq!(labels, vec!["Focus", "Distracted", "Focus", "Distracted"]);
    }

    #[test]
    fn test_cycling_builder_covers_all_labels() {
        let mut classifier = ScriptedClassifier::cycling(&["Focus", "Looking Away"], 0.8);
        assert_eq!(classifier.len(), 2);

        let first = classifier.predict(&frame()).unwrap();
        assert_eq!(first.best_guess().unwrap().label, "Focus");
        assert!((first.best_guess().unwrap().probability - 0.8).abs() < 1e-9);

        let second = classifier.predict(&frame()).unwrap();
        assert_eq!(second.best_guess().unwrap().label, "Looking Away");
    }

    #[test]
    fn test_empty_script_is_an_error() {
        let mut classifier = ScriptedClassifier::new(Vec::new());
        assert!(classifier.predict(&frame()).is_err());
    }
}
