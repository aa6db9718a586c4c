//! Classification result types.
//!
//! A classifier returns one [`ClassificationResult`] per frame: a probability
//! for every label the model knows. Probabilities need not sum to 1; results
//! are transient and not retained across ticks.

use serde::{Deserialize, Serialize};

/// One label and its probability for the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// Raw label as reported by the model
    pub label: String,
    /// Probability in [0, 1]
    pub probability: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// Per-frame classifier output covering the model's full label set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Label scores in model order
    pub scores: Vec<LabelScore>,
}

impl ClassificationResult {
    pub fn new(scores: Vec<LabelScore>) -> Self {
        Self { scores }
    }

    /// Build a result from `(label, probability)` pairs, preserving order.
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            scores: pairs
                .iter()
                .map(|(label, p)| LabelScore::new(*label, *p))
                .collect(),
        }
    }

    /// The entry with the highest probability.
    ///
    /// Comparison is strict `>`, so on a tie the first-encountered entry
    /// wins. This is observable behavior and must not change.
    pub fn best_guess(&self) -> Option<&LabelScore> {
        let mut best: Option<&LabelScore> = None;
        for score in &self.scores {
            let replace = match best {
                None => true,
                Some(current) => score.probability > current.probability,
            };
            if replace {
                best = Some(score);
            }
        }
        best
    }

    /// Check whether the result has no entries.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_guess_picks_maximum() {
        let result = ClassificationResult::from_pairs(&[
            ("Focus", 0.1),
            ("Looking Away", 0.7),
            ("Distracted", 0.2),
        ]);

        let best = result.best_guess().unwrap();
        assert_eq!(best.label, "Looking Away");
    }

    #[test]
    fn test_best_guess_tie_keeps_first() {
        let result = ClassificationResult::from_pairs(&[
            ("Focus", 0.5),
            ("Distracted", 0.5),
        ]);

        let best = result.best_guess().unwrap();
        assert_eq!(best.label, "Focus");
    }

    #[test]
    fn test_best_guess_empty_result() {
        let result = ClassificationResult::default();
        assert!(result.best_guess().is_none());
    }
}
