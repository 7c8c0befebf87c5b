use serde::{Deserialize, Serialize};

use super::{FeatureVector, ModelError, Prediction, ProbabilisticClassifier};

/// On-disk form of a fitted one-vs-rest linear classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub classes: Vec<i64>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// Linear decision functions per class with softmax-calibrated probabilities.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    classes: Vec<i64>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
    features: usize,
}

impl LinearClassifier {
    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self, String> {
        let ClassifierArtifact {
            classes,
            coefficients,
            intercepts,
        } = artifact;

        if classes.is_empty() {
            return Err("classifier has no classes".to_string());
        }
        if coefficients.len() != classes.len() || intercepts.len() != classes.len() {
            return Err(format!(
                "expected {} coefficient rows and intercepts, found {} and {}",
                classes.len(),
                coefficients.len(),
                intercepts.len()
            ));
        }

        let features = coefficients[0].len();
        if let Some(row) = coefficients.iter().position(|row| row.len() != features) {
            return Err(format!(
                "coefficient row {row} has {} weights, expected {features}",
                coefficients[row].len()
            ));
        }
        let all_finite = coefficients
            .iter()
            .flatten()
            .chain(intercepts.iter())
            .all(|weight| weight.is_finite());
        if !all_finite {
            return Err("classifier weights must be finite".to_string());
        }

        Ok(Self {
            classes,
            coefficients,
            intercepts,
            features,
        })
    }

    fn decision_scores(&self, features: &FeatureVector) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| {
                features
                    .entries()
                    .iter()
                    .map(|(column, value)| row[*column] * value)
                    .sum::<f64>()
                    + intercept
            })
            .collect()
    }
}

impl ProbabilisticClassifier for LinearClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn feature_count(&self) -> usize {
        self.features
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        if features.dimension() != self.features {
            return Err(ModelError::DimensionMismatch {
                expected: self.features,
                found: features.dimension(),
            });
        }

        let scores = self.decision_scores(features);
        let probabilities = softmax(&scores);
        Prediction::from_distribution(self.classes.iter().copied().zip(probabilities).collect())
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|score| (score - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|value| value / total).collect()
}
