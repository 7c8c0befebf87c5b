use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::catalog::{level_display, StressLevel};
use super::normalizer::normalize;
use super::submission::SubmissionInput;
use crate::model::{ModelError, PretrainedModel, ProbabilisticClassifier, TextVectorizer};

/// Format of the `timestamp` field in results and reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of a single prediction, serialized as-is to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub level: i64,
    pub stress_level: String,
    pub confidence: String,
    pub timestamp: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("No text provided")]
    EmptyText,
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Scores submissions against a pretrained model and enriches the result with
/// catalog labels and advice.
pub struct ClassificationService<V, C> {
    model: PretrainedModel<V, C>,
}

impl<V, C> ClassificationService<V, C>
where
    V: TextVectorizer,
    C: ProbabilisticClassifier,
{
    pub fn new(model: PretrainedModel<V, C>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &PretrainedModel<V, C> {
        &self.model
    }

    /// Combine the survey answers and classify them.
    pub fn analyze(
        &self,
        submission: &SubmissionInput,
        generated_at: NaiveDateTime,
    ) -> Result<ClassificationResult, AnalysisError> {
        self.classify(&submission.combined_text(), generated_at)
    }

    /// Classify raw text. Fails with [`AnalysisError::EmptyText`] when nothing
    /// survives normalization.
    pub fn classify(
        &self,
        text: &str,
        generated_at: NaiveDateTime,
    ) -> Result<ClassificationResult, AnalysisError> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(AnalysisError::EmptyText);
        }

        let prediction = self.model.score(&normalized)?;
        let level = prediction.label;
        let confidence = format_confidence(prediction.confidence() * 100.0);

        let recommendations = match StressLevel::from_level(level) {
            Some(known) => known
                .recommendations()
                .iter()
                .map(|advice| advice.to_string())
                .collect(),
            None => {
                warn!(level, "classifier predicted a level outside the catalog");
                Vec::new()
            }
        };

        info!(level, %confidence, "classified submission");

        Ok(ClassificationResult {
            level,
            stress_level: level_display(level),
            confidence,
            timestamp: generated_at.format(TIMESTAMP_FORMAT).to_string(),
            recommendations,
        })
    }
}

/// Renders a percentage with two decimals, e.g. `"91.23%"`.
pub fn format_confidence(percent: f64) -> String {
    let percent = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    format!("{percent:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_has_two_decimals() {
        assert_eq!(format_confidence(91.234), "91.23%");
        assert_eq!(format_confidence(100.0), "100.00%");
        assert_eq!(format_confidence(7.0), "7.00%");
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(format_confidence(100.0000001), "100.00%");
        assert_eq!(format_confidence(-3.0), "0.00%");
        assert_eq!(format_confidence(f64::NAN), "0.00%");
    }
}
