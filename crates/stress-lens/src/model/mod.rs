//! Pretrained text model: a vectorizer turning text into features and a
//! classifier producing a probability distribution over stress levels.
//!
//! Both halves sit behind traits so request handlers can be exercised with
//! fixed-output doubles instead of real artifacts.

pub mod artifacts;
pub mod linear;
pub mod tfidf;

pub use artifacts::ModelLoadError;
pub use linear::{ClassifierArtifact, LinearClassifier};
pub use tfidf::{Norm, TfidfVectorizer, VectorizerArtifact};

use crate::config::ModelConfig;

/// Sparse feature row: `(column, value)` pairs sorted by column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    pub fn new(dimension: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|(column, _)| *column < dimension);
        entries.sort_by_key(|(column, _)| *column);
        Self { dimension, entries }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Winning class plus the full distribution it was drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: i64,
    pub probabilities: Vec<(i64, f64)>,
}

impl Prediction {
    /// Builds a prediction from `(class, probability)` pairs; ties go to the
    /// earliest class.
    pub fn from_distribution(probabilities: Vec<(i64, f64)>) -> Result<Self, ModelError> {
        if probabilities.iter().any(|(_, p)| !p.is_finite()) {
            return Err(ModelError::NonFiniteProbability);
        }

        let mut best: Option<(i64, f64)> = None;
        for &(class, probability) in &probabilities {
            match best {
                Some((_, top)) if probability <= top => {}
                _ => best = Some((class, probability)),
            }
        }

        let (label, _) = best.ok_or(ModelError::EmptyDistribution)?;
        Ok(Self {
            label,
            probabilities,
        })
    }

    /// Highest class probability, in `[0, 1]`.
    pub fn confidence(&self) -> f64 {
        self.probabilities
            .iter()
            .map(|(_, p)| *p)
            .fold(0.0, f64::max)
            .clamp(0.0, 1.0)
    }
}

pub trait TextVectorizer: Send + Sync {
    fn dimension(&self) -> usize;
    fn vectorize(&self, text: &str) -> FeatureVector;
}

pub trait ProbabilisticClassifier: Send + Sync {
    fn classes(&self) -> &[i64];
    fn feature_count(&self) -> usize;
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("feature vector has {found} columns, classifier expects {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("classifier returned an empty probability distribution")]
    EmptyDistribution,
    #[error("classifier returned a non-finite probability")]
    NonFiniteProbability,
}

/// A fitted vectorizer/classifier pair, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct PretrainedModel<V, C> {
    vectorizer: V,
    classifier: C,
}

impl PretrainedModel<TfidfVectorizer, LinearClassifier> {
    /// Reads both artifacts named by `config` and checks they fit together.
    pub fn load(config: &ModelConfig) -> Result<Self, ModelLoadError> {
        let vectorizer = artifacts::load_vectorizer(&config.vectorizer_path())?;
        let classifier = artifacts::load_classifier(&config.classifier_path())?;
        Self::assemble(vectorizer, classifier)
    }
}

impl<V, C> PretrainedModel<V, C>
where
    V: TextVectorizer,
    C: ProbabilisticClassifier,
{
    /// Pairs a vectorizer with a classifier, rejecting mismatched feature spaces.
    pub fn assemble(vectorizer: V, classifier: C) -> Result<Self, ModelLoadError> {
        if vectorizer.dimension() != classifier.feature_count() {
            return Err(ModelLoadError::Incompatible {
                vectorizer: vectorizer.dimension(),
                classifier: classifier.feature_count(),
            });
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn vectorizer(&self) -> &V {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn score(&self, text: &str) -> Result<Prediction, ModelError> {
        let features = self.vectorizer.vectorize(text);
        self.classifier.predict(&features)
    }
}
