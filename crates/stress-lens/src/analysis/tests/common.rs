use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::analysis::{analysis_router, ClassificationService};
use crate::model::{
    ClassifierArtifact, FeatureVector, LinearClassifier, ModelError, Prediction,
    PretrainedModel, ProbabilisticClassifier, TextVectorizer, TfidfVectorizer,
    VectorizerArtifact,
};

/// Cue words per level; each word gets its own column in the fixture vocabulary.
const CUES: [&[&str]; 6] = [
    &["calm", "great"],
    &["relaxed", "balanced"],
    &["energetic", "busy"],
    &["tired", "journaling"],
    &["worried", "anxious"],
    &["overwhelmed", "panic"],
];

pub(super) fn fixture_model() -> PretrainedModel<TfidfVectorizer, LinearClassifier> {
    let mut vocabulary = BTreeMap::new();
    let mut coefficients = vec![Vec::new(); CUES.len()];
    for (level, words) in CUES.iter().enumerate() {
        for word in words.iter() {
            let column = vocabulary.len();
            vocabulary.insert(word.to_string(), column);
            for (row, weights) in coefficients.iter_mut().enumerate() {
                weights.push(if row == level { 4.0 } else { -0.5 });
            }
        }
    }
    let features = vocabulary.len();

    let vectorizer = TfidfVectorizer::from_artifact(VectorizerArtifact {
        vocabulary,
        idf: vec![1.0; features],
        ngram_range: (1, 1),
        sublinear_tf: false,
        norm: None,
        min_token_len: 2,
    })
    .expect("fixture vectorizer");
    let classifier = LinearClassifier::from_artifact(ClassifierArtifact {
        classes: (0..CUES.len() as i64).collect(),
        coefficients,
        intercepts: vec![0.0; CUES.len()],
    })
    .expect("fixture classifier");

    PretrainedModel::assemble(vectorizer, classifier).expect("fixture model fits")
}

pub(super) fn fixture_service() -> ClassificationService<TfidfVectorizer, LinearClassifier> {
    ClassificationService::new(fixture_model())
}

/// Sentence that the fixture model classifies as `level`.
pub(super) fn cue_sentence(level: usize) -> String {
    format!("Lately I have been {} and {}.", CUES[level][0], CUES[level][1])
}

pub(super) fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .expect("valid timestamp")
}

pub(super) struct StubVectorizer;

impl TextVectorizer for StubVectorizer {
    fn dimension(&self) -> usize {
        1
    }

    fn vectorize(&self, _text: &str) -> FeatureVector {
        FeatureVector::new(1, vec![(0, 1.0)])
    }
}

/// Returns the same distribution for every input.
pub(super) struct StubClassifier {
    pub(super) classes: Vec<i64>,
    pub(super) distribution: Vec<(i64, f64)>,
}

impl ProbabilisticClassifier for StubClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn feature_count(&self) -> usize {
        1
    }

    fn predict(&self, _features: &FeatureVector) -> Result<Prediction, ModelError> {
        Prediction::from_distribution(self.distribution.clone())
    }
}

pub(super) struct FailingClassifier;

impl ProbabilisticClassifier for FailingClassifier {
    fn classes(&self) -> &[i64] {
        &[]
    }

    fn feature_count(&self) -> usize {
        1
    }

    fn predict(&self, _features: &FeatureVector) -> Result<Prediction, ModelError> {
        Err(ModelError::EmptyDistribution)
    }
}

pub(super) fn stub_service(
    distribution: Vec<(i64, f64)>,
) -> ClassificationService<StubVectorizer, StubClassifier> {
    let classifier = StubClassifier {
        classes: distribution.iter().map(|(class, _)| *class).collect(),
        distribution,
    };
    ClassificationService::new(
        PretrainedModel::assemble(StubVectorizer, classifier).expect("stub model fits"),
    )
}

pub(super) fn fixture_router() -> axum::Router {
    analysis_router(Arc::new(fixture_service()))
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json payload")
}
