use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::linear::{ClassifierArtifact, LinearClassifier};
use super::tfidf::{TfidfVectorizer, VectorizerArtifact};

/// Startup failure while reading model artifacts. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("model artifact {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("model artifact {} is invalid: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
    #[error("vectorizer produces {vectorizer} features but classifier expects {classifier}")]
    Incompatible { vectorizer: usize, classifier: usize },
}

pub fn load_vectorizer(path: &Path) -> Result<TfidfVectorizer, ModelLoadError> {
    let artifact: VectorizerArtifact = read_artifact(path)?;
    TfidfVectorizer::from_artifact(artifact).map_err(|reason| ModelLoadError::Invalid {
        path: path.to_path_buf(),
        reason,
    })
}

pub fn load_classifier(path: &Path) -> Result<LinearClassifier, ModelLoadError> {
    let artifact: ClassifierArtifact = read_artifact(path)?;
    LinearClassifier::from_artifact(artifact).map_err(|reason| ModelLoadError::Invalid {
        path: path.to_path_buf(),
        reason,
    })
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ModelLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ModelLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::model::PretrainedModel;
    use tempfile::TempDir;

    fn scratch_dir() -> TempDir {
        tempfile::tempdir().expect("create scratch dir")
    }

    fn config_for(dir: &Path) -> ModelConfig {
        ModelConfig {
            directory: dir.to_path_buf(),
            vectorizer_file: "vectorizer.json".to_string(),
            classifier_file: "classifier.json".to_string(),
        }
    }

    #[test]
    fn loads_matching_artifacts() {
        let scratch = scratch_dir();
        let dir = scratch.path();
        fs::write(
            dir.join("vectorizer.json"),
            r#"{ "vocabulary": { "calm": 0, "stress": 1 }, "idf": [1.0, 1.0] }"#,
        )
        .expect("write vectorizer");
        fs::write(
            dir.join("classifier.json"),
            r#"{ "classes": [0, 5], "coefficients": [[1.0, -1.0], [-1.0, 1.0]], "intercepts": [0.0, 0.0] }"#,
        )
        .expect("write classifier");

        let model = PretrainedModel::load(&config_for(dir)).expect("model loads");
        let prediction = model.score("stress stress").expect("scores");
        assert_eq!(prediction.label, 5);
    }

    #[test]
    fn missing_files_are_reported_with_their_path() {
        let scratch = scratch_dir();
        let dir = scratch.path();
        let err = PretrainedModel::load(&config_for(dir)).expect_err("missing artifacts");

        assert!(matches!(err, ModelLoadError::Read { .. }));
        assert!(err.to_string().contains("vectorizer.json"));
    }

    #[test]
    fn corrupt_json_is_a_parse_error() {
        let scratch = scratch_dir();
        let dir = scratch.path();
        fs::write(dir.join("vectorizer.json"), "not json").expect("write vectorizer");

        let err = load_vectorizer(&dir.join("vectorizer.json")).expect_err("corrupt artifact");
        assert!(matches!(err, ModelLoadError::Parse { .. }));
    }

    #[test]
    fn scratch_dirs_are_removed_when_a_test_panics() {
        let mut created = None;
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let scratch = scratch_dir();
            created = Some(scratch.path().to_path_buf());
            panic!("assertion failed before the end of the test");
        }));

        assert!(outcome.is_err());
        let path = created.expect("scratch path recorded");
        assert!(!path.exists());
    }
}
