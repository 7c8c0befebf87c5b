use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{FeatureVector, TextVectorizer};

/// Row normalisation applied after TF-IDF weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of a fitted TF-IDF vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub vocabulary: BTreeMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_min_token_len() -> usize {
    2
}

/// Term-frequency / inverse-document-frequency transform over a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
    min_token_len: usize,
}

impl TfidfVectorizer {
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, String> {
        let VectorizerArtifact {
            vocabulary,
            idf,
            ngram_range,
            sublinear_tf,
            norm,
            min_token_len,
        } = artifact;

        if idf.is_empty() {
            return Err("idf weights are empty".to_string());
        }
        if let Some(weight) = idf.iter().find(|weight| !weight.is_finite()) {
            return Err(format!("idf weights must be finite, found {weight}"));
        }
        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram range ({min_n}, {max_n})"));
        }
        if let Some((term, column)) = vocabulary.iter().find(|(_, column)| **column >= idf.len()) {
            return Err(format!(
                "term '{term}' maps to column {column} but only {} idf weights exist",
                idf.len()
            ));
        }

        Ok(Self {
            vocabulary: vocabulary.into_iter().collect(),
            idf,
            ngram_range,
            sublinear_tf,
            norm,
            min_token_len: min_token_len.max(1),
        })
    }

    fn terms(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() >= self.min_token_len)
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn vectorize(&self, text: &str) -> FeatureVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.terms(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (column, tf * self.idf[column])
            })
            .collect();

        let magnitude = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if magnitude > 0.0 {
            for (_, value) in &mut entries {
                *value /= magnitude;
            }
        }

        FeatureVector::new(self.dimension(), entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> VectorizerArtifact {
        VectorizerArtifact {
            vocabulary: BTreeMap::from([
                ("calm".to_string(), 0),
                ("stress".to_string(), 1),
                ("deadline".to_string(), 2),
                ("calm today".to_string(), 3),
            ]),
            idf: vec![1.0, 2.0, 1.5, 3.0],
            ngram_range: (1, 1),
            sublinear_tf: false,
            norm: None,
            min_token_len: 2,
        }
    }

    #[test]
    fn counts_known_terms_weighted_by_idf() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact()).expect("valid artifact");
        let features = vectorizer.vectorize("stress stress calm unknown");

        assert_eq!(features.dimension(), 4);
        assert_eq!(features.entries(), &[(0, 1.0), (1, 4.0)]);
    }

    #[test]
    fn bigrams_are_joined_with_a_space() {
        let mut artifact = artifact();
        artifact.ngram_range = (1, 2);
        let vectorizer = TfidfVectorizer::from_artifact(artifact).expect("valid artifact");

        let features = vectorizer.vectorize("i feel calm today");
        assert_eq!(features.entries(), &[(0, 1.0), (3, 3.0)]);
    }

    #[test]
    fn single_character_tokens_are_skipped() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact()).expect("valid artifact");
        assert!(vectorizer.vectorize("a b c").is_empty());
    }

    #[test]
    fn l2_norm_produces_unit_vector() {
        let mut artifact = artifact();
        artifact.norm = Some(Norm::L2);
        let vectorizer = TfidfVectorizer::from_artifact(artifact).expect("valid artifact");

        let features = vectorizer.vectorize("calm stress deadline");
        let length: f64 = features.entries().iter().map(|(_, v)| v * v).sum();
        assert!((length - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sublinear_tf_dampens_repeats() {
        let mut artifact = artifact();
        artifact.sublinear_tf = true;
        let vectorizer = TfidfVectorizer::from_artifact(artifact).expect("valid artifact");

        let features = vectorizer.vectorize("calm calm calm");
        let (_, value) = features.entries()[0];
        assert!((value - (1.0 + 3f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn rejects_out_of_range_columns() {
        let mut artifact = artifact();
        artifact.vocabulary.insert("sleep".to_string(), 9);
        let err = TfidfVectorizer::from_artifact(artifact).expect_err("column out of range");
        assert!(err.contains("sleep"));
    }

    #[test]
    fn artifact_defaults_apply() {
        let artifact: VectorizerArtifact = serde_json::from_str(
            r#"{ "vocabulary": { "calm": 0 }, "idf": [1.0] }"#,
        )
        .expect("artifact parses");
        assert_eq!(artifact.ngram_range, (1, 1));
        assert_eq!(artifact.norm, Some(Norm::L2));
        assert_eq!(artifact.min_token_len, 2);
        assert!(!artifact.sublinear_tf);
    }
}
