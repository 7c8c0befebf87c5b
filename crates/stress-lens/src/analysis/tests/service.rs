use super::common::*;

use crate::analysis::{
    recommendations_for, AnalysisError, ClassificationService, SubmissionField, SubmissionInput,
    UNKNOWN_LABEL,
};
use crate::model::PretrainedModel;

#[test]
fn classifies_calm_description() {
    let service = fixture_service();
    let input =
        SubmissionInput::default().with(SubmissionField::Description, "I feel great and calm today");

    let result = service.analyze(&input, generated_at()).expect("classifies");

    assert_eq!(result.level, 0);
    assert!(result.stress_level.starts_with("0 - "));
    assert_eq!(result.timestamp, "2024-01-01 09:30:00");
    assert_eq!(
        result.recommendations,
        ["Maintain your healthy balance.", "Keep positive habits going!"]
    );
}

#[test]
fn every_cue_sentence_maps_to_its_level() {
    let service = fixture_service();
    for level in 0..6 {
        let result = service
            .classify(&cue_sentence(level), generated_at())
            .expect("classifies");
        assert_eq!(result.level, level as i64);
        assert_eq!(result.recommendations, recommendations_for(level as i64));
    }
}

#[test]
fn confidence_is_a_two_decimal_percentage() {
    let service = fixture_service();
    let result = service
        .classify("overwhelmed panic tired", generated_at())
        .expect("classifies");

    let digits = result
        .confidence
        .strip_suffix('%')
        .expect("percent suffix");
    let (_, decimals) = digits.split_once('.').expect("decimal point");
    assert_eq!(decimals.len(), 2);
    let value: f64 = digits.parse().expect("numeric confidence");
    assert!((0.0..=100.0).contains(&value));
}

#[test]
fn empty_after_normalization_is_rejected() {
    let service = fixture_service();

    let err = service
        .analyze(&SubmissionInput::default(), generated_at())
        .expect_err("no text");
    assert!(matches!(err, AnalysisError::EmptyText));
    assert_eq!(err.to_string(), "No text provided");

    let punctuation_only = SubmissionInput::default()
        .with(SubmissionField::Mood, "?!...")
        .with(SubmissionField::Extra, "   ");
    assert!(matches!(
        service.analyze(&punctuation_only, generated_at()),
        Err(AnalysisError::EmptyText)
    ));
}

#[test]
fn text_without_known_terms_still_classifies() {
    let service = fixture_service();
    let result = service
        .classify("nothing in the vocabulary here", generated_at())
        .expect("classifies");
    assert!((0..=5).contains(&result.level));
}

#[test]
fn unknown_levels_degrade_to_unknown_label() {
    let service = stub_service(vec![(7, 0.8), (1, 0.2)]);
    let result = service.classify("anything", generated_at()).expect("classifies");

    assert_eq!(result.level, 7);
    assert_eq!(result.stress_level, format!("7 - {UNKNOWN_LABEL}"));
    assert!(result.recommendations.is_empty());
    assert_eq!(result.confidence, "80.00%");
}

#[test]
fn classifier_failures_surface_as_model_errors() {
    let model = PretrainedModel::assemble(StubVectorizer, FailingClassifier).expect("fits");
    let service = ClassificationService::new(model);

    let err = service
        .classify("some text", generated_at())
        .expect_err("classifier fails");
    assert!(matches!(err, AnalysisError::Model(_)));
}

#[test]
fn identical_inputs_give_identical_results() {
    let service = fixture_service();
    let first = service
        .classify(&cue_sentence(3), generated_at())
        .expect("classifies");
    let second = service
        .classify(&cue_sentence(3), generated_at())
        .expect("classifies");
    assert_eq!(first, second);
}
