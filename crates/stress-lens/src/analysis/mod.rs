//! Survey intake, text preparation, and classification of stress levels.

pub mod catalog;
pub mod normalizer;
pub mod router;
pub mod service;
pub mod submission;

#[cfg(test)]
mod tests;

pub use catalog::{label_for, level_display, recommendations_for, StressLevel, UNKNOWN_LABEL};
pub use normalizer::normalize;
pub use router::analysis_router;
pub use service::{
    format_confidence, AnalysisError, ClassificationResult, ClassificationService,
    TIMESTAMP_FORMAT,
};
pub use submission::{SubmissionField, SubmissionInput};
