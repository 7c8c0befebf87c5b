use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use stress_lens::analysis::ClassificationService;
use stress_lens::config::{AppConfig, ModelConfig};
use stress_lens::error::AppError;
use stress_lens::model::{
    LinearClassifier, PretrainedModel, ProbabilisticClassifier, TextVectorizer, TfidfVectorizer,
};
use tracing::info;

pub(crate) type StressService = ClassificationService<TfidfVectorizer, LinearClassifier>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads configuration, letting a CLI-supplied model directory win.
pub(crate) fn load_config(model_dir: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(directory) = model_dir {
        config.model.directory = directory;
    }
    Ok(config)
}

/// One-time model load shared by every command.
pub(crate) fn load_service(config: &ModelConfig) -> Result<Arc<StressService>, AppError> {
    let model = PretrainedModel::load(config)?;
    info!(
        vectorizer = %config.vectorizer_path().display(),
        classifier = %config.classifier_path().display(),
        features = model.vectorizer().dimension(),
        classes = ?model.classifier().classes(),
        "loaded pretrained model"
    );
    Ok(Arc::new(ClassificationService::new(model)))
}
