use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde_json::json;

use super::service::{ClassificationResult, ClassificationService};
use super::submission::SubmissionInput;
use crate::error::AppError;
use crate::model::{ProbabilisticClassifier, TextVectorizer};
use crate::report::{render_report, ReportRequest, PDF_MEDIA_TYPE, REPORT_FILENAME};

pub const STATUS_MESSAGE: &str = "Stress classification backend running successfully!";

/// Router exposing prediction and report generation.
pub fn analysis_router<V, C>(service: Arc<ClassificationService<V, C>>) -> Router
where
    V: TextVectorizer + 'static,
    C: ProbabilisticClassifier + 'static,
{
    Router::new()
        .route("/", get(status_handler))
        .route("/predict", post(predict_handler::<V, C>))
        .route("/generate-report", post(report_handler))
        .route("/generate-pdf", post(report_handler))
        .with_state(service)
}

pub(crate) async fn status_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": STATUS_MESSAGE }))
}

pub(crate) async fn predict_handler<V, C>(
    State(service): State<Arc<ClassificationService<V, C>>>,
    payload: Result<Json<SubmissionInput>, JsonRejection>,
) -> Result<Json<ClassificationResult>, AppError>
where
    V: TextVectorizer + 'static,
    C: ProbabilisticClassifier + 'static,
{
    let Json(submission) = payload?;
    let result = service.analyze(&submission, Local::now().naive_local())?;
    Ok(Json(result))
}

pub(crate) async fn report_handler(
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let report = render_report(&request)?;
    let disposition = format!("attachment; filename=\"{REPORT_FILENAME}\"");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PDF_MEDIA_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}
