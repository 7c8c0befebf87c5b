//! PDF rendering of a classification result.

mod layout;
pub mod metrics;
pub mod transliterate;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::analysis::catalog::StressLevel;
use crate::analysis::ClassificationResult;
use layout::{Align, ReportCanvas};
use metrics::FontStyle;

pub const REPORT_FILENAME: &str = "Stress_Analysis_Report.pdf";
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

const DOCUMENT_TITLE: &str = "Stress Analysis Report";
const RULE: &str = "------------------------------------------------------------";
const NO_RECOMMENDATIONS: &str = "No specific recommendations available.";
const DISCLAIMER: &str = "This is an AI-generated indicative result, not a clinical diagnosis.\nIf you experience prolonged stress or emotional distress, consider reaching out to a mental health professional.";

/// Result-shaped payload accepted by the report endpoint. Every field is
/// optional so a partially filled record still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub stress_level: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub confidence: String,
    #[serde(default, deserialize_with = "deserialize_level")]
    pub level: i64,
    #[serde(default, deserialize_with = "deserialize_recommendations")]
    pub recommendations: Vec<String>,
}

impl From<ClassificationResult> for ReportRequest {
    fn from(result: ClassificationResult) -> Self {
        Self {
            timestamp: result.timestamp,
            stress_level: result.stress_level,
            confidence: result.confidence,
            level: result.level,
            recommendations: result.recommendations,
        }
    }
}

/// Rendered PDF bytes.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("pdf backend failed: {0}")]
    Pdf(String),
}

/// Observation paragraph for a raw level: `<= 1` reads as calm and anything
/// above the catalog as high stress.
pub fn observation_for(level: i64) -> &'static str {
    match StressLevel::from_level(level) {
        Some(known) => known.observation(),
        None if level < 0 => StressLevel::NoStress.observation(),
        None => StressLevel::HighStress.observation(),
    }
}

pub fn render_report(request: &ReportRequest) -> Result<RenderedReport, ReportError> {
    let mut canvas = ReportCanvas::new(DOCUMENT_TITLE)?;

    canvas.cell(RULE, FontStyle::Bold, 18.0, 10.0, Align::Center);
    canvas.cell("STRESS ANALYSIS REPORT", FontStyle::Bold, 18.0, 10.0, Align::Center);
    canvas.cell(RULE, FontStyle::Bold, 18.0, 10.0, Align::Center);
    canvas.gap(5.0);
    canvas.cell(
        &format!("Generated: {}", request.timestamp),
        FontStyle::Italic,
        12.0,
        8.0,
        Align::Center,
    );
    canvas.gap(8.0);

    heading(&mut canvas, "Summary");
    canvas.cell(
        &format!("Stress Level: {}", request.stress_level),
        FontStyle::Regular,
        12.0,
        8.0,
        Align::Left,
    );
    canvas.cell(
        &format!("Model Confidence: {}", request.confidence),
        FontStyle::Regular,
        12.0,
        8.0,
        Align::Left,
    );
    canvas.gap(6.0);

    heading(&mut canvas, "Observations");
    canvas.paragraph(observation_for(request.level), FontStyle::Regular, 12.0, 8.0);
    canvas.gap(6.0);

    heading(&mut canvas, "Personalized Recommendations");
    if request.recommendations.is_empty() {
        canvas.paragraph(NO_RECOMMENDATIONS, FontStyle::Regular, 12.0, 8.0);
    } else {
        for recommendation in &request.recommendations {
            canvas.paragraph(&format!("* {recommendation}"), FontStyle::Regular, 12.0, 8.0);
        }
    }
    canvas.gap(8.0);

    canvas.cell(RULE, FontStyle::Bold, 14.0, 10.0, Align::Left);
    canvas.cell("NOTE:", FontStyle::Bold, 14.0, 10.0, Align::Left);
    canvas.paragraph(DISCLAIMER, FontStyle::Regular, 11.0, 8.0);
    canvas.cell(RULE, FontStyle::Regular, 11.0, 10.0, Align::Left);

    let pages = canvas.pages();
    let bytes = canvas.finish()?;
    debug!(level = request.level, pages, size = bytes.len(), "rendered stress report");

    Ok(RenderedReport { bytes, pages })
}

fn heading(canvas: &mut ReportCanvas, title: &str) {
    canvas.cell(title, FontStyle::Bold, 14.0, 10.0, Align::Left);
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(Value::Bool(flag)) => Ok(flag.to_string()),
        Some(_) => Err(de::Error::custom("expected text")),
    }
}

/// Accepts `3`, `3.0` or `"3"`; absent or null means level 0.
fn deserialize_level<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => {
            if let Some(level) = number.as_i64() {
                Ok(level)
            } else {
                match number.as_f64() {
                    Some(level) if level.is_finite() && level.abs() < i64::MAX as f64 => {
                        Ok(level.trunc() as i64)
                    }
                    _ => Err(de::Error::custom(format!("level {number} is out of range"))),
                }
            }
        }
        Some(Value::String(raw)) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("level '{raw}' is not an integer"))),
        Some(_) => Err(de::Error::custom("level must be an integer")),
    }
}

fn deserialize_recommendations<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
