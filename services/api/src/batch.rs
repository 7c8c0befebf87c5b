use crate::infra::{load_config, load_service};
use chrono::{Local, NaiveDateTime};
use clap::Args;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use stress_lens::analysis::{AnalysisError, ClassificationService, SubmissionField, SubmissionInput};
use stress_lens::error::AppError;
use stress_lens::model::{ProbabilisticClassifier, TextVectorizer};

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file whose headers name submission fields (description, mood, stressCauses, ...)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Write results here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Directory holding the vectorizer and classifier artifacts
    #[arg(long)]
    pub(crate) model_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BatchRow {
    row: usize,
    level: Option<i64>,
    #[serde(rename = "stressLevel")]
    stress_level: String,
    confidence: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct BatchSummary {
    pub(crate) classified: usize,
    pub(crate) skipped: usize,
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs {
        input,
        output,
        model_dir,
    } = args;

    let config = load_config(model_dir)?;
    let service = load_service(&config.model)?;

    let reader = File::open(&input)?;
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    let summary = classify_rows(&service, reader, writer, Local::now().naive_local())?;
    eprintln!(
        "Classified {} row(s) from {}, skipped {} without usable text",
        summary.classified,
        input.display(),
        summary.skipped
    );
    Ok(())
}

pub(crate) fn classify_rows<V, C, R, W>(
    service: &ClassificationService<V, C>,
    reader: R,
    writer: W,
    generated_at: NaiveDateTime,
) -> Result<BatchSummary, AppError>
where
    V: TextVectorizer,
    C: ProbabilisticClassifier,
    R: Read,
    W: Write,
{
    let mut reader = csv::Reader::from_reader(reader);
    let columns: Vec<Option<SubmissionField>> = reader
        .headers()
        .map_err(io::Error::from)?
        .iter()
        .map(SubmissionField::from_key)
        .collect();
    if columns.iter().all(Option::is_none) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "CSV headers name none of the submission fields",
        )
        .into());
    }

    let mut writer = csv::Writer::from_writer(writer);
    let mut summary = BatchSummary::default();

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(io::Error::from)?;
        let submission = submission_from_record(&columns, &record);

        let row = match service.analyze(&submission, generated_at) {
            Ok(result) => {
                summary.classified += 1;
                BatchRow {
                    row: index + 1,
                    level: Some(result.level),
                    stress_level: result.stress_level,
                    confidence: result.confidence,
                }
            }
            Err(AnalysisError::EmptyText) => {
                summary.skipped += 1;
                BatchRow {
                    row: index + 1,
                    level: None,
                    stress_level: AnalysisError::EmptyText.to_string(),
                    confidence: String::new(),
                }
            }
            Err(err) => return Err(err.into()),
        };
        writer.serialize(row).map_err(io::Error::from)?;
    }

    writer.flush()?;
    Ok(summary)
}

fn submission_from_record(
    columns: &[Option<SubmissionField>],
    record: &csv::StringRecord,
) -> SubmissionInput {
    let mut submission = SubmissionInput::default();
    for (column, value) in columns.iter().zip(record.iter()) {
        if let Some(field) = column {
            if !value.is_empty() {
                submission.set(*field, Some(value.to_string()));
            }
        }
    }
    submission
}
