use crate::infra::{load_config, load_service};
use chrono::Local;
use clap::Args;
use std::path::PathBuf;
use stress_lens::analysis::{SubmissionField, SubmissionInput};
use stress_lens::error::AppError;
use stress_lens::report::{render_report, ReportRequest};

#[derive(Args, Debug, Default)]
pub(crate) struct PredictArgs {
    /// How would you describe yourself?
    #[arg(long)]
    pub(crate) description: Option<String>,
    /// Daily routine and lifestyle
    #[arg(long)]
    pub(crate) lifestyle: Option<String>,
    /// How things have been lately
    #[arg(long)]
    pub(crate) lately: Option<String>,
    /// Current mood
    #[arg(long)]
    pub(crate) mood: Option<String>,
    /// Free reflection on the past weeks
    #[arg(long)]
    pub(crate) reflection: Option<String>,
    /// Main sources of stress
    #[arg(long)]
    pub(crate) stress_causes: Option<String>,
    /// How stress is usually handled
    #[arg(long)]
    pub(crate) handling: Option<String>,
    /// Current worries
    #[arg(long)]
    pub(crate) worries: Option<String>,
    /// Anything else worth mentioning
    #[arg(long)]
    pub(crate) extra: Option<String>,
    /// Write the PDF report to this path
    #[arg(long)]
    pub(crate) report: Option<PathBuf>,
    /// Directory holding the vectorizer and classifier artifacts
    #[arg(long)]
    pub(crate) model_dir: Option<PathBuf>,
}

impl PredictArgs {
    fn submission(&self) -> SubmissionInput {
        let answers = [
            (SubmissionField::Description, &self.description),
            (SubmissionField::Lifestyle, &self.lifestyle),
            (SubmissionField::Lately, &self.lately),
            (SubmissionField::Mood, &self.mood),
            (SubmissionField::Reflection, &self.reflection),
            (SubmissionField::StressCauses, &self.stress_causes),
            (SubmissionField::Handling, &self.handling),
            (SubmissionField::Worries, &self.worries),
            (SubmissionField::Extra, &self.extra),
        ];

        let mut submission = SubmissionInput::default();
        for (field, value) in answers {
            submission.set(field, value.clone());
        }
        submission
    }
}

pub(crate) fn run_predict(mut args: PredictArgs) -> Result<(), AppError> {
    let config = load_config(args.model_dir.take())?;
    let service = load_service(&config.model)?;

    let result = service.analyze(&args.submission(), Local::now().naive_local())?;
    let rendered = serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?;
    println!("{rendered}");

    if let Some(path) = args.report {
        let report = render_report(&ReportRequest::from(result))?;
        std::fs::write(&path, &report.bytes)?;
        eprintln!(
            "Report written to {} ({} page(s), {} bytes)",
            path.display(),
            report.pages,
            report.bytes.len()
        );
    }

    Ok(())
}
