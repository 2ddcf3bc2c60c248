use anyhow::{bail, Result};
use clap::Parser;
use client_core::{load_settings, FormController, HttpPredictionService, ResultView, UiState};
use shared::domain::FormField;
use tracing_subscriber::EnvFilter;

/// Submit health metrics for a diabetes prediction.
#[derive(Parser, Debug)]
struct Args {
    /// Prediction service base URL; overrides assess.toml and API_BASE_URL.
    #[arg(long)]
    api_base_url: Option<String>,
    /// Male, Female or Other.
    #[arg(long)]
    gender: String,
    #[arg(long)]
    age: String,
    /// 0 (no) or 1 (yes).
    #[arg(long)]
    hypertension: String,
    /// 0 (no) or 1 (yes).
    #[arg(long)]
    heart_disease: String,
    /// never, "No Info", current or former.
    #[arg(long)]
    smoking_history: String,
    #[arg(long)]
    bmi: String,
    /// Glycated hemoglobin, in percent.
    #[arg(long)]
    hba1c_level: String,
    /// Blood glucose, in mg/dL.
    #[arg(long)]
    blood_glucose_level: String,
}

impl Args {
    fn fields(&self) -> [(FormField, &str); 8] {
        [
            (FormField::Gender, self.gender.as_str()),
            (FormField::Age, self.age.as_str()),
            (FormField::Hypertension, self.hypertension.as_str()),
            (FormField::HeartDisease, self.heart_disease.as_str()),
            (FormField::SmokingHistory, self.smoking_history.as_str()),
            (FormField::Bmi, self.bmi.as_str()),
            (FormField::Hba1cLevel, self.hba1c_level.as_str()),
            (FormField::BloodGlucoseLevel, self.blood_glucose_level.as_str()),
        ]
    }
}

fn render_result(label: &str) -> String {
    let view = ResultView::for_label(label);
    format!("{}\n  {}\n  {}", view.heading(), view.label, view.advice())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings()?.with_api_base_url(args.api_base_url.clone());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut controller =
        FormController::new(HttpPredictionService::new(settings.api_base_url.clone()));
    for (field, value) in args.fields() {
        controller.update_field(field, value);
    }

    if let Err(violations) = controller.form().validate() {
        for violation in &violations {
            eprintln!("  {violation}");
        }
        bail!(
            "{} field(s) failed validation; nothing was submitted",
            violations.len()
        );
    }

    tracing::info!(api_base_url = %settings.api_base_url, "submitting assessment");
    eprintln!("{}", UiState::Loading.submit_label());
    controller.submit().await;

    match controller.state() {
        UiState::Result(label) => {
            println!("{}", render_result(&label));
            Ok(())
        }
        UiState::Error(message) => bail!("{message}"),
        UiState::Idle | UiState::Loading => bail!("prediction did not complete"),
    }
}
