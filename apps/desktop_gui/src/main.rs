mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, HttpPredictionService, PredictionSession};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::AssessmentApp;

#[derive(Parser, Debug)]
struct StartupArgs {
    /// Prediction service base URL; overrides assess.toml and API_BASE_URL.
    #[arg(long)]
    api_base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = StartupArgs::parse();
    let settings = load_settings()?.with_api_base_url(args.api_base_url);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_filter())),
        )
        .init();
    tracing::info!(api_base_url = %settings.api_base_url, "starting assessment form");

    let session = PredictionSession::new(HttpPredictionService::new(
        settings.api_base_url.clone(),
    ));
    let state_rx = session.subscribe();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, session);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Diabetes Assessment")
            .with_inner_size([760.0, 880.0])
            .with_min_inner_size([520.0, 620.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Diabetes Assessment",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(AssessmentApp::new(cmd_tx, ui_rx, state_rx)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to open assessment window: {err}"))
}

#[cfg(test)]
mod tests {
    use super::StartupArgs;
    use clap::Parser;

    #[test]
    fn api_base_url_flag_is_optional() {
        let args = StartupArgs::try_parse_from(["desktop_gui"]).expect("no flags");
        assert_eq!(args.api_base_url, None);

        let args =
            StartupArgs::try_parse_from(["desktop_gui", "--api-base-url", "http://127.0.0.1:5000"])
                .expect("flag");
        assert_eq!(args.api_base_url.as_deref(), Some("http://127.0.0.1:5000"));
    }
}
